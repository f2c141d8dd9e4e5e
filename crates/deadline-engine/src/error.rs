//! Error types for deadline-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeadlineError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid counting method: {0}")]
    InvalidCountingMethod(String),

    #[error("Invalid jurisdiction: {0}")]
    InvalidJurisdiction(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid holiday rule: {0}")]
    InvalidHolidayRule(String),

    #[error("Date {date} is outside the holiday calendar span {first}..={last}")]
    OutsideCalendar { date: NaiveDate, first: i32, last: i32 },

    #[error("Date arithmetic overflow: {0}")]
    DateOverflow(String),
}

pub type Result<T> = std::result::Result<T, DeadlineError>;
