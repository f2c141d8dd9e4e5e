//! # deadline-engine
//!
//! Deterministic court deadline computation.
//!
//! Given a trigger date, a day offset, a counting method and a method of
//! service, the engine produces the deadline date together with an ordered
//! audit trail explaining every step: which days were skipped, how many days
//! service added and under which rule, and why the final date was rolled.
//! Calculations are pure functions of their inputs and the holiday calendar;
//! dates outside the calendar's span are reported as errors, never guessed.
//!
//! ## Modules
//!
//! - [`holiday`] — Holiday records, holiday rules, and the built-in federal and state sets
//! - [`calendar`] — Per-jurisdiction holiday calendars and the [`ClosedDays`] classification
//! - [`jurisdiction`] — Federal/state jurisdiction selection and court timezone
//! - [`service`] — Service-method extension table with rule citations
//! - [`audit`] — Append-only audit trail
//! - [`calculator`] — Counting methods and the deadline calculator
//! - [`rule`] — Declarative rule records mapped onto the calculator
//! - [`trigger`] — Trigger-date parsing and timezone normalization
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use deadline_engine::{
//!     CountingMethod, DeadlineCalculator, HolidayCalendar, Jurisdiction, ServiceMethod,
//! };
//!
//! let calendar = HolidayCalendar::generate_span(2024..=2025, &Jurisdiction::federal(), &[])?;
//! let calculator = DeadlineCalculator::for_calendar(calendar);
//! let trigger = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
//! let result =
//!     calculator.calculate(trigger, 10, CountingMethod::Business, ServiceMethod::Personal)?;
//! assert_eq!(result.deadline_date, NaiveDate::from_ymd_opt(2024, 11, 18).unwrap());
//! assert_eq!(result.holidays_skipped, 1);
//! # Ok::<(), deadline_engine::DeadlineError>(())
//! ```

pub mod audit;
pub mod calculator;
pub mod calendar;
pub mod error;
pub mod holiday;
pub mod jurisdiction;
pub mod rule;
pub mod service;
pub mod trigger;

pub use audit::{AuditAction, AuditEntry, AuditTrail};
pub use calculator::{CalculationResult, CountingMethod, DeadlineCalculator, SharedCalculator};
pub use calendar::{ClosedDays, HolidayCalendar};
pub use error::DeadlineError;
pub use holiday::{Holiday, HolidayDefinition, HolidayKind, HolidayRule};
pub use jurisdiction::{Jurisdiction, JurisdictionLevel};
pub use rule::{RuleLogic, RuleResolver};
pub use service::{ServiceLookup, ServiceMethod, ServiceMethodRule, ServiceMethodTable};
pub use trigger::{parse_trigger_date, parse_trigger_in};
