//! Trigger-date parsing.
//!
//! Deadlines have calendar-day granularity. A bare `YYYY-MM-DD` is taken as
//! is; an RFC 3339 timestamp is converted to the court's timezone first, so an
//! event filed at 23:30 Eastern counts from that Eastern calendar day even
//! though it is already the next day in UTC. Anything else is rejected: a
//! deadline is never computed from a guessed date.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::DeadlineError;
use crate::jurisdiction::Jurisdiction;

/// Parse a trigger date, normalizing timestamps to the calendar day in `tz`.
///
/// # Errors
///
/// Returns [`DeadlineError::InvalidDate`] if `input` is neither an ISO 8601
/// date nor an RFC 3339 timestamp.
pub fn parse_trigger_date(input: &str, tz: &Tz) -> Result<NaiveDate, DeadlineError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(DeadlineError::InvalidDate("empty trigger date".to_string()));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| local_day(dt.with_timezone(&Utc), tz))
        .map_err(|e| {
            DeadlineError::InvalidDate(format!(
                "'{s}': {e} (expected YYYY-MM-DD or an RFC 3339 timestamp)"
            ))
        })
}

/// Parse a trigger date in a jurisdiction's configured timezone.
pub fn parse_trigger_in(
    input: &str,
    jurisdiction: &Jurisdiction,
) -> Result<NaiveDate, DeadlineError> {
    parse_trigger_date(input, &jurisdiction.tz()?)
}

/// The calendar day an instant falls on in `tz`.
pub fn local_day<T: TimeZone>(instant: DateTime<T>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}
