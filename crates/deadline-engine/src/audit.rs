//! Append-only audit trail of a deadline calculation.
//!
//! [`AuditTrail::record`] consumes the trail and returns the extended one, so
//! each calculation stage receives the trail by value and hands it on. Entries
//! are never edited once recorded and step indices always increase.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What a single audit step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Start,
    ServiceDays,
    SkipWeekend,
    SkipHoliday,
    CountCalendarDays,
    CountOpenDays,
    AddServiceDays,
    RollForward,
    RollBackward,
    Final,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::ServiceDays => "SERVICE_DAYS",
            Self::SkipWeekend => "SKIP_WEEKEND",
            Self::SkipHoliday => "SKIP_HOLIDAY",
            Self::CountCalendarDays => "COUNT_CALENDAR_DAYS",
            Self::CountOpenDays => "COUNT_OPEN_DAYS",
            Self::AddServiceDays => "ADD_SERVICE_DAYS",
            Self::RollForward => "ROLL_FORWARD",
            Self::RollBackward => "ROLL_BACKWARD",
            Self::Final => "FINAL",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    /// 1-based position in the trail.
    pub step: u32,
    pub action: AuditAction,
    /// The date this step concerns: the skipped day for skips, otherwise the
    /// working date after the step.
    pub date: NaiveDate,
    pub note: String,
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>3}. {:<19} {}  {}",
            self.step,
            self.action.as_str(),
            self.date,
            self.note
        )
    }
}

/// Accumulator threaded through the calculation stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditTrail {
    entries: Vec<AuditEntry>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step and return the extended trail.
    #[must_use]
    pub fn record(mut self, action: AuditAction, date: NaiveDate, note: impl Into<String>) -> Self {
        let step = self.entries.len() as u32 + 1;
        self.entries.push(AuditEntry {
            step,
            action,
            date,
            note: note.into(),
        });
        self
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.entries.last().map(|e| e.date)
    }

    pub fn into_entries(self) -> Vec<AuditEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_steps_increase() {
        let trail = AuditTrail::new()
            .record(AuditAction::Start, d(2024, 1, 2), "start")
            .record(AuditAction::ServiceDays, d(2024, 1, 2), "0 days")
            .record(AuditAction::Final, d(2024, 1, 3), "done");
        let steps: Vec<u32> = trail.entries().iter().map(|e| e.step).collect();
        assert_eq!(steps, vec![1, 2, 3]);
        assert_eq!(trail.last_date(), Some(d(2024, 1, 3)));
    }

    #[test]
    fn test_branches_do_not_share_entries() {
        let base = AuditTrail::new().record(AuditAction::Start, d(2024, 1, 2), "start");
        let a = base.clone().record(AuditAction::Final, d(2024, 1, 3), "a");
        let b = base.record(AuditAction::RollForward, d(2024, 1, 4), "b");
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
        assert_eq!(a.entries()[1].action, AuditAction::Final);
        assert_eq!(b.entries()[1].action, AuditAction::RollForward);
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = AuditTrail::new()
            .record(AuditAction::SkipHoliday, d(2024, 11, 11), "Veterans Day")
            .into_entries()
            .remove(0);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["action"], "SKIP_HOLIDAY");
        assert_eq!(json["date"], "2024-11-11");
        assert_eq!(json["step"], 1);
    }

    #[test]
    fn test_display() {
        let entry = AuditTrail::new()
            .record(AuditAction::Start, d(2024, 11, 1), "Trigger")
            .into_entries()
            .remove(0);
        assert_eq!(entry.to_string(), "  1. START               2024-11-01  Trigger");
    }
}
