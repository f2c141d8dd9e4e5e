//! Deadline calculation: trigger date + offset + counting method + service method.
//!
//! All arithmetic happens on [`NaiveDate`], so results have calendar-day
//! granularity by construction. Every stage takes the working state by value
//! and returns it extended, narrating itself into the audit trail in the order
//! the operations are applied.
//!
//! # Counting methods
//!
//! - [`CountingMethod::Calendar`] — add the offset as calendar days, add service
//!   days, then roll forward off a closed day.
//! - [`CountingMethod::Business`] / [`CountingMethod::Court`] — walk one day at
//!   a time in the offset's direction, consuming the count only on open days,
//!   then add service days and roll forward.
//! - [`CountingMethod::Retrograde`] — always walk backward, consuming the count
//!   only on open days; service days never apply.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::audit::{AuditAction, AuditEntry, AuditTrail};
use crate::calendar::{ClosedDays, HolidayCalendar};
use crate::error::DeadlineError;
use crate::jurisdiction::JurisdictionLevel;
use crate::service::{ServiceMethod, ServiceMethodTable};

/// How the day offset is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CountingMethod {
    Calendar,
    Business,
    /// Counted like [`CountingMethod::Business`] today; kept distinct so a
    /// jurisdiction can add court-only closures later.
    Court,
    Retrograde,
}

impl CountingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calendar => "CALENDAR",
            Self::Business => "BUSINESS",
            Self::Court => "COURT",
            Self::Retrograde => "RETROGRADE",
        }
    }

    fn day_label(&self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Business => "business",
            Self::Court => "court",
            Self::Retrograde => "open",
        }
    }
}

impl fmt::Display for CountingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountingMethod {
    type Err = DeadlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "calendar" => Ok(Self::Calendar),
            "business" => Ok(Self::Business),
            "court" => Ok(Self::Court),
            "retrograde" => Ok(Self::Retrograde),
            _ => Err(DeadlineError::InvalidCountingMethod(format!(
                "'{}' (expected CALENDAR, BUSINESS, COURT or RETROGRADE)",
                s.trim()
            ))),
        }
    }
}

/// The computed deadline together with the trail that derived it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub deadline_date: NaiveDate,
    pub trigger_date: NaiveDate,
    pub base_days: i32,
    pub counting_method: CountingMethod,
    pub service_method: ServiceMethod,
    pub service_days_added: u32,
    pub service_citation: String,
    /// Holidays encountered while advancing (not every holiday in the range).
    pub holidays_skipped: u32,
    /// Weekend days encountered while advancing.
    pub weekends_skipped: u32,
    pub audit_log: Vec<AuditEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_adjustment: Option<String>,
}

impl CalculationResult {
    /// The audit log as one line per step.
    pub fn audit_text(&self) -> String {
        self.audit_log
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Turns (trigger, offset, counting method, service method) into a dated result.
///
/// Stateless across calls: the calendar and table are only read.
#[derive(Debug, Clone)]
pub struct DeadlineCalculator<C = HolidayCalendar> {
    calendar: C,
    level: JurisdictionLevel,
    table: ServiceMethodTable,
}

impl<C: ClosedDays + AsRef<HolidayCalendar>> DeadlineCalculator<C> {
    /// Calculator over a generated calendar, using its jurisdiction level and
    /// the built-in service table.
    pub fn for_calendar(calendar: C) -> Self {
        let level = calendar.as_ref().jurisdiction().level;
        Self::new(calendar, level, ServiceMethodTable::default())
    }
}

impl<C: ClosedDays> DeadlineCalculator<C> {
    pub fn new(calendar: C, level: JurisdictionLevel, table: ServiceMethodTable) -> Self {
        Self {
            calendar,
            level,
            table,
        }
    }

    #[must_use]
    pub fn with_table(mut self, table: ServiceMethodTable) -> Self {
        self.table = table;
        self
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    pub fn level(&self) -> JurisdictionLevel {
        self.level
    }

    pub fn table(&self) -> &ServiceMethodTable {
        &self.table
    }

    /// Compute the deadline `days` from `trigger`.
    ///
    /// `days` may be zero (same-day deadline) or negative (counted backward).
    ///
    /// # Errors
    ///
    /// Returns [`DeadlineError::OutsideCalendar`] if the calculation would visit a
    /// date the calendar has no holiday data for, or
    /// [`DeadlineError::DateOverflow`] if the arithmetic leaves chrono's date range.
    pub fn calculate(
        &self,
        trigger: NaiveDate,
        days: i32,
        method: CountingMethod,
        service: ServiceMethod,
    ) -> Result<CalculationResult, DeadlineError> {
        self.calculate_with_note(trigger, days, method, service, None)
    }

    pub(crate) fn calculate_with_note(
        &self,
        trigger: NaiveDate,
        days: i32,
        method: CountingMethod,
        service: ServiceMethod,
        rule_note: Option<&str>,
    ) -> Result<CalculationResult, DeadlineError> {
        let span = debug_span!("calculate", %trigger, days, %method, %service);
        let _enter = span.enter();

        self.ensure_covered(trigger)?;

        let lookup = self.table.lookup(self.level, service);
        let service_days = match method {
            CountingMethod::Retrograde => 0,
            _ => lookup.additional_days,
        };

        let mut start_note = format!(
            "Trigger date {} ({}); {} {} days",
            trigger,
            weekday_name(trigger),
            days,
            method.day_label()
        );
        if let Some(note) = rule_note {
            start_note.push_str("; ");
            start_note.push_str(note);
        }
        let service_note = if method == CountingMethod::Retrograde {
            format!(
                "{service}: service extension does not apply to retrograde counting ({})",
                lookup.citation
            )
        } else {
            format!("{service}: +{service_days} days ({})", lookup.citation)
        };

        let walk = Walk::new(trigger)
            .record(AuditAction::Start, start_note)
            .record(AuditAction::ServiceDays, service_note);

        let walk = match method {
            CountingMethod::Calendar => {
                let walk = self.add_days(
                    walk,
                    i64::from(days),
                    AuditAction::CountCalendarDays,
                    |from, to| {
                        format!(
                            "Added {days} calendar days to {from}: {to} ({})",
                            weekday_name(to)
                        )
                    },
                )?;
                let walk = self.add_service_days(walk, service_days)?;
                self.roll_forward(walk)?
            }
            CountingMethod::Business | CountingMethod::Court => {
                let walk = self.count_open_days(walk, days.unsigned_abs(), days >= 0, method)?;
                let walk = self.add_service_days(walk, service_days)?;
                self.roll_forward(walk)?
            }
            CountingMethod::Retrograde => {
                let walk = self.count_open_days(walk, days.unsigned_abs(), false, method)?;
                self.roll_backward(walk)?
            }
        };

        let deadline = walk.date;
        let final_note = format!("Deadline {} ({})", deadline, weekday_name(deadline));
        let walk = walk.record(AuditAction::Final, final_note);

        debug!(
            %deadline,
            holidays_skipped = walk.holidays_skipped,
            weekends_skipped = walk.weekends_skipped,
            "deadline calculated"
        );

        Ok(CalculationResult {
            deadline_date: deadline,
            trigger_date: trigger,
            base_days: days,
            counting_method: method,
            service_method: service,
            service_days_added: service_days,
            service_citation: lookup.citation,
            holidays_skipped: walk.holidays_skipped,
            weekends_skipped: walk.weekends_skipped,
            audit_log: walk.trail.into_entries(),
            final_adjustment: walk.adjustment,
        })
    }

    // ── Stages ──────────────────────────────────────────────────────────────

    /// Add `days` calendar days without looking at the calendar.
    fn add_days(
        &self,
        walk: Walk,
        days: i64,
        action: AuditAction,
        note: impl FnOnce(NaiveDate, NaiveDate) -> String,
    ) -> Result<Walk, DeadlineError> {
        let from = walk.date;
        let to = from
            .checked_add_signed(Duration::days(days))
            .ok_or_else(|| DeadlineError::DateOverflow(format!("{from} {days:+} days")))?;
        self.ensure_covered(to)?;
        Ok(walk.moved_to(to).record(action, note(from, to)))
    }

    fn add_service_days(&self, walk: Walk, service_days: u32) -> Result<Walk, DeadlineError> {
        if service_days == 0 {
            return Ok(walk);
        }
        self.add_days(
            walk,
            i64::from(service_days),
            AuditAction::AddServiceDays,
            |from, to| {
                format!(
                    "Added {service_days} service days to {from}: {to} ({})",
                    weekday_name(to)
                )
            },
        )
    }

    /// Walk one day at a time, consuming `count` only on open days.
    fn count_open_days(
        &self,
        mut walk: Walk,
        count: u32,
        forward: bool,
        method: CountingMethod,
    ) -> Result<Walk, DeadlineError> {
        let start = walk.date;
        let (holidays_before, weekends_before) = (walk.holidays_skipped, walk.weekends_skipped);
        let mut remaining = count;
        let mut date = start;
        while remaining > 0 {
            date = step(date, forward)?;
            self.ensure_covered(date)?;
            if self.calendar.is_open(&date) {
                remaining -= 1;
            } else {
                walk = self.skip(walk, date);
            }
        }

        let note = format!(
            "Counted {} {} days {} from {}: {} ({}); skipped {} weekend days and {} holidays",
            count,
            method.day_label(),
            if forward { "forward" } else { "backward" },
            start,
            date,
            weekday_name(date),
            walk.weekends_skipped - weekends_before,
            walk.holidays_skipped - holidays_before,
        );
        Ok(walk.moved_to(date).record(AuditAction::CountOpenDays, note))
    }

    /// Move a closed result forward to the next open day. Never moves backward.
    fn roll_forward(&self, walk: Walk) -> Result<Walk, DeadlineError> {
        self.roll(walk, true)
    }

    /// Move a closed result back to the preceding open day. Only reachable for a
    /// zero-day retrograde count landing on a closed trigger.
    fn roll_backward(&self, walk: Walk) -> Result<Walk, DeadlineError> {
        self.roll(walk, false)
    }

    fn roll(&self, mut walk: Walk, forward: bool) -> Result<Walk, DeadlineError> {
        let from = walk.date;
        if self.calendar.is_open(&from) {
            return Ok(walk);
        }
        let reason = self.closed_reason(from);
        let mut date = from;
        while self.calendar.is_closed(&date) {
            walk = walk.tally(self.calendar.is_holiday(&date));
            date = step(date, forward)?;
            self.ensure_covered(date)?;
        }

        let (action, direction) = if forward {
            (AuditAction::RollForward, "next")
        } else {
            (AuditAction::RollBackward, "preceding")
        };
        let note = format!(
            "{} is closed ({}); {} open day is {} ({})",
            from,
            reason,
            direction,
            date,
            weekday_name(date)
        );
        let mut walk = walk.moved_to(date).record(action, note.clone());
        walk.adjustment = Some(note);
        Ok(walk)
    }

    fn skip(&self, walk: Walk, date: NaiveDate) -> Walk {
        let holiday = self.calendar.is_holiday(&date);
        let action = if holiday {
            AuditAction::SkipHoliday
        } else {
            AuditAction::SkipWeekend
        };
        let note = format!("Skipped {}", self.closed_reason(date));
        // The working date is unchanged while skipping; entries carry the skipped day.
        walk.tally(holiday).record_at(action, date, note)
    }

    fn closed_reason(&self, date: NaiveDate) -> String {
        match self.calendar.get_holiday(&date) {
            Some(h) => format!("{} ({})", h.name, weekday_name(date)),
            None => weekday_name(date),
        }
    }

    fn ensure_covered(&self, date: NaiveDate) -> Result<(), DeadlineError> {
        if self.calendar.covers(&date) {
            return Ok(());
        }
        let years = self.calendar.years();
        Err(DeadlineError::OutsideCalendar {
            date,
            first: *years.start(),
            last: *years.end(),
        })
    }
}

/// Shared-calendar calculator; the calendar itself is never cloned.
pub type SharedCalculator = DeadlineCalculator<Arc<HolidayCalendar>>;

// ── Working state ───────────────────────────────────────────────────────────

/// The state handed from stage to stage.
#[derive(Debug)]
struct Walk {
    date: NaiveDate,
    holidays_skipped: u32,
    weekends_skipped: u32,
    adjustment: Option<String>,
    trail: AuditTrail,
}

impl Walk {
    fn new(trigger: NaiveDate) -> Self {
        Self {
            date: trigger,
            holidays_skipped: 0,
            weekends_skipped: 0,
            adjustment: None,
            trail: AuditTrail::new(),
        }
    }

    fn moved_to(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    fn tally(mut self, holiday: bool) -> Self {
        if holiday {
            self.holidays_skipped += 1;
        } else {
            self.weekends_skipped += 1;
        }
        self
    }

    fn record(self, action: AuditAction, note: String) -> Self {
        let date = self.date;
        self.record_at(action, date, note)
    }

    fn record_at(mut self, action: AuditAction, date: NaiveDate, note: String) -> Self {
        self.trail = self.trail.record(action, date, note);
        self
    }
}

fn step(date: NaiveDate, forward: bool) -> Result<NaiveDate, DeadlineError> {
    let next = if forward {
        date.succ_opt()
    } else {
        date.pred_opt()
    };
    next.ok_or_else(|| DeadlineError::DateOverflow(format!("no day adjacent to {date}")))
}

fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jurisdiction::Jurisdiction;
    use crate::Holiday;
    use crate::HolidayKind;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn federal() -> DeadlineCalculator {
        let cal =
            HolidayCalendar::generate_span(2023..=2026, &Jurisdiction::federal(), &[]).unwrap();
        DeadlineCalculator::for_calendar(cal)
    }

    fn state() -> DeadlineCalculator {
        let cal =
            HolidayCalendar::generate_span(2023..=2026, &Jurisdiction::state("FL"), &[]).unwrap();
        DeadlineCalculator::for_calendar(cal)
    }

    fn actions(result: &CalculationResult) -> Vec<AuditAction> {
        result.audit_log.iter().map(|e| e.action).collect()
    }

    #[test]
    fn test_business_days_skip_weekends_and_veterans_day() {
        let r = federal()
            .calculate(d(2024, 11, 1), 10, CountingMethod::Business, ServiceMethod::Personal)
            .unwrap();
        assert_eq!(r.deadline_date, d(2024, 11, 18));
        assert_eq!(r.weekends_skipped, 6);
        assert_eq!(r.holidays_skipped, 1);
        assert_eq!(r.service_days_added, 0);
        let holiday_skips: Vec<&AuditEntry> = r
            .audit_log
            .iter()
            .filter(|e| e.action == AuditAction::SkipHoliday)
            .collect();
        assert_eq!(holiday_skips.len(), 1);
        assert_eq!(holiday_skips[0].date, d(2024, 11, 11));
        assert!(holiday_skips[0].note.contains("Veterans Day"));
        assert!(r.final_adjustment.is_none());
    }

    #[test]
    fn test_calendar_days_with_mail_service() {
        let r = state()
            .calculate(d(2024, 12, 20), 5, CountingMethod::Calendar, ServiceMethod::FirstClassMail)
            .unwrap();
        assert_eq!(r.deadline_date, d(2024, 12, 30));
        assert_eq!(r.service_days_added, 5);
        assert_eq!(
            actions(&r),
            vec![
                AuditAction::Start,
                AuditAction::ServiceDays,
                AuditAction::CountCalendarDays,
                AuditAction::AddServiceDays,
                AuditAction::Final,
            ]
        );
        assert_eq!(r.audit_log[2].date, d(2024, 12, 25));
        assert!(r.final_adjustment.is_none());
    }

    #[test]
    fn test_calendar_rolls_forward_off_holiday() {
        let r = federal()
            .calculate(d(2024, 12, 20), 5, CountingMethod::Calendar, ServiceMethod::Personal)
            .unwrap();
        assert_eq!(r.deadline_date, d(2024, 12, 26));
        assert_eq!(r.holidays_skipped, 1);
        assert!(actions(&r).contains(&AuditAction::RollForward));
        let adj = r.final_adjustment.unwrap();
        assert!(adj.contains("Christmas Day"), "got: {adj}");
    }

    #[test]
    fn test_calendar_negative_days_still_roll_forward() {
        // 2024-11-18 - 8 = Sunday 2024-11-10 → Veterans Day Monday → Tuesday
        let r = federal()
            .calculate(d(2024, 11, 18), -8, CountingMethod::Calendar, ServiceMethod::Personal)
            .unwrap();
        assert_eq!(r.deadline_date, d(2024, 11, 12));
        assert_eq!(r.weekends_skipped, 1);
        assert_eq!(r.holidays_skipped, 1);
    }

    #[test]
    fn test_zero_days_open_trigger_is_same_day() {
        let r = federal()
            .calculate(d(2024, 11, 1), 0, CountingMethod::Calendar, ServiceMethod::Personal)
            .unwrap();
        assert_eq!(r.deadline_date, d(2024, 11, 1));
    }

    #[test]
    fn test_zero_days_closed_trigger_rolls_forward() {
        let r = federal()
            .calculate(d(2024, 11, 9), 0, CountingMethod::Calendar, ServiceMethod::Personal)
            .unwrap();
        // Sat, Sun, Veterans Day Monday
        assert_eq!(r.deadline_date, d(2024, 11, 12));
        assert_eq!(r.weekends_skipped, 2);
        assert_eq!(r.holidays_skipped, 1);
    }

    #[test]
    fn test_business_zero_days_closed_trigger_rolls_forward() {
        let r = federal()
            .calculate(d(2024, 12, 25), 0, CountingMethod::Business, ServiceMethod::Personal)
            .unwrap();
        assert_eq!(r.deadline_date, d(2024, 12, 26));
    }

    #[test]
    fn test_court_matches_business() {
        let calc = federal();
        let b = calc
            .calculate(d(2024, 11, 20), 7, CountingMethod::Business, ServiceMethod::FirstClassMail)
            .unwrap();
        let c = calc
            .calculate(d(2024, 11, 20), 7, CountingMethod::Court, ServiceMethod::FirstClassMail)
            .unwrap();
        assert_eq!(b.deadline_date, c.deadline_date);
        assert_eq!(c.counting_method, CountingMethod::Court);
    }

    #[test]
    fn test_business_days_then_service_days_then_roll() {
        // 2024-11-20 + 7 business days skips Thanksgiving → Mon 12-02; +3 mail → Thu 12-05
        let r = federal()
            .calculate(d(2024, 11, 20), 7, CountingMethod::Business, ServiceMethod::FirstClassMail)
            .unwrap();
        assert_eq!(r.deadline_date, d(2024, 12, 5));
        assert_eq!(r.service_days_added, 3);
        assert_eq!(
            r.audit_log.iter().rev().nth(1).map(|e| e.action),
            Some(AuditAction::AddServiceDays)
        );
    }

    #[test]
    fn test_negative_business_days_count_backward() {
        let r = federal()
            .calculate(d(2024, 11, 12), -1, CountingMethod::Business, ServiceMethod::Personal)
            .unwrap();
        // Back over Veterans Day and the weekend
        assert_eq!(r.deadline_date, d(2024, 11, 8));
    }

    #[test]
    fn test_negative_business_days_then_service_days_roll_forward() {
        // Back to Wed 11-13, +3 mail lands on Sat 11-16, rolls to Mon 11-18
        let r = federal()
            .calculate(d(2024, 11, 14), -1, CountingMethod::Business, ServiceMethod::FirstClassMail)
            .unwrap();
        assert_eq!(r.deadline_date, d(2024, 11, 18));
        assert_eq!(r.service_days_added, 3);
        assert!(r.final_adjustment.is_some());

        let acts = actions(&r);
        let pos = |a: AuditAction| acts.iter().position(|x| *x == a).unwrap();
        assert!(pos(AuditAction::CountOpenDays) < pos(AuditAction::AddServiceDays));
        assert!(pos(AuditAction::AddServiceDays) < pos(AuditAction::RollForward));
        let counted = &r.audit_log[pos(AuditAction::CountOpenDays)];
        assert_eq!(counted.date, d(2024, 11, 13));
        assert!(counted.note.contains("backward"));
    }

    #[test]
    fn test_retrograde_ignores_sign_and_service() {
        let calc = federal();
        let pos = calc
            .calculate(
                d(2024, 11, 18),
                5,
                CountingMethod::Retrograde,
                ServiceMethod::FirstClassMail,
            )
            .unwrap();
        let neg = calc
            .calculate(
                d(2024, 11, 18),
                -5,
                CountingMethod::Retrograde,
                ServiceMethod::FirstClassMail,
            )
            .unwrap();
        assert_eq!(pos.deadline_date, neg.deadline_date);
        // 15, 14, 13, 12, (11 holiday), (10, 9 weekend), 8
        assert_eq!(pos.deadline_date, d(2024, 11, 8));
        assert_eq!(pos.service_days_added, 0);
        assert!(pos.audit_log[1].note.contains("does not apply"));
    }

    #[test]
    fn test_retrograde_zero_on_closed_day_rolls_backward() {
        let r = federal()
            .calculate(d(2024, 11, 11), 0, CountingMethod::Retrograde, ServiceMethod::Personal)
            .unwrap();
        assert_eq!(r.deadline_date, d(2024, 11, 8));
        assert!(actions(&r).contains(&AuditAction::RollBackward));
    }

    #[test]
    fn test_audit_order_and_steps() {
        let r = federal()
            .calculate(d(2024, 11, 1), 10, CountingMethod::Business, ServiceMethod::Personal)
            .unwrap();
        let acts = actions(&r);
        assert_eq!(acts[0], AuditAction::Start);
        assert_eq!(acts[1], AuditAction::ServiceDays);
        assert_eq!(*acts.last().unwrap(), AuditAction::Final);
        assert!(r.audit_log.windows(2).all(|w| w[0].step < w[1].step));
        assert_eq!(r.audit_log[1].note, "PERSONAL: +0 days (Fed. R. Civ. P. 5(b)(2)(A))");
    }

    #[test]
    fn test_outside_calendar_is_an_error() {
        let cal = HolidayCalendar::generate(2024, &Jurisdiction::federal(), &[]).unwrap();
        let calc = DeadlineCalculator::for_calendar(cal);
        let err = calc
            .calculate(d(2024, 12, 20), 10, CountingMethod::Business, ServiceMethod::Personal)
            .unwrap_err();
        assert!(matches!(err, DeadlineError::OutsideCalendar { first: 2024, last: 2024, .. }));
        let err = calc
            .calculate(d(2023, 12, 20), 1, CountingMethod::Calendar, ServiceMethod::Personal)
            .unwrap_err();
        assert!(err.to_string().contains("outside the holiday calendar"), "got: {err}");
    }

    #[test]
    fn test_unmapped_service_fails_open() {
        let r = federal()
            .calculate(d(2024, 11, 1), 3, CountingMethod::Calendar, ServiceMethod::Unmapped)
            .unwrap();
        assert_eq!(r.service_days_added, 0);
        assert_eq!(r.service_citation, "Unknown");
    }

    #[test]
    fn test_custom_holiday_is_skipped() {
        let closure = Holiday::custom(d(2024, 3, 8), "Hurricane closure", HolidayKind::Court);
        let cal = HolidayCalendar::generate(2024, &Jurisdiction::federal(), &[closure]).unwrap();
        let r = DeadlineCalculator::for_calendar(cal)
            .calculate(d(2024, 3, 7), 1, CountingMethod::Business, ServiceMethod::Personal)
            .unwrap();
        assert_eq!(r.deadline_date, d(2024, 3, 11));
    }

    #[test]
    fn test_weekend_holiday_counts_once_as_holiday() {
        let closure = Holiday::custom(d(2024, 3, 9), "Saturday closure", HolidayKind::Court);
        let cal = HolidayCalendar::generate(2024, &Jurisdiction::federal(), &[closure]).unwrap();
        let r = DeadlineCalculator::for_calendar(cal)
            .calculate(d(2024, 3, 8), 1, CountingMethod::Business, ServiceMethod::Personal)
            .unwrap();
        assert_eq!(r.deadline_date, d(2024, 3, 11));
        assert_eq!(r.holidays_skipped, 1);
        assert_eq!(r.weekends_skipped, 1);

        let on_saturday: Vec<_> = r
            .audit_log
            .iter()
            .filter(|e| e.date == d(2024, 3, 9))
            .map(|e| e.action)
            .collect();
        assert_eq!(on_saturday, vec![AuditAction::SkipHoliday]);
    }

    #[test]
    fn test_shared_calendar() {
        let cal = Arc::new(
            HolidayCalendar::generate_span(2024..=2025, &Jurisdiction::federal(), &[]).unwrap(),
        );
        let calc: SharedCalculator = DeadlineCalculator::for_calendar(Arc::clone(&cal));
        let r = calc
            .calculate(d(2024, 11, 1), 10, CountingMethod::Business, ServiceMethod::Personal)
            .unwrap();
        assert_eq!(r.deadline_date, d(2024, 11, 18));
        assert_eq!(Arc::strong_count(&cal), 2);
    }

    #[test]
    fn test_parse_counting_method() {
        assert_eq!("business".parse::<CountingMethod>().unwrap(), CountingMethod::Business);
        assert_eq!("RETROGRADE".parse::<CountingMethod>().unwrap(), CountingMethod::Retrograde);
        let err = "lunar".parse::<CountingMethod>().unwrap_err().to_string();
        assert!(err.contains("Invalid counting method"), "got: {err}");
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let r = federal()
            .calculate(d(2024, 11, 1), 10, CountingMethod::Business, ServiceMethod::Personal)
            .unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["deadlineDate"], "2024-11-18");
        assert_eq!(json["countingMethod"], "BUSINESS");
        assert_eq!(json["holidaysSkipped"], 1);
        assert!(json.get("finalAdjustment").is_none());
    }
}
