//! Holiday calendars: the set of closed days for a jurisdiction over a span of years.
//!
//! A [`HolidayCalendar`] is generated once and never mutated afterwards, so a
//! single instance can be shared read-only (e.g. behind an `Arc`) by any number
//! of concurrent calculations.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::debug;

use crate::error::DeadlineError;
use crate::holiday::{standard_definitions, state_definitions, Holiday, HolidayKind};
use crate::jurisdiction::{Jurisdiction, JurisdictionLevel};

/// Earliest and latest years a calendar may be generated for.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Open/closed day classification used by the deadline calculator.
pub trait ClosedDays {
    /// Returns whether the date falls on a Saturday or Sunday.
    fn is_weekend(&self, date: &NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns whether the date is a recognised holiday.
    fn is_holiday(&self, date: &NaiveDate) -> bool;

    /// The holiday observed on `date`, if any.
    fn get_holiday(&self, date: &NaiveDate) -> Option<&Holiday>;

    /// Returns whether holiday data is known for `date`.
    fn covers(&self, date: &NaiveDate) -> bool;

    /// The span of years this calendar has holiday data for.
    fn years(&self) -> RangeInclusive<i32>;

    /// Returns whether the court is closed on `date`.
    fn is_closed(&self, date: &NaiveDate) -> bool {
        self.is_weekend(date) || self.is_holiday(date)
    }

    /// Returns whether the court is open on `date`.
    fn is_open(&self, date: &NaiveDate) -> bool {
        !self.is_closed(date)
    }
}

impl<T: ClosedDays + ?Sized> ClosedDays for &T {
    fn is_weekend(&self, date: &NaiveDate) -> bool {
        (**self).is_weekend(date)
    }
    fn is_holiday(&self, date: &NaiveDate) -> bool {
        (**self).is_holiday(date)
    }
    fn get_holiday(&self, date: &NaiveDate) -> Option<&Holiday> {
        (**self).get_holiday(date)
    }
    fn covers(&self, date: &NaiveDate) -> bool {
        (**self).covers(date)
    }
    fn years(&self) -> RangeInclusive<i32> {
        (**self).years()
    }
}

impl<T: ClosedDays + ?Sized> ClosedDays for Arc<T> {
    fn is_weekend(&self, date: &NaiveDate) -> bool {
        (**self).is_weekend(date)
    }
    fn is_holiday(&self, date: &NaiveDate) -> bool {
        (**self).is_holiday(date)
    }
    fn get_holiday(&self, date: &NaiveDate) -> Option<&Holiday> {
        (**self).get_holiday(date)
    }
    fn covers(&self, date: &NaiveDate) -> bool {
        (**self).covers(date)
    }
    fn years(&self) -> RangeInclusive<i32> {
        (**self).years()
    }
}

/// The generated holidays of one jurisdiction over a contiguous span of years.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    jurisdiction: Jurisdiction,
    first_year: i32,
    last_year: i32,
    holidays: BTreeMap<NaiveDate, Vec<Holiday>>,
}

impl HolidayCalendar {
    /// Generate the calendar for a single year.
    ///
    /// `custom` holidays (admin-added closures) are added on top of the
    /// generated ones; those falling outside `year` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DeadlineError::InvalidDate`] if `year` is outside
    /// [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn generate(
        year: i32,
        jurisdiction: &Jurisdiction,
        custom: &[Holiday],
    ) -> Result<Self, DeadlineError> {
        Self::generate_span(year..=year, jurisdiction, custom)
    }

    /// Generate one calendar covering every year in `years`.
    ///
    /// Fixed holidays of the neighbouring years are evaluated as well, so that
    /// e.g. New Year's Day falling on a Saturday is observed on December 31 of
    /// the last covered year.
    pub fn generate_span(
        years: RangeInclusive<i32>,
        jurisdiction: &Jurisdiction,
        custom: &[Holiday],
    ) -> Result<Self, DeadlineError> {
        let (first_year, last_year) = (*years.start(), *years.end());
        if first_year > last_year {
            return Err(DeadlineError::InvalidDate(format!(
                "empty year span {first_year}..={last_year}"
            )));
        }
        for year in [first_year, last_year] {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(DeadlineError::InvalidDate(format!(
                    "year {year} is outside {MIN_YEAR}..={MAX_YEAR}"
                )));
            }
        }

        let kind = match jurisdiction.level {
            JurisdictionLevel::Federal => HolidayKind::Federal,
            JurisdictionLevel::State => HolidayKind::State,
        };
        let mut definitions = standard_definitions(kind, jurisdiction.election_day);
        if let (JurisdictionLevel::State, Some(code)) =
            (jurisdiction.level, jurisdiction.state_code.as_deref())
        {
            match state_definitions(code) {
                Some(extra) => definitions.extend(extra),
                None => debug!(state = code, "no state-specific court holidays known"),
            }
        }

        let id = jurisdiction.id();
        let mut calendar = Self {
            jurisdiction: jurisdiction.clone(),
            first_year,
            last_year,
            holidays: BTreeMap::new(),
        };

        for year in (first_year - 1)..=(last_year + 1) {
            for def in &definitions {
                let holiday = def.observe(year, &id)?;
                if calendar.covers(&holiday.date) {
                    calendar.insert(holiday);
                }
            }
        }

        for holiday in custom {
            if calendar.covers(&holiday.date) {
                calendar.insert(holiday.clone());
            } else {
                debug!(
                    date = %holiday.date,
                    name = %holiday.name,
                    "custom holiday outside calendar span"
                );
            }
        }

        debug!(
            jurisdiction = %id,
            first_year,
            last_year,
            holidays = calendar.len(),
            "generated holiday calendar"
        );
        Ok(calendar)
    }

    /// The span of years a calculation from `trigger` over `days` (plus up to
    /// `extra_days` of service extension) can touch.
    ///
    /// Open-day counting never needs more than two calendar days per counted
    /// day; a fixed slack covers the final roll-forward.
    pub fn span_for(trigger: NaiveDate, days: i32, extra_days: u32) -> RangeInclusive<i32> {
        let reach = i64::from(days.unsigned_abs()) * 2 + i64::from(extra_days) + 14;
        let start = trigger
            .checked_sub_signed(Duration::days(reach))
            .map_or(MIN_YEAR, |d| d.year());
        let end = trigger
            .checked_add_signed(Duration::days(reach))
            .map_or(MAX_YEAR, |d| d.year());
        start.max(MIN_YEAR)..=end.min(MAX_YEAR)
    }

    fn insert(&mut self, holiday: Holiday) {
        self.holidays.entry(holiday.date).or_default().push(holiday);
    }

    pub fn jurisdiction(&self) -> &Jurisdiction {
        &self.jurisdiction
    }

    /// Number of holidays, counting every entry on shared dates.
    pub fn len(&self) -> usize {
        self.holidays.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    /// Every holiday in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = &Holiday> {
        self.holidays.values().flatten()
    }

    /// Every holiday in ascending date order.
    pub fn list_all(&self) -> Vec<Holiday> {
        self.iter().cloned().collect()
    }

    /// Holidays observed in one month.
    pub fn list_month(&self, year: i32, month: u32) -> Vec<Holiday> {
        self.iter()
            .filter(|h| h.date.year() == year && h.date.month() == month)
            .cloned()
            .collect()
    }

    /// Render a month grid: open days as numbers, weekends as `.`, holidays as `*`.
    pub fn render_month(&self, year: i32, month: u32) -> Result<String, DeadlineError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            DeadlineError::InvalidDate(format!("no month {year:04}-{month:02}"))
        })?;
        let title = first.format("%B %Y").to_string();
        let mut output = format!("{title:^20}\n");
        output += "Su Mo Tu We Th Fr Sa\n";

        let lead = first.weekday().num_days_from_sunday() as usize;
        let mut cells: Vec<String> = vec!["  ".to_string(); lead];
        let mut date = first;
        while date.month() == month {
            let cell = if self.is_holiday(&date) {
                " *".to_string()
            } else if self.is_weekend(&date) {
                " .".to_string()
            } else {
                format!("{:>2}", date.day())
            };
            cells.push(cell);
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }

        for row in cells.chunks(7) {
            output += &row.join(" ");
            output += "\n";
        }
        Ok(output)
    }
}

impl AsRef<HolidayCalendar> for HolidayCalendar {
    fn as_ref(&self) -> &HolidayCalendar {
        self
    }
}

impl ClosedDays for HolidayCalendar {
    fn is_holiday(&self, date: &NaiveDate) -> bool {
        self.holidays.contains_key(date)
    }

    fn get_holiday(&self, date: &NaiveDate) -> Option<&Holiday> {
        self.holidays.get(date).and_then(|v| v.first())
    }

    fn covers(&self, date: &NaiveDate) -> bool {
        (self.first_year..=self.last_year).contains(&date.year())
    }

    fn years(&self) -> RangeInclusive<i32> {
        self.first_year..=self.last_year
    }
}
