//! Holiday definitions and the date rules that generate them.
//!
//! Every recurring holiday is described by a [`HolidayRule`], a closed tagged
//! union evaluated per year. Only [`HolidayRule::Fixed`] holidays are subject to
//! the weekend observance shift; weekday-defined rules already land on a
//! weekday.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::DeadlineError;

/// Category of a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HolidayKind {
    Federal,
    State,
    Court,
    Judicial,
}

/// A concrete closed day in a holiday calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    /// The date the holiday is observed (courts are closed).
    pub date: NaiveDate,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HolidayKind,
    /// Jurisdiction identifier, e.g. `"FEDERAL"` or `"STATE-FL"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    /// The actual calendar date when the observance was shifted off a weekend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_from: Option<NaiveDate>,
}

impl Holiday {
    /// A one-off closure, typically supplied by court administration.
    pub fn custom(date: NaiveDate, name: &str, kind: HolidayKind) -> Self {
        Self {
            date,
            name: name.to_string(),
            kind,
            jurisdiction: None,
            observed_from: None,
        }
    }
}

/// How a recurring holiday's date is found in a given year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HolidayRule {
    /// Same month and day every year; shifted off weekends when observed.
    Fixed { month: u32, day: u32 },
    /// The `nth` (1-based) occurrence of `weekday` in `month`.
    NthWeekday { month: u32, weekday: Weekday, nth: u8 },
    /// The final occurrence of `weekday` in `month`.
    LastWeekday { month: u32, weekday: Weekday },
    /// The first `weekday` strictly after the month's first `after` weekday
    /// (Election Day: the Tuesday after the first Monday of November).
    FirstWeekdayAfter {
        month: u32,
        weekday: Weekday,
        after: Weekday,
    },
    /// A fixed number of days after another rule's date.
    DaysAfter { base: Box<HolidayRule>, days: u32 },
}

impl HolidayRule {
    /// Evaluate the rule for `year`, returning the actual (unshifted) date.
    pub fn date_in(&self, year: i32) -> Result<NaiveDate, DeadlineError> {
        match self {
            Self::Fixed { month, day } => NaiveDate::from_ymd_opt(year, *month, *day)
                .ok_or_else(|| {
                    DeadlineError::InvalidHolidayRule(format!(
                        "no date {year:04}-{month:02}-{day:02}"
                    ))
                }),
            Self::NthWeekday {
                month,
                weekday,
                nth,
            } => nth_weekday_of_month(year, *month, *weekday, *nth).ok_or_else(|| {
                DeadlineError::InvalidHolidayRule(format!(
                    "no occurrence {nth} of {weekday} in {year:04}-{month:02}"
                ))
            }),
            Self::LastWeekday { month, weekday } => last_weekday_of_month(year, *month, *weekday)
                .ok_or_else(|| {
                    DeadlineError::InvalidHolidayRule(format!("invalid month {month} in {year}"))
                }),
            Self::FirstWeekdayAfter {
                month,
                weekday,
                after,
            } => {
                let anchor = nth_weekday_of_month(year, *month, *after, 1).ok_or_else(|| {
                    DeadlineError::InvalidHolidayRule(format!("invalid month {month} in {year}"))
                })?;
                Ok(next_weekday_after(anchor, *weekday))
            }
            Self::DaysAfter { base, days } => {
                let base_date = base.date_in(year)?;
                base_date
                    .checked_add_signed(Duration::days(i64::from(*days)))
                    .ok_or_else(|| {
                        DeadlineError::DateOverflow(format!("{base_date} + {days} days"))
                    })
            }
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed { .. })
    }
}

/// A named recurring holiday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayDefinition {
    pub name: String,
    pub kind: HolidayKind,
    pub rule: HolidayRule,
}

impl HolidayDefinition {
    pub fn new(name: &str, kind: HolidayKind, rule: HolidayRule) -> Self {
        Self {
            name: name.to_string(),
            kind,
            rule,
        }
    }

    /// The holiday as observed in `year`, shifted off the weekend for fixed rules.
    pub fn observe(&self, year: i32, jurisdiction: &str) -> Result<Holiday, DeadlineError> {
        let actual = self.rule.date_in(year)?;
        let date = if self.rule.is_fixed() {
            observed_date(actual)
        } else {
            actual
        };
        let (name, observed_from) = if date == actual {
            (self.name.clone(), None)
        } else {
            (format!("{} (Observed)", self.name), Some(actual))
        };
        Ok(Holiday {
            date,
            name,
            kind: self.kind,
            jurisdiction: Some(jurisdiction.to_string()),
            observed_from,
        })
    }
}

/// Saturday holidays are observed the preceding Friday, Sunday holidays the following Monday.
pub fn observed_date(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

/// Find the `nth` occurrence of `weekday` in a month, counting from the first.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, nth: u8) -> Option<NaiveDate> {
    if nth == 0 {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let diff = (weekday.num_days_from_monday() + 7 - first.weekday().num_days_from_monday()) % 7;
    let first_occurrence = first + Duration::days(i64::from(diff));
    let target = first_occurrence + Duration::weeks(i64::from(nth) - 1);
    // A fifth occurrence may spill into the next month.
    (target.month() == month).then_some(target)
}

/// Find the last occurrence of `weekday` in a month, working back from its final day.
pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()?;
    let diff = (last.weekday().num_days_from_monday() + 7 - weekday.num_days_from_monday()) % 7;
    Some(last - Duration::days(i64::from(diff)))
}

fn next_weekday_after(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let diff = (weekday.num_days_from_monday() + 7 - date.weekday().num_days_from_monday()) % 7;
    let diff = if diff == 0 { 7 } else { diff };
    date + Duration::days(i64::from(diff))
}

// ── Built-in definitions ────────────────────────────────────────────────────

/// The standard court holidays, labelled with `kind`.
pub fn standard_definitions(kind: HolidayKind, election_day: bool) -> Vec<HolidayDefinition> {
    use HolidayRule::*;

    let mut defs = vec![
        HolidayDefinition::new("New Year's Day", kind, Fixed { month: 1, day: 1 }),
        HolidayDefinition::new(
            "Martin Luther King Jr. Day",
            kind,
            NthWeekday {
                month: 1,
                weekday: Weekday::Mon,
                nth: 3,
            },
        ),
        HolidayDefinition::new(
            "Presidents' Day",
            kind,
            NthWeekday {
                month: 2,
                weekday: Weekday::Mon,
                nth: 3,
            },
        ),
        HolidayDefinition::new(
            "Memorial Day",
            kind,
            LastWeekday {
                month: 5,
                weekday: Weekday::Mon,
            },
        ),
        HolidayDefinition::new("Juneteenth", kind, Fixed { month: 6, day: 19 }),
        HolidayDefinition::new("Independence Day", kind, Fixed { month: 7, day: 4 }),
        HolidayDefinition::new(
            "Labor Day",
            kind,
            NthWeekday {
                month: 9,
                weekday: Weekday::Mon,
                nth: 1,
            },
        ),
        HolidayDefinition::new(
            "Columbus Day",
            kind,
            NthWeekday {
                month: 10,
                weekday: Weekday::Mon,
                nth: 2,
            },
        ),
        HolidayDefinition::new("Veterans Day", kind, Fixed { month: 11, day: 11 }),
        HolidayDefinition::new("Thanksgiving Day", kind, thanksgiving()),
        HolidayDefinition::new("Christmas Day", kind, Fixed { month: 12, day: 25 }),
    ];

    if election_day {
        defs.push(HolidayDefinition::new(
            "Election Day",
            kind,
            FirstWeekdayAfter {
                month: 11,
                weekday: Weekday::Tue,
                after: Weekday::Mon,
            },
        ));
    }

    defs
}

/// Additional court holidays observed by a state's judiciary, if the state is known.
pub fn state_definitions(state_code: &str) -> Option<Vec<HolidayDefinition>> {
    use HolidayRule::*;

    let friday_after_thanksgiving = || {
        HolidayDefinition::new(
            "Friday after Thanksgiving",
            HolidayKind::Judicial,
            DaysAfter {
                base: Box::new(thanksgiving()),
                days: 1,
            },
        )
    };

    match state_code.to_ascii_uppercase().as_str() {
        "FL" => Some(vec![friday_after_thanksgiving()]),
        "CA" => Some(vec![
            HolidayDefinition::new(
                "Lincoln's Birthday",
                HolidayKind::Judicial,
                Fixed { month: 2, day: 12 },
            ),
            HolidayDefinition::new(
                "César Chávez Day",
                HolidayKind::Judicial,
                Fixed { month: 3, day: 31 },
            ),
            friday_after_thanksgiving(),
        ]),
        _ => None,
    }
}

fn thanksgiving() -> HolidayRule {
    HolidayRule::NthWeekday {
        month: 11,
        weekday: Weekday::Thu,
        nth: 4,
    }
}
