use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};

use deadline_engine::calendar::{MAX_YEAR, MIN_YEAR};
use deadline_engine::{
    DeadlineCalculator, DeadlineError, Holiday, HolidayCalendar, HolidayKind, Jurisdiction,
    JurisdictionLevel, ServiceMethodTable,
};

use crate::cli::JurisdictionArgs;

/// Top-level configuration file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DeadlineConfig {
    /// Default jurisdiction; CLI flags override it.
    #[serde(default)]
    pub jurisdiction: JurisdictionToml,

    /// Additional closures (weather, court administration orders).
    #[serde(default)]
    pub holidays: Vec<HolidayToml>,

    /// Replaces the built-in service-method table when present.
    #[serde(default)]
    pub service_table: Option<ServiceMethodTable>,

    /// Calendar generation settings.
    #[serde(default)]
    pub calendar: CalendarToml,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct JurisdictionToml {
    pub level: Option<String>,
    pub state: Option<String>,
    pub timezone: Option<String>,
    #[serde(default)]
    pub election_day: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HolidayToml {
    /// Quoted `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: HolidayKind,
}

fn default_kind() -> HolidayKind {
    HolidayKind::Court
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarToml {
    /// Extra years generated on each side of the span a calculation needs.
    #[serde(default = "default_padding_years")]
    pub padding_years: u32,
}

impl Default for CalendarToml {
    fn default() -> Self {
        Self {
            padding_years: default_padding_years(),
        }
    }
}

fn default_padding_years() -> u32 {
    1
}

impl DeadlineConfig {
    /// Read the config file, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&toml_str).context("failed to parse TOML config")?;
        info!(
            path = %path.display(),
            custom_holidays = config.holidays.len(),
            custom_service_table = config.service_table.is_some(),
            "loaded config"
        );
        Ok(config)
    }

    /// Merge `[jurisdiction]` with the command-line flags.
    pub fn jurisdiction(&self, args: &JurisdictionArgs) -> Result<Jurisdiction> {
        let state = args.state.as_deref().or(self.jurisdiction.state.as_deref());
        let level = match args.level.as_deref().or(self.jurisdiction.level.as_deref()) {
            Some(level) => level.parse::<JurisdictionLevel>()?,
            None if state.is_some() => JurisdictionLevel::State,
            None => JurisdictionLevel::Federal,
        };

        let jurisdiction = match (level, state) {
            (JurisdictionLevel::Federal, state) => {
                if let Some(code) = state {
                    warn!(state = code, "state code ignored at federal level");
                }
                Jurisdiction::federal()
            }
            (JurisdictionLevel::State, Some(code)) => Jurisdiction::state(code),
            (JurisdictionLevel::State, None) => {
                bail!("state level requires a state code (--state or [jurisdiction].state)")
            }
        };

        let timezone = args
            .timezone
            .as_deref()
            .or(self.jurisdiction.timezone.as_deref());
        let jurisdiction = match timezone {
            Some(tz) => jurisdiction.with_timezone(tz),
            None => jurisdiction,
        }
        .with_election_day(args.election_day || self.jurisdiction.election_day);

        jurisdiction.tz()?;
        Ok(jurisdiction)
    }

    pub fn custom_holidays(&self) -> Vec<Holiday> {
        self.holidays
            .iter()
            .map(|h| Holiday::custom(h.date, &h.name, h.kind))
            .collect()
    }

    pub fn service_table(&self) -> ServiceMethodTable {
        self.service_table.clone().unwrap_or_default()
    }

    /// Generate a calendar for `years`, widened by `[calendar].padding_years`.
    ///
    /// The requested years themselves must lie in the supported range;
    /// only the padding is clamped.
    pub fn calendar(
        &self,
        jurisdiction: &Jurisdiction,
        years: RangeInclusive<i32>,
    ) -> Result<HolidayCalendar> {
        if let Some(year) = [*years.start(), *years.end()]
            .into_iter()
            .find(|y| !(MIN_YEAR..=MAX_YEAR).contains(y))
        {
            return Err(DeadlineError::InvalidDate(format!(
                "year {year} is outside {MIN_YEAR}..={MAX_YEAR}"
            ))
            .into());
        }
        let pad = i32::try_from(self.calendar.padding_years).unwrap_or(i32::MAX);
        let first = years.start().saturating_sub(pad).max(MIN_YEAR);
        let last = years.end().saturating_add(pad).min(MAX_YEAR);
        let calendar =
            HolidayCalendar::generate_span(first..=last, jurisdiction, &self.custom_holidays())
                .with_context(|| format!("failed to generate {} calendar", jurisdiction.id()))?;
        Ok(calendar)
    }

    /// A calculator whose calendar covers every date a calculation from
    /// `trigger` over `days` can visit.
    pub fn calculator(
        &self,
        jurisdiction: &Jurisdiction,
        trigger: NaiveDate,
        days: i32,
    ) -> Result<DeadlineCalculator> {
        let table = self.service_table();
        let years = HolidayCalendar::span_for(trigger, days, table.max_additional_days());
        let calendar = self.calendar(jurisdiction, years)?;
        Ok(DeadlineCalculator::for_calendar(calendar).with_table(table))
    }
}
