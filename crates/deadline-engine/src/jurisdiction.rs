//! Jurisdiction context shared by the holiday calendar and the service table.

use std::fmt;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::DeadlineError;

/// Default IANA timezone used to decide which calendar day an instant falls on.
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Which court system's rules govern a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JurisdictionLevel {
    #[default]
    Federal,
    State,
}

impl JurisdictionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Federal => "FEDERAL",
            Self::State => "STATE",
        }
    }
}

impl fmt::Display for JurisdictionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JurisdictionLevel {
    type Err = DeadlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "federal" => Ok(Self::Federal),
            "state" => Ok(Self::State),
            _ => Err(DeadlineError::InvalidJurisdiction(format!(
                "unknown jurisdiction level '{}'",
                s.trim()
            ))),
        }
    }
}

/// The full jurisdiction context a holiday calendar is generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jurisdiction {
    /// Federal or state court system.
    #[serde(default)]
    pub level: JurisdictionLevel,
    /// Two-letter state code (e.g., `"FL"`); only meaningful at state level.
    #[serde(default)]
    pub state_code: Option<String>,
    /// IANA timezone of the court, used to normalize timestamped triggers.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Whether Election Day is a court holiday.
    #[serde(default)]
    pub election_day: bool,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl Default for Jurisdiction {
    fn default() -> Self {
        Self::federal()
    }
}

impl Jurisdiction {
    /// Federal courts, Eastern time, no Election Day closure.
    pub fn federal() -> Self {
        Self {
            level: JurisdictionLevel::Federal,
            state_code: None,
            timezone: default_timezone(),
            election_day: false,
        }
    }

    /// State courts of the given state.
    pub fn state(code: &str) -> Self {
        Self {
            level: JurisdictionLevel::State,
            state_code: Some(code.trim().to_ascii_uppercase()),
            timezone: default_timezone(),
            election_day: false,
        }
    }

    pub fn with_timezone(mut self, timezone: &str) -> Self {
        self.timezone = timezone.to_string();
        self
    }

    pub fn with_election_day(mut self, election_day: bool) -> Self {
        self.election_day = election_day;
        self
    }

    /// Stable identifier attached to generated holidays, e.g. `"FEDERAL"` or `"STATE-FL"`.
    pub fn id(&self) -> String {
        match (&self.level, &self.state_code) {
            (JurisdictionLevel::State, Some(code)) => format!("STATE-{code}"),
            (level, _) => level.as_str().to_string(),
        }
    }

    /// Parse the configured IANA timezone.
    pub fn tz(&self) -> Result<Tz, DeadlineError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| DeadlineError::InvalidTimezone(format!("'{}'", self.timezone)))
    }
}
