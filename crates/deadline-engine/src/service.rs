//! Service-method extension days.
//!
//! The table is configuration data, not logic: it can be serialized, replaced
//! wholesale, and versioned independently of the engine. Lookups fail open: a
//! method with no entry adds zero days under the citation `"Unknown"` rather
//! than blocking the deadline computation.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::jurisdiction::JurisdictionLevel;

/// Citation reported when no table entry exists for a method.
pub const UNKNOWN_CITATION: &str = "Unknown";

/// Citation reported for [`ServiceMethod::NotServed`].
pub const NOT_SERVED_CITATION: &str = "No service extension";

/// Means by which the triggering document was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceMethod {
    Personal,
    Electronic,
    FirstClassMail,
    CertifiedMail,
    OvernightCourier,
    LeavingWithClerk,
    /// The rule is service-agnostic; never extended.
    NotServed,
    /// Any method the table has no entry for.
    #[serde(other)]
    Unmapped,
}

impl ServiceMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "PERSONAL",
            Self::Electronic => "ELECTRONIC",
            Self::FirstClassMail => "FIRST_CLASS_MAIL",
            Self::CertifiedMail => "CERTIFIED_MAIL",
            Self::OvernightCourier => "OVERNIGHT_COURIER",
            Self::LeavingWithClerk => "LEAVING_WITH_CLERK",
            Self::NotServed => "NOT_SERVED",
            Self::Unmapped => "UNMAPPED",
        }
    }
}

impl fmt::Display for ServiceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceMethod {
    type Err = Infallible;

    /// Unrecognised tags map to [`ServiceMethod::Unmapped`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Ok(match tag.as_str() {
            "personal" | "hand" | "hand_delivery" => Self::Personal,
            "electronic" | "email" | "e_service" | "efiling" => Self::Electronic,
            "mail" | "first_class_mail" | "us_mail" => Self::FirstClassMail,
            "certified_mail" => Self::CertifiedMail,
            "overnight" | "overnight_courier" | "courier" => Self::OvernightCourier,
            "clerk" | "leaving_with_clerk" => Self::LeavingWithClerk,
            "none" | "not_served" => Self::NotServed,
            _ => Self::Unmapped,
        })
    }
}

/// One row of the service-method table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceMethodRule {
    pub method: ServiceMethod,
    pub additional_days: u32,
    pub citation: String,
    pub level: JurisdictionLevel,
}

impl ServiceMethodRule {
    fn new(level: JurisdictionLevel, method: ServiceMethod, days: u32, citation: &str) -> Self {
        Self {
            method,
            additional_days: days,
            citation: citation.to_string(),
            level,
        }
    }
}

/// Result of a table lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLookup {
    pub additional_days: u32,
    pub citation: String,
}

/// Extension days by (jurisdiction level, service method).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceMethodTable {
    pub version: String,
    pub rules: Vec<ServiceMethodRule>,
}

impl Default for ServiceMethodTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ServiceMethodTable {
    /// The built-in table: FRCP 6(d) for federal courts, Florida rules for state courts.
    pub fn builtin() -> Self {
        use JurisdictionLevel::{Federal, State};
        use ServiceMethod::*;

        const FED_6D: &str = "Fed. R. Civ. P. 6(d)";
        const FLA_2514: &str = "Fla. R. Gen. Prac. & Jud. Admin. 2.514(b)";

        Self {
            version: "2024.1".to_string(),
            rules: vec![
                ServiceMethodRule::new(Federal, Personal, 0, "Fed. R. Civ. P. 5(b)(2)(A)"),
                ServiceMethodRule::new(Federal, Electronic, 0, "Fed. R. Civ. P. 5(b)(2)(E)"),
                ServiceMethodRule::new(Federal, FirstClassMail, 3, FED_6D),
                ServiceMethodRule::new(Federal, CertifiedMail, 3, FED_6D),
                ServiceMethodRule::new(Federal, LeavingWithClerk, 3, FED_6D),
                ServiceMethodRule::new(Federal, OvernightCourier, 3, FED_6D),
                ServiceMethodRule::new(State, Personal, 0, FLA_2514),
                ServiceMethodRule::new(
                    State,
                    Electronic,
                    0,
                    "Fla. R. Gen. Prac. & Jud. Admin. 2.516(b)",
                ),
                ServiceMethodRule::new(State, FirstClassMail, 5, FLA_2514),
                ServiceMethodRule::new(State, CertifiedMail, 5, FLA_2514),
            ],
        }
    }

    /// Extension days and citation for a method. Never fails.
    pub fn lookup(&self, level: JurisdictionLevel, method: ServiceMethod) -> ServiceLookup {
        if method == ServiceMethod::NotServed {
            return ServiceLookup {
                additional_days: 0,
                citation: NOT_SERVED_CITATION.to_string(),
            };
        }
        match self
            .rules
            .iter()
            .find(|r| r.level == level && r.method == method)
        {
            Some(rule) => ServiceLookup {
                additional_days: rule.additional_days,
                citation: rule.citation.clone(),
            },
            None => {
                debug!(%level, %method, version = %self.version, "no service rule; adding 0 days");
                ServiceLookup {
                    additional_days: 0,
                    citation: UNKNOWN_CITATION.to_string(),
                }
            }
        }
    }

    /// The largest extension any rule grants.
    pub fn max_additional_days(&self) -> u32 {
        self.rules
            .iter()
            .map(|r| r.additional_days)
            .max()
            .unwrap_or(0)
    }
}
