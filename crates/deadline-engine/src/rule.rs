//! Declarative rule records and their mapping onto the calculator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculator::{CalculationResult, CountingMethod, DeadlineCalculator};
use crate::calendar::{ClosedDays, HolidayCalendar};
use crate::error::DeadlineError;
use crate::service::ServiceMethod;

/// A deadline rule expressed as flags rather than code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleLogic {
    /// Signed offset from the trigger; negative means "before the event".
    pub base_days: i32,
    #[serde(default = "default_counting_method")]
    pub counting_method: CountingMethod,
    #[serde(default = "default_true")]
    pub include_weekends: bool,
    #[serde(default)]
    pub exclude_holidays: bool,
    /// Tag of the event the rule is measured from, e.g. `"SERVICE_OF_COMPLAINT"`.
    #[serde(default)]
    pub trigger_event: String,
    #[serde(default)]
    pub service_method_applies: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
}

fn default_counting_method() -> CountingMethod {
    CountingMethod::Calendar
}

fn default_true() -> bool {
    true
}

impl RuleLogic {
    /// A plain calendar-day rule.
    pub fn calendar_days(base_days: i32, trigger_event: &str) -> Self {
        Self {
            base_days,
            counting_method: CountingMethod::Calendar,
            include_weekends: true,
            exclude_holidays: false,
            trigger_event: trigger_event.to_string(),
            service_method_applies: false,
            name: None,
            citation: None,
        }
    }

    fn audit_note(&self) -> String {
        let mut note = String::from("Rule");
        if let Some(name) = &self.name {
            note.push(' ');
            note.push_str(name);
        }
        if let Some(citation) = &self.citation {
            note.push_str(&format!(" ({citation})"));
        }
        if !self.trigger_event.is_empty() {
            note.push_str(&format!(" from {}", self.trigger_event));
        }
        note
    }
}

/// Maps [`RuleLogic`] records onto a [`DeadlineCalculator`].
#[derive(Debug, Clone)]
pub struct RuleResolver<C = HolidayCalendar> {
    calculator: DeadlineCalculator<C>,
}

impl<C: ClosedDays> From<DeadlineCalculator<C>> for RuleResolver<C> {
    fn from(calculator: DeadlineCalculator<C>) -> Self {
        Self::new(calculator)
    }
}

impl<C: ClosedDays> RuleResolver<C> {
    pub fn new(calculator: DeadlineCalculator<C>) -> Self {
        Self { calculator }
    }

    pub fn calculator(&self) -> &DeadlineCalculator<C> {
        &self.calculator
    }

    /// Pick the counting method for a rule.
    ///
    /// Precedence: an explicit RETROGRADE method or a negative offset wins;
    /// then excluding holidays or weekends selects BUSINESS; otherwise CALENDAR.
    pub fn resolve_method(rule: &RuleLogic) -> CountingMethod {
        if rule.counting_method == CountingMethod::Retrograde || rule.base_days < 0 {
            CountingMethod::Retrograde
        } else if rule.exclude_holidays || !rule.include_weekends {
            CountingMethod::Business
        } else {
            CountingMethod::Calendar
        }
    }

    /// The service method actually forwarded: service-agnostic rules are never extended.
    pub fn effective_service(rule: &RuleLogic, service: ServiceMethod) -> ServiceMethod {
        if rule.service_method_applies {
            service
        } else {
            ServiceMethod::NotServed
        }
    }

    /// Compute the deadline a rule defines for `trigger`.
    pub fn calculate_from_rule(
        &self,
        trigger: NaiveDate,
        rule: &RuleLogic,
        service: ServiceMethod,
    ) -> Result<CalculationResult, DeadlineError> {
        let method = Self::resolve_method(rule);
        let service = Self::effective_service(rule, service);
        debug!(
            base_days = rule.base_days,
            declared = %rule.counting_method,
            resolved = %method,
            %service,
            "resolved rule"
        );
        let note = rule.audit_note();
        self.calculator
            .calculate_with_note(trigger, rule.base_days, method, service, Some(&note))
    }
}
