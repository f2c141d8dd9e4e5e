//! WASM bindings for deadline-engine.
//!
//! Every function takes and returns JSON strings using the camelCase field
//! names of the library's serde types. Errors surface in JavaScript as
//! exceptions carrying the error text.

use chrono::NaiveDate;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

use deadline_engine::calendar::{MAX_YEAR, MIN_YEAR};
use deadline_engine::{
    parse_trigger_in, CountingMethod, DeadlineCalculator, Holiday, HolidayCalendar, Jurisdiction,
    RuleLogic, RuleResolver, ServiceMethod, ServiceMethodTable,
};

/// Years generated beyond the span a calculation can reach.
const PADDING_YEARS: i32 = 1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalculateRequest {
    trigger_date: String,
    days: i32,
    #[serde(default = "default_counting_method")]
    counting_method: CountingMethod,
    #[serde(default = "default_service_method")]
    service_method: ServiceMethod,
    #[serde(flatten)]
    context: Context,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleRequest {
    trigger_date: String,
    rule: RuleLogic,
    #[serde(default = "default_service_method")]
    service_method: ServiceMethod,
    #[serde(flatten)]
    context: Context,
}

/// Calendar and service-table inputs shared by both request kinds.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Context {
    #[serde(default)]
    jurisdiction: Jurisdiction,
    #[serde(default)]
    custom_holidays: Vec<Holiday>,
    #[serde(default)]
    service_table: Option<ServiceMethodTable>,
}

fn default_counting_method() -> CountingMethod {
    CountingMethod::Calendar
}

fn default_service_method() -> ServiceMethod {
    ServiceMethod::Personal
}

impl Context {
    fn calculator(&self, trigger: NaiveDate, days: i32) -> Result<DeadlineCalculator, String> {
        let table = self.service_table.clone().unwrap_or_default();
        let years = HolidayCalendar::span_for(trigger, days, table.max_additional_days());
        let first = (years.start() - PADDING_YEARS).max(MIN_YEAR);
        let last = (years.end() + PADDING_YEARS).min(MAX_YEAR);
        let calendar =
            HolidayCalendar::generate_span(first..=last, &self.jurisdiction, &self.custom_holidays)
                .map_err(|e| e.to_string())?;
        Ok(DeadlineCalculator::for_calendar(calendar).with_table(table))
    }
}

fn parse<'a, T: Deserialize<'a>>(json: &'a str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {what} JSON: {e}"))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

/// Compute a deadline from a JSON request; returns the result as JSON.
pub fn calculate_deadline_json(request_json: &str) -> Result<String, String> {
    let req: CalculateRequest = parse(request_json, "request")?;
    let trigger =
        parse_trigger_in(&req.trigger_date, &req.context.jurisdiction).map_err(|e| e.to_string())?;
    let result = req
        .context
        .calculator(trigger, req.days)?
        .calculate(trigger, req.days, req.counting_method, req.service_method)
        .map_err(|e| e.to_string())?;
    to_json(&result)
}

/// Compute the deadline a rule record defines; returns the result as JSON.
pub fn calculate_from_rule_json(request_json: &str) -> Result<String, String> {
    let req: RuleRequest = parse(request_json, "request")?;
    let trigger =
        parse_trigger_in(&req.trigger_date, &req.context.jurisdiction).map_err(|e| e.to_string())?;
    let resolver = RuleResolver::new(req.context.calculator(trigger, req.rule.base_days)?);
    let result = resolver
        .calculate_from_rule(trigger, &req.rule, req.service_method)
        .map_err(|e| e.to_string())?;
    to_json(&result)
}

/// Holidays of one year as a JSON array. An empty jurisdiction means federal.
pub fn list_holidays_json(year: i32, jurisdiction_json: &str) -> Result<String, String> {
    let jurisdiction: Jurisdiction = if jurisdiction_json.trim().is_empty() {
        Jurisdiction::federal()
    } else {
        parse(jurisdiction_json, "jurisdiction")?
    };
    let calendar =
        HolidayCalendar::generate(year, &jurisdiction, &[]).map_err(|e| e.to_string())?;
    to_json(&calendar.list_all())
}

#[wasm_bindgen(js_name = "calculateDeadline")]
pub fn calculate_deadline(request_json: &str) -> Result<String, JsValue> {
    calculate_deadline_json(request_json).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = "calculateFromRule")]
pub fn calculate_from_rule(request_json: &str) -> Result<String, JsValue> {
    calculate_from_rule_json(request_json).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = "listHolidays")]
pub fn list_holidays(year: i32, jurisdiction_json: &str) -> Result<String, JsValue> {
    list_holidays_json(year, jurisdiction_json).map_err(|e| JsValue::from_str(&e))
}
