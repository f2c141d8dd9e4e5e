//! Text and JSON rendering of command results.

use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;

use deadline_engine::{CalculationResult, Holiday, Jurisdiction};

use crate::cli::Format;

/// Print `value` as pretty JSON, or `text()` otherwise.
pub fn emit<T: Serialize>(format: Format, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(value)?),
        Format::Text => print!("{}", text()),
    }
    Ok(())
}

pub fn calculation_text(result: &CalculationResult, jurisdiction: &Jurisdiction) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Deadline:     {} ({})",
        result.deadline_date,
        result.deadline_date.format("%A")
    );
    let _ = writeln!(
        out,
        "Trigger:      {}, {} {} days, {}",
        result.trigger_date,
        result.base_days,
        result.counting_method,
        jurisdiction.id()
    );
    let _ = writeln!(
        out,
        "Service:      {} +{} days ({})",
        result.service_method, result.service_days_added, result.service_citation
    );
    let _ = writeln!(
        out,
        "Skipped:      {} weekend days, {} holidays",
        result.weekends_skipped, result.holidays_skipped
    );
    if let Some(adjustment) = &result.final_adjustment {
        let _ = writeln!(out, "Adjustment:   {adjustment}");
    }
    out.push('\n');
    out.push_str(&result.audit_text());
    out.push('\n');
    out
}

pub fn holidays_text(holidays: &[Holiday]) -> String {
    let mut out = String::new();
    for h in holidays {
        let _ = write!(out, "{}  {:<9}  {}", h.date, h.date.format("%A").to_string(), h.name);
        if let Some(actual) = h.observed_from {
            let _ = write!(out, " [actual {actual}]");
        }
        out.push('\n');
    }
    out
}
