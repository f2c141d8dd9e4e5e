//! Holidays command: list a jurisdiction's closed days for a year or month.

use anyhow::Result;
use chrono::Datelike;
use tracing::info_span;

use crate::cli::HolidaysArgs;
use crate::config::DeadlineConfig;
use crate::output;

pub fn run(args: HolidaysArgs, config: &DeadlineConfig) -> Result<()> {
    let _cmd = info_span!("holidays", year = args.year).entered();
    let jurisdiction = config.jurisdiction(&args.jurisdiction)?;
    let calendar = config.calendar(&jurisdiction, args.year..=args.year)?;

    let (holidays, grid) = match args.month {
        Some(month) => (
            calendar.list_month(args.year, month),
            Some(calendar.render_month(args.year, month)?),
        ),
        None => (
            calendar
                .iter()
                .filter(|h| h.date.year() == args.year)
                .cloned()
                .collect(),
            None,
        ),
    };

    output::emit(args.format, &holidays, || {
        let mut text = grid.unwrap_or_default();
        if !text.is_empty() {
            text.push('\n');
        }
        text + &output::holidays_text(&holidays)
    })
}
