//! Calculate command: trigger date + offset + counting method + service method.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use deadline_engine::parse_trigger_in;

use crate::cli::CalculateArgs;
use crate::config::DeadlineConfig;
use crate::output;

pub fn run(args: CalculateArgs, config: &DeadlineConfig) -> Result<()> {
    let _cmd = info_span!("calculate").entered();
    let jurisdiction = config.jurisdiction(&args.jurisdiction)?;
    let trigger = parse_trigger_in(&args.trigger, &jurisdiction)?;

    let calculator = config.calculator(&jurisdiction, trigger, args.days)?;
    let result = calculator
        .calculate(trigger, args.days, args.method, args.service)
        .with_context(|| format!("failed to calculate deadline from {trigger}"))?;
    info!(deadline = %result.deadline_date, jurisdiction = %jurisdiction.id(), "calculated");

    output::emit(args.format, &result, || {
        output::calculation_text(&result, &jurisdiction)
    })
}
