//! Rule command: compute the deadline defined by a JSON rule record.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use deadline_engine::{parse_trigger_in, RuleLogic, RuleResolver};

use crate::cli::RuleArgs;
use crate::config::DeadlineConfig;
use crate::output;

pub fn run(args: RuleArgs, config: &DeadlineConfig) -> Result<()> {
    let _cmd = info_span!("rule").entered();
    let json = std::fs::read_to_string(&args.rule)
        .with_context(|| format!("failed to read rule file: {}", args.rule.display()))?;
    let rule: RuleLogic = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse rule file: {}", args.rule.display()))?;

    let jurisdiction = config.jurisdiction(&args.jurisdiction)?;
    let trigger = parse_trigger_in(&args.trigger, &jurisdiction)?;

    let resolver = RuleResolver::new(config.calculator(&jurisdiction, trigger, rule.base_days)?);
    let result = resolver
        .calculate_from_rule(trigger, &rule, args.service)
        .with_context(|| format!("failed to apply rule to {trigger}"))?;
    info!(
        deadline = %result.deadline_date,
        method = %result.counting_method,
        "rule applied"
    );

    output::emit(args.format, &result, || {
        output::calculation_text(&result, &jurisdiction)
    })
}
