use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use deadline_engine::{CountingMethod, ServiceMethod};

/// Court deadline calculator.
#[derive(Parser)]
#[command(
    name = "deadline",
    version,
    about = "Compute court deadlines with a step-by-step audit trail"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute a deadline from a trigger date and a day offset.
    Calculate(CalculateArgs),
    /// Compute the deadline a JSON rule record defines.
    Rule(RuleArgs),
    /// List the holidays of a jurisdiction.
    Holidays(HolidaysArgs),
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Jurisdiction selection shared by every subcommand. Flags override `[jurisdiction]`.
#[derive(clap::Args, Debug, Default)]
pub struct JurisdictionArgs {
    /// Court system: federal or state.
    #[arg(long)]
    pub level: Option<String>,

    /// Two-letter state code; implies `--level state`.
    #[arg(long)]
    pub state: Option<String>,

    /// IANA timezone used to read timestamped trigger dates.
    #[arg(long)]
    pub timezone: Option<String>,

    /// Treat Election Day as a court holiday.
    #[arg(long)]
    pub election_day: bool,
}

/// Arguments for the `calculate` subcommand.
#[derive(clap::Args)]
pub struct CalculateArgs {
    /// Trigger date (YYYY-MM-DD) or RFC 3339 timestamp.
    #[arg(short, long)]
    pub trigger: String,

    /// Day offset; negative counts backward.
    #[arg(short, long, allow_negative_numbers = true)]
    pub days: i32,

    /// Counting method: calendar, business, court or retrograde.
    #[arg(short, long, default_value = "calendar")]
    pub method: CountingMethod,

    /// Service method, e.g. personal, electronic, mail.
    #[arg(short, long, default_value = "personal")]
    pub service: ServiceMethod,

    #[command(flatten)]
    pub jurisdiction: JurisdictionArgs,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

/// Arguments for the `rule` subcommand.
#[derive(clap::Args)]
pub struct RuleArgs {
    /// Trigger date (YYYY-MM-DD) or RFC 3339 timestamp.
    #[arg(short, long)]
    pub trigger: String,

    /// Path to a JSON rule record.
    #[arg(short, long)]
    pub rule: PathBuf,

    /// Service method; ignored by rules that are not service-dependent.
    #[arg(short, long, default_value = "personal")]
    pub service: ServiceMethod,

    #[command(flatten)]
    pub jurisdiction: JurisdictionArgs,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

/// Arguments for the `holidays` subcommand.
#[derive(clap::Args)]
pub struct HolidaysArgs {
    /// Calendar year.
    #[arg(short, long)]
    pub year: i32,

    /// Restrict to one month (1-12) and print its grid.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    #[command(flatten)]
    pub jurisdiction: JurisdictionArgs,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}
