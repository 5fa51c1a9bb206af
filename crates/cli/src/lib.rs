pub mod commands;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "glowguide",
    about = "GlowGuide skin & hair advice CLI",
    long_about = "Derive personalized skin/hair guidance, nutrition focus, and budget-tiered \
                  product picks from a profile; optionally consult the generative advice model \
                  and persist results.",
    after_help = "Examples:\n  glowguide analyze --skin oily --age 30 --budget 800\n  glowguide analyze --skin dry --hair dandruff --ai --save --user priya\n  glowguide doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Derive a personalized skin & hair report from profile attributes")]
    Analyze(AnalyzeArgs),
    #[command(about = "List analyses saved for a user, newest first")]
    History(HistoryArgs),
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, advice-model readiness, and DB connectivity checks")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[arg(long, help = "Skin type: oily|dry|combination|sensitive")]
    pub skin: String,
    #[arg(long, help = "Hair type: oily|dry|dandruff|hairfall (enables hair advice)")]
    pub hair: Option<String>,
    #[arg(long)]
    pub age: Option<u32>,
    #[arg(long = "weight-kg", help = "Weight in kilograms")]
    pub weight_kg: Option<f64>,
    #[arg(long = "height-cm", help = "Height in centimetres")]
    pub height_cm: Option<f64>,
    #[arg(long, default_value = "800", help = "Per-item budget")]
    pub budget: Decimal,
    #[arg(long, default_value = "", help = "Known cause, free text (e.g. `hard water, stress`)")]
    pub cause: String,
    #[arg(long, help = "Gender: female|male|other|prefer_not (prompt context only)")]
    pub gender: Option<String>,
    #[arg(long = "blood-group", help = "Blood group (prompt context only)")]
    pub blood_group: Option<String>,
    #[arg(long, help = "Consult the generative advice model when an API key is configured")]
    pub ai: bool,
    #[arg(long, requires = "user", help = "Persist the analysis for --user")]
    pub save: bool,
    #[arg(long, help = "User identity used by --save")]
    pub user: Option<String>,
    #[arg(long, help = "Emit the report as JSON")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[arg(long, help = "User identity to list analyses for")]
    pub user: String,
    #[arg(long, default_value_t = 10)]
    pub limit: u32,
    #[arg(long, help = "Emit machine-readable JSON output")]
    pub json: bool,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Analyze(args) => commands::analyze::run(args),
        Command::History(args) => commands::history::run(args),
        Command::Migrate => commands::migrate::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
