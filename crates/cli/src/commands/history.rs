use glowguide_core::config::{AppConfig, LoadOptions};
use glowguide_core::domain::analysis::SavedAnalysis;
use glowguide_store::repositories::AnalysisRepository;
use glowguide_store::{connect_with, SqlAnalysisRepository};

use crate::commands::{init_logging, CommandResult};
use crate::HistoryArgs;

pub fn run(args: HistoryArgs) -> CommandResult {
    if args.user.trim().is_empty() {
        return CommandResult::failure("history", "invalid_input", "--user must not be empty", 2);
    }

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "history",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };
    init_logging(&config);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "history",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        let pool = connect_with(&config.database)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        let repository = SqlAnalysisRepository::new(pool);
        repository
            .list_for_user(&args.user, args.limit)
            .await
            .map_err(|error| format!("failed to list analyses: {error}"))
    });

    match result {
        Ok(records) => {
            let output = if args.json {
                serde_json::to_string_pretty(&records).unwrap_or_else(|error| {
                    format!("{{\"error\":\"history serialization failed: {error}\"}}")
                })
            } else {
                render_human(&args.user, &records)
            };
            CommandResult { exit_code: 0, output }
        }
        Err(message) => CommandResult::failure("history", "persistence", message, 4),
    }
}

fn render_human(user: &str, records: &[SavedAnalysis]) -> String {
    if records.is_empty() {
        return format!("no saved analyses for `{user}`");
    }

    let mut lines = vec![format!("saved analyses for `{user}` (newest first):")];
    for record in records {
        let bmi = record.bmi.map(|value| value.to_string()).unwrap_or_else(|| "—".to_string());
        lines.push(format!(
            "- {} | {} | skin {} | bmi {} | {}",
            record.created_at.format("%Y-%m-%d %H:%M UTC"),
            record.id,
            record.profile.skin_type.as_str(),
            bmi,
            record.advice_source.as_str(),
        ));
    }
    lines.join("\n")
}
