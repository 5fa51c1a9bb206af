use glowguide_core::config::{AppConfig, LoadOptions};
use glowguide_store::{connect_with, migrations};

use crate::commands::{init_logging, CommandResult};

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "migrate",
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
                "migrate",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        let pool = connect_with(&config.database).await.map_err(|error| {
            ("db_connectivity", format!("failed to connect to database: {error}"), 4u8)
        })?;

        let applied = migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;
        pool.close().await;

        Ok::<usize, (&'static str, String, u8)>(applied)
    });

    match result {
        Ok(0) => CommandResult::success("migrate", "database schema is already up to date"),
        Ok(applied) => {
            tracing::info!(applied, "applied database migrations");
            CommandResult::success("migrate", format!("applied {applied} pending migration(s)"))
        }
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("migrate", error_class, message, exit_code)
        }
    }
}
