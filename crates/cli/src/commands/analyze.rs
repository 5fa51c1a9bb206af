use std::sync::Arc;

use glowguide_agent::runtime::{AdviceOutcome, AdviceRuntime};
use glowguide_agent::GeminiClient;
use glowguide_core::advice::links::{affiliate_link, Platform};
use glowguide_core::advice::{derive_report, AdviceReport};
use glowguide_core::config::{AppConfig, LoadOptions};
use glowguide_core::domain::analysis::{AnalysisId, SavedAnalysis};
use glowguide_core::domain::profile::{Gender, HairType, Profile, SkinType};
use glowguide_store::repositories::AnalysisRepository;
use glowguide_store::{connect_with, migrations, SqlAnalysisRepository};

use crate::commands::{init_logging, CommandResult};
use crate::AnalyzeArgs;

pub fn run(args: AnalyzeArgs) -> CommandResult {
    let profile = match build_profile(&args) {
        Ok(profile) => profile,
        Err(message) => return CommandResult::failure("analyze", "invalid_input", message, 2),
    };

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "analyze",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };
    init_logging(&config);

    let report = derive_report(&profile);

    let runtime = match build_advice_runtime(&args, &config) {
        Ok(runtime) => runtime,
        Err(message) => return CommandResult::failure("analyze", "advice_model", message, 3),
    };

    let async_runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "analyze",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = async_runtime.block_on(async {
        let outcome = runtime.advise(&profile, None).await;

        let saved_id = if args.save {
            // clap enforces `--save` requires `--user`
            let user = args.user.clone().unwrap_or_default();
            Some(persist(&config, &profile, &outcome, &user).await?)
        } else {
            None
        };

        Ok::<(AdviceOutcome, Option<AnalysisId>), String>((outcome, saved_id))
    });

    let (outcome, saved_id) = match result {
        Ok(value) => value,
        Err(message) => return CommandResult::failure("analyze", "persistence", message, 4),
    };

    let output = if args.json {
        render_json(&report, &outcome, saved_id.as_ref())
    } else {
        render_human(&profile, &report, &outcome, &config, saved_id.as_ref())
    };

    CommandResult { exit_code: 0, output }
}

fn build_profile(args: &AnalyzeArgs) -> Result<Profile, String> {
    let skin_type: SkinType = args.skin.parse().map_err(|error| format!("{error}"))?;

    let hair_type = match &args.hair {
        Some(value) => Some(value.parse::<HairType>().map_err(|error| format!("{error}"))?),
        None => None,
    };

    let gender = match &args.gender {
        Some(value) => Some(value.parse::<Gender>().map_err(|error| format!("{error}"))?),
        None => None,
    };

    if args.budget.is_sign_negative() || args.budget.is_zero() {
        return Err("budget must be a positive amount".to_string());
    }

    let mut profile = Profile::new(skin_type, args.budget);
    profile.hair_type = hair_type;
    profile.age = args.age;
    profile.weight_kg = args.weight_kg;
    profile.height_cm = args.height_cm;
    profile.known_cause = args.cause.clone();
    profile.gender = gender;
    profile.blood_group = args.blood_group.clone();
    Ok(profile)
}

fn build_advice_runtime(args: &AnalyzeArgs, config: &AppConfig) -> Result<AdviceRuntime, String> {
    if !args.ai {
        return Ok(AdviceRuntime::rule_based());
    }

    match GeminiClient::from_config(&config.gemini) {
        Ok(Some(client)) => Ok(AdviceRuntime::new(Some(Arc::new(client)))),
        Ok(None) => {
            tracing::warn!("--ai requested but gemini.api_key is not set, using rule-based advice");
            Ok(AdviceRuntime::rule_based())
        }
        Err(error) => Err(format!("failed to initialize advice model: {error}")),
    }
}

async fn persist(
    config: &AppConfig,
    profile: &Profile,
    outcome: &AdviceOutcome,
    user: &str,
) -> Result<AnalysisId, String> {
    let pool = connect_with(&config.database)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    migrations::run_pending(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    let record =
        SavedAnalysis::new(user, profile.clone(), outcome.text.clone(), outcome.source);
    let id = record.id.clone();

    let repository = SqlAnalysisRepository::new(pool);
    repository.save(record).await.map_err(|error| format!("failed to save analysis: {error}"))?;

    Ok(id)
}

fn render_json(
    report: &AdviceReport,
    outcome: &AdviceOutcome,
    saved_id: Option<&AnalysisId>,
) -> String {
    let payload = serde_json::json!({
        "report": report,
        "advice": {
            "text": outcome.text,
            "source": outcome.source,
        },
        "saved_analysis_id": saved_id.map(|id| id.to_string()),
    });

    serde_json::to_string_pretty(&payload).unwrap_or_else(|error| {
        format!("{{\"error\":\"report serialization failed: {error}\"}}")
    })
}

fn render_human(
    profile: &Profile,
    report: &AdviceReport,
    outcome: &AdviceOutcome,
    config: &AppConfig,
    saved_id: Option<&AnalysisId>,
) -> String {
    let mut lines = Vec::new();

    lines.push("Your personalized guidance".to_string());
    match report.bmi {
        Some(bmi) => lines.push(format!("BMI: {bmi}")),
        None => lines.push("BMI: —".to_string()),
    }

    lines.push(String::new());
    lines.push(format!("Guidance ({}):", outcome.source.as_str()));
    lines.push(outcome.text.clone());

    lines.push(String::new());
    lines.push("Precautions:".to_string());
    for tip in &report.precautions {
        lines.push(format!("  - {tip}"));
    }

    lines.push(String::new());
    lines.push("Morning routine:".to_string());
    for step in &report.routines.morning {
        lines.push(format!("  - {step}"));
    }
    lines.push("Night routine:".to_string());
    for step in &report.routines.night {
        lines.push(format!("  - {step}"));
    }
    if !report.routines.hair.is_empty() {
        lines.push("Hair care:".to_string());
        for step in &report.routines.hair {
            lines.push(format!("  - {step}"));
        }
    }

    lines.push(String::new());
    lines.push("Nutrition focus (Indian diet):".to_string());
    for row in &report.nutrition {
        lines.push(format!(
            "  - {}: nutrients {}; foods {}",
            row.concern,
            row.nutrients.join(", "),
            row.foods.join(", ")
        ));
    }

    lines.push(String::new());
    lines.push(format!("Product finder (budget ₹{} per item):", profile.budget));
    for item in &report.products {
        lines.push(format!("  - {}", item.label));
        lines.push(format!(
            "      Amazon:   {}",
            affiliate_link(
                Platform::Amazon,
                &item.search_query,
                config.affiliate.amazon_tag.as_deref(),
            )
        ));
        lines.push(format!(
            "      Flipkart: {}",
            affiliate_link(
                Platform::Flipkart,
                &item.search_query,
                config.affiliate.flipkart_tag.as_deref(),
            )
        ));
    }

    if let Some(id) = saved_id {
        lines.push(String::new());
        lines.push(format!("Saved analysis: {id}"));
    }

    lines.join("\n")
}
