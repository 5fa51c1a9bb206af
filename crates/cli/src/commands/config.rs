use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use glowguide_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let file_path = detect_config_path();
    let file_doc = load_config_file_doc(file_path.as_deref());

    let fields: Vec<(&str, Option<&str>, String)> = vec![
        ("database.url", Some("GLOWGUIDE_DATABASE_URL"), config.database.url.clone()),
        (
            "database.max_connections",
            Some("GLOWGUIDE_DATABASE_MAX_CONNECTIONS"),
            config.database.max_connections.to_string(),
        ),
        (
            "database.timeout_secs",
            Some("GLOWGUIDE_DATABASE_TIMEOUT_SECS"),
            config.database.timeout_secs.to_string(),
        ),
        (
            "gemini.api_key",
            Some("GLOWGUIDE_GEMINI_API_KEY"),
            if config.gemini.api_key.is_some() { "<redacted>" } else { "<unset>" }.to_string(),
        ),
        ("gemini.base_url", Some("GLOWGUIDE_GEMINI_BASE_URL"), config.gemini.base_url.clone()),
        ("gemini.model", Some("GLOWGUIDE_GEMINI_MODEL"), config.gemini.model.clone()),
        (
            "gemini.timeout_secs",
            Some("GLOWGUIDE_GEMINI_TIMEOUT_SECS"),
            config.gemini.timeout_secs.to_string(),
        ),
        (
            "affiliate.amazon_tag",
            Some("GLOWGUIDE_AFFILIATE_AMAZON_TAG"),
            config.affiliate.amazon_tag.clone().unwrap_or_else(|| "<unset>".to_string()),
        ),
        (
            "affiliate.flipkart_tag",
            Some("GLOWGUIDE_AFFILIATE_FLIPKART_TAG"),
            config.affiliate.flipkart_tag.clone().unwrap_or_else(|| "<unset>".to_string()),
        ),
        (
            "ads.client_id",
            Some("GLOWGUIDE_ADS_CLIENT_ID"),
            config.ads.client_id.clone().unwrap_or_else(|| "<unset>".to_string()),
        ),
        ("logging.level", Some("GLOWGUIDE_LOGGING_LEVEL"), config.logging.level.clone()),
        (
            "logging.format",
            Some("GLOWGUIDE_LOGGING_FORMAT"),
            format!("{:?}", config.logging.format).to_lowercase(),
        ),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for (key, env_key, value) in fields {
        let source = field_source(key, env_key, file_doc.as_ref(), file_path.as_deref());
        lines.push(format!("- {key} = {value} (source: {source})"));
    }

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("glowguide.toml"), PathBuf::from("config/glowguide.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: Option<&str>,
    file_doc: Option<&Value>,
    file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_key {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = file_doc {
        if contains_path(doc, key_path) {
            let file_path = file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}
