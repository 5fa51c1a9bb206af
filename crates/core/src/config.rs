use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub gemini: GeminiConfig,
    pub affiliate: AffiliateConfig,
    pub ads: AdsConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// Absent key disables the generative path; analysis falls back to the
    /// local rule-based advice.
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct AffiliateConfig {
    pub amazon_tag: Option<String>,
    pub flipkart_tag: Option<String>,
}

#[derive(Clone, Debug)]
pub struct AdsConfig {
    pub client_id: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub log_level: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub amazon_tag: Option<String>,
    pub flipkart_tag: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://glowguide.db".to_string(),
                max_connections: 5,
                timeout_secs: 30,
            },
            gemini: GeminiConfig {
                api_key: None,
                base_url: "https://generativelanguage.googleapis.com".to_string(),
                model: "gemini-1.5-flash".to_string(),
                timeout_secs: 30,
            },
            affiliate: AffiliateConfig { amazon_tag: None, flipkart_tag: None },
            ads: AdsConfig { client_id: None },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("glowguide.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(database) = patch.database {
            if let Some(url) = database.url {
                self.database.url = url;
            }
            if let Some(max_connections) = database.max_connections {
                self.database.max_connections = max_connections;
            }
            if let Some(timeout_secs) = database.timeout_secs {
                self.database.timeout_secs = timeout_secs;
            }
        }

        if let Some(gemini) = patch.gemini {
            if let Some(api_key_value) = gemini.api_key {
                self.gemini.api_key = Some(secret_value(api_key_value));
            }
            if let Some(base_url) = gemini.base_url {
                self.gemini.base_url = base_url;
            }
            if let Some(model) = gemini.model {
                self.gemini.model = model;
            }
            if let Some(timeout_secs) = gemini.timeout_secs {
                self.gemini.timeout_secs = timeout_secs;
            }
        }

        if let Some(affiliate) = patch.affiliate {
            if let Some(amazon_tag) = affiliate.amazon_tag {
                self.affiliate.amazon_tag = Some(amazon_tag);
            }
            if let Some(flipkart_tag) = affiliate.flipkart_tag {
                self.affiliate.flipkart_tag = Some(flipkart_tag);
            }
        }

        if let Some(ads) = patch.ads {
            if let Some(client_id) = ads.client_id {
                self.ads.client_id = Some(client_id);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("GLOWGUIDE_DATABASE_URL") {
            self.database.url = value;
        }
        if let Some(value) = read_env("GLOWGUIDE_DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections =
                parse_u32("GLOWGUIDE_DATABASE_MAX_CONNECTIONS", &value)?;
        }
        if let Some(value) = read_env("GLOWGUIDE_DATABASE_TIMEOUT_SECS") {
            self.database.timeout_secs = parse_u64("GLOWGUIDE_DATABASE_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("GLOWGUIDE_GEMINI_API_KEY") {
            self.gemini.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("GLOWGUIDE_GEMINI_BASE_URL") {
            self.gemini.base_url = value;
        }
        if let Some(value) = read_env("GLOWGUIDE_GEMINI_MODEL") {
            self.gemini.model = value;
        }
        if let Some(value) = read_env("GLOWGUIDE_GEMINI_TIMEOUT_SECS") {
            self.gemini.timeout_secs = parse_u64("GLOWGUIDE_GEMINI_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("GLOWGUIDE_AFFILIATE_AMAZON_TAG") {
            self.affiliate.amazon_tag = Some(value);
        }
        if let Some(value) = read_env("GLOWGUIDE_AFFILIATE_FLIPKART_TAG") {
            self.affiliate.flipkart_tag = Some(value);
        }

        if let Some(value) = read_env("GLOWGUIDE_ADS_CLIENT_ID") {
            self.ads.client_id = Some(value);
        }

        let log_level =
            read_env("GLOWGUIDE_LOGGING_LEVEL").or_else(|| read_env("GLOWGUIDE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("GLOWGUIDE_LOGGING_FORMAT").or_else(|| read_env("GLOWGUIDE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(database_url) = overrides.database_url {
            self.database.url = database_url;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(gemini_api_key) = overrides.gemini_api_key {
            self.gemini.api_key = Some(secret_value(gemini_api_key));
        }
        if let Some(gemini_model) = overrides.gemini_model {
            self.gemini.model = gemini_model;
        }
        if let Some(amazon_tag) = overrides.amazon_tag {
            self.affiliate.amazon_tag = Some(amazon_tag);
        }
        if let Some(flipkart_tag) = overrides.flipkart_tag {
            self.affiliate.flipkart_tag = Some(flipkart_tag);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_database(&self.database)?;
        validate_gemini(&self.gemini)?;
        validate_affiliate(&self.affiliate)?;
        validate_ads(&self.ads)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("glowguide.toml"), PathBuf::from("config/glowguide.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_database(database: &DatabaseConfig) -> Result<(), ConfigError> {
    let url = database.url.trim();
    let sqlite_url =
        url.starts_with("sqlite://") || url.starts_with("sqlite::") || url == ":memory:";
    if !sqlite_url {
        return Err(ConfigError::Validation(
            "database.url must be a sqlite URL (`sqlite://...`, `sqlite::...`, or `:memory:`)"
                .to_string(),
        ));
    }

    if database.max_connections == 0 {
        return Err(ConfigError::Validation(
            "database.max_connections must be greater than zero".to_string(),
        ));
    }

    if database.timeout_secs == 0 || database.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "database.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_gemini(gemini: &GeminiConfig) -> Result<(), ConfigError> {
    if gemini.timeout_secs == 0 || gemini.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "gemini.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    let base_url = gemini.base_url.trim();
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "gemini.base_url must start with http:// or https://".to_string(),
        ));
    }

    if gemini.model.trim().is_empty() {
        return Err(ConfigError::Validation("gemini.model must not be empty".to_string()));
    }

    if let Some(api_key) = &gemini.api_key {
        if api_key.expose_secret().trim().is_empty() {
            return Err(ConfigError::Validation(
                "gemini.api_key is set but empty; remove it to use local advice only".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_affiliate(affiliate: &AffiliateConfig) -> Result<(), ConfigError> {
    for (key, tag) in [
        ("affiliate.amazon_tag", &affiliate.amazon_tag),
        ("affiliate.flipkart_tag", &affiliate.flipkart_tag),
    ] {
        if let Some(tag) = tag {
            if tag.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{key} is set but empty; remove it to emit links without a partner id"
                )));
            }
            if tag.contains(char::is_whitespace) {
                return Err(ConfigError::Validation(format!(
                    "{key} must not contain whitespace"
                )));
            }
        }
    }

    Ok(())
}

fn validate_ads(ads: &AdsConfig) -> Result<(), ConfigError> {
    if let Some(client_id) = &ads.client_id {
        if !client_id.trim().starts_with("ca-pub-") {
            return Err(ConfigError::Validation(
                "ads.client_id must start with `ca-pub-` (AdSense publisher id)".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    database: Option<DatabasePatch>,
    gemini: Option<GeminiPatch>,
    affiliate: Option<AffiliatePatch>,
    ads: Option<AdsPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabasePatch {
    url: Option<String>,
    max_connections: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiPatch {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct AffiliatePatch {
    amazon_tag: Option<String>,
    flipkart_tag: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AdsPatch {
    client_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_GEMINI_API_KEY", "key-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("glowguide.toml");
            fs::write(
                &path,
                r#"
[gemini]
api_key = "${TEST_GEMINI_API_KEY}"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            let api_key = config
                .gemini
                .api_key
                .as_ref()
                .ok_or_else(|| "api key should be set".to_string())?;
            ensure(
                api_key.expose_secret() == "key-from-env",
                "api key should be loaded from environment",
            )?;
            Ok(())
        })();

        clear_vars(&["TEST_GEMINI_API_KEY"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("GLOWGUIDE_LOG_LEVEL", "warn");
        env::set_var("GLOWGUIDE_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )?;
            Ok(())
        })();

        clear_vars(&["GLOWGUIDE_LOG_LEVEL", "GLOWGUIDE_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("GLOWGUIDE_DATABASE_URL", "sqlite://from-env.db");
        env::set_var("GLOWGUIDE_AFFILIATE_AMAZON_TAG", "envtag-21");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("glowguide.toml");
            fs::write(
                &path,
                r#"
[database]
url = "sqlite://from-file.db"

[affiliate]
amazon_tag = "filetag-21"

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    database_url: Some("sqlite://from-override.db".to_string()),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.database.url == "sqlite://from-override.db",
                "override database url should win",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(
                config.affiliate.amazon_tag.as_deref() == Some("envtag-21"),
                "env amazon tag should win over file and defaults",
            )?;
            Ok(())
        })();

        clear_vars(&["GLOWGUIDE_DATABASE_URL", "GLOWGUIDE_AFFILIATE_AMAZON_TAG"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("GLOWGUIDE_ADS_CLIENT_ID", "pub-12345");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("ads.client_id")
            );
            ensure(has_message, "validation failure should mention ads.client_id")
        })();

        clear_vars(&["GLOWGUIDE_ADS_CLIENT_ID"]);
        result
    }

    #[test]
    fn secret_values_are_not_leaked_by_debug() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("GLOWGUIDE_GEMINI_API_KEY", "gm-secret-value");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;
            let debug = format!("{config:?}");

            ensure(!debug.contains("gm-secret-value"), "debug output should not contain api key")?;
            ensure(
                matches!(config.logging.format, LogFormat::Compact),
                "default logging format should be compact",
            )?;
            Ok(())
        })();

        clear_vars(&["GLOWGUIDE_GEMINI_API_KEY"]);
        result
    }
}
