use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix, e.g. `BOUNTY_WIZARD__LOGGING__LEVEL=debug`
pub const ENV_PREFIX: &str = "BOUNTY_WIZARD";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logo: LogoConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,

    /// Directory for log files; unset means the platform data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
            dir: None,
        }
    }
}

/// Simulated submission timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Delay before the payload is compiled (default: 1500)
    #[serde(default = "default_submission_delay")]
    pub delay_ms: u64,
    /// How long the confirmation view stays up (default: 2000)
    #[serde(default = "default_redirect_delay")]
    pub redirect_ms: u64,
}

fn default_submission_delay() -> u64 {
    1500
}

fn default_redirect_delay() -> u64 {
    2000
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_submission_delay(),
            redirect_ms: default_redirect_delay(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval of the TUI loop
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

fn default_tick_rate() -> u64 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoConfig {
    /// Largest backer logo accepted, in bytes (default: 2 MiB)
    #[serde(default = "default_logo_max_bytes")]
    pub max_bytes: u64,
}

fn default_logo_max_bytes() -> u64 {
    2 * 1024 * 1024
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_logo_max_bytes(),
        }
    }
}

impl Config {
    /// User config in ~/.config/bounty-wizard/
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bounty-wizard").join("config.toml"))
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::user_config_path(), config_path)
    }

    fn load_from(user_config: Option<PathBuf>, config_path: Option<&str>) -> Result<Self> {
        // Embedded defaults so the wizard works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        if let Some(user_config) = user_config.filter(|path| path.exists()) {
            builder = builder.add_source(config::File::from(user_config));
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        match &self.logging.dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => std::env::current_dir().unwrap_or_default().join(dir),
            None => dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("bounty-wizard")
                .join("logs"),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }
}
