use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use jsonschema::{JSONSchema, ValidationError};
use serde::Deserialize;
use serde_json::Value;

const EMBEDDED_SCHEMA: &str = include_str!("../allotment.schema.json");
const DEFAULT_CONFIG_FILE: &str = "allotment.jsonc";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Each invocation evaluates one document, so logs go to stderr by default
/// and a JSON log file is opt-in.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives for the log file.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default = "default_true")]
    pub stderr_warn_enabled: bool,
    #[serde(default)]
    pub file: Option<LogFileConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            stderr_warn_enabled: true,
            file: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LogFileConfig {
    pub dir: PathBuf,
    #[serde(default)]
    pub rotation: LogRotation,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogRotation {
    /// Append every run to one file.
    #[default]
    Never,
    Daily,
    Hourly,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Loads `explicit` when given, else `./allotment.jsonc` when present,
    /// else the built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            return Self::load(fallback);
        }

        Ok(Self::default())
    }

    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config_value: Value = json5::from_str(&config_content)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;

        let config_base = config_path.parent().unwrap_or_else(|| Path::new("."));
        let schema = load_schema(config_base, &config_value)?;
        validate_against_schema(&config_value, &schema)?;

        let mut config: Config =
            serde_json::from_value(config_value).context("failed to deserialize config")?;

        if let Some(file) = config.logging.file.as_mut()
            && !file.dir.is_absolute()
        {
            file.dir = config_base.join(&file.dir);
        }

        Ok(config)
    }
}

fn load_schema(config_base: &Path, config_value: &Value) -> Result<Value> {
    let Some(path_text) = config_value.get("$schema").and_then(|value| value.as_str()) else {
        return serde_json::from_str(EMBEDDED_SCHEMA).context("failed to parse embedded schema");
    };

    let configured = PathBuf::from(path_text);
    let schema_path = if configured.is_absolute() {
        configured
    } else {
        config_base.join(configured)
    };

    let schema_content = fs::read_to_string(&schema_path)
        .with_context(|| format!("failed to read schema {}", schema_path.display()))?;
    serde_json::from_str(&schema_content)
        .with_context(|| format!("failed to parse schema {}", schema_path.display()))
}

fn validate_against_schema(config_value: &Value, schema: &Value) -> Result<()> {
    let compiled =
        JSONSchema::compile(schema).map_err(|e| anyhow!("failed to compile schema: {e}"))?;

    match compiled.validate(config_value) {
        Ok(()) => Ok(()),
        Err(errors_iter) => {
            let validation_errors: Vec<ValidationError> = errors_iter.collect();
            let messages: Vec<String> = validation_errors
                .into_iter()
                .map(|error| error.to_string())
                .collect();
            Err(anyhow!("config validation failed: {}", messages.join("; ")))
        }
    }
}
