//! TOML-based configuration for querydeck.
//!
//! Supports a config file (querydeck.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [connections.dev]
//! driver = "sqlite"
//! target = "${HOME}/data/dev.db"
//!
//! [connections.warehouse]
//! driver = "postgres"
//! target = "${WAREHOUSE_URL}"
//!
//! [worker]
//! path = "./querydeck-worker"
//! timeout_secs = 60
//!
//! [builder]
//! default_limit = 500
//!
//! [logging]
//! filter = "querydeck=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{clamp_limit, DEFAULT_LIMIT};
use crate::worker::DEFAULT_TIMEOUT_SECS;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Named connection targets.
    pub connections: BTreeMap<String, ConnectionSettings>,

    /// Worker configuration.
    pub worker: WorkerSettings,

    /// Report builder defaults.
    pub builder: BuilderSettings,

    /// Log output configuration.
    pub logging: LoggingSettings,
}

/// One named connection target.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionSettings {
    /// Driver name passed to the worker.
    pub driver: String,

    /// Connection target (supports ${ENV_VAR} expansion).
    pub target: String,
}

impl ConnectionSettings {
    /// Get the target with environment variables expanded.
    pub fn resolved_target(&self) -> Result<String, SettingsError> {
        expand_env_vars(&self.target)
    }
}

/// Worker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerSettings {
    /// Path to the worker binary (supports ${ENV_VAR} expansion).
    pub path: Option<String>,

    /// Extra command-line arguments for the worker.
    pub args: Vec<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            path: None,
            args: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl WorkerSettings {
    /// Locate the worker binary.
    ///
    /// Uses the configured path when set, then searches common locations
    /// and finally `PATH`. A configured path that fails env-var expansion is
    /// an error, not a miss.
    pub fn resolve_path(&self) -> Result<Option<PathBuf>, SettingsError> {
        if let Some(path) = &self.path {
            let expanded = expand_env_vars(path)?;
            return Ok(Some(PathBuf::from(expanded)));
        }

        let candidates = [
            "querydeck-worker",
            "./querydeck-worker",
            "./worker/querydeck-worker",
        ];

        for candidate in candidates {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Ok(output) = std::process::Command::new("which")
            .arg("querydeck-worker")
            .output()
        {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path.is_empty() {
                    return Ok(Some(PathBuf::from(path)));
                }
            }
        }

        Ok(None)
    }
}

/// Report builder defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BuilderSettings {
    /// Row limit new builders start with; clamped into `[1, 1_000_000]`.
    pub default_limit: u32,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl BuilderSettings {
    pub fn effective_limit(&self) -> u32 {
        clamp_limit(self.default_limit)
    }
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `QUERYDECK_CONFIG`
    /// 2. `./querydeck.toml`
    /// 3. `~/.config/querydeck/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("QUERYDECK_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("querydeck.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("querydeck").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Get a connection by name.
    pub fn get_connection(&self, name: &str) -> Result<&ConnectionSettings, SettingsError> {
        self.connections
            .get(name)
            .ok_or_else(|| SettingsError::ConnectionNotFound(name.to_string()))
    }

    /// Get the default connection ("default" if defined, else the first by name).
    pub fn default_connection(&self) -> Option<(&str, &ConnectionSettings)> {
        if let Some(conn) = self.connections.get("default") {
            return Some(("default", conn));
        }
        self.connections.iter().next().map(|(k, v)| (k.as_str(), v))
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.peek() == Some(&'{') {
            chars.next();
            let mut name = String::new();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                name.push(ch);
            }
            name
        } else {
            let mut name = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    name.push(ch);
                    chars.next();
                } else {
                    break;
                }
            }
            if name.is_empty() {
                // A lone `$` is kept as-is.
                result.push('$');
                continue;
            }
            name
        };

        let value = env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name))?;
        result.push_str(&value);
    }

    Ok(result)
}
