//! Configuration for the persistence service.
//!
//! Store parameters come from the environment (optionally seeded from a
//! dotenv file). Required variables are checked together at startup so a
//! misconfigured deployment fails once, naming everything that is missing.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;
use tracing::debug;

/// SQLite database file.
pub const ENV_DB_PATH: &str = "CATALOG_DB_PATH";
/// Directory where uploaded assets are written.
pub const ENV_ASSET_DIR: &str = "CATALOG_ASSET_DIR";
/// Durability level for writes (`off`, `normal`, `full`, `extra`).
pub const ENV_DB_SYNCHRONOUS: &str = "CATALOG_DB_SYNCHRONOUS";
/// How long a writer waits on a locked database before failing.
pub const ENV_DB_BUSY_TIMEOUT_MS: &str = "CATALOG_DB_BUSY_TIMEOUT_MS";
/// Upper bound on pooled connections.
pub const ENV_DB_MAX_CONNECTIONS: &str = "CATALOG_DB_MAX_CONNECTIONS";

const REQUIRED: [&str; 2] = [ENV_DB_PATH, ENV_ASSET_DIR];

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .vars.join(", "))]
    #[diagnostic(
        code(catalog::config::missing),
        help("Set them in the environment or in a .env file passed with --env-file")
    )]
    Missing { vars: Vec<String> },

    #[error("Invalid value '{value}' for {var}: {reason}")]
    #[diagnostic(code(catalog::config::invalid))]
    Invalid {
        var: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load env file {}", .path.display())]
    #[diagnostic(code(catalog::config::env_file))]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// SQLite `synchronous` level, the store's write-concern knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Synchronous {
    Off,
    Normal,
    #[default]
    Full,
    Extra,
}

impl FromStr for Synchronous {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Synchronous::Off),
            "normal" => Ok(Synchronous::Normal),
            "full" => Ok(Synchronous::Full),
            "extra" => Ok(Synchronous::Extra),
            _ => Err("expected one of off, normal, full, extra".to_string()),
        }
    }
}

/// Connection parameters for the project store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub synchronous: Synchronous,
    pub busy_timeout: Duration,
    pub max_connections: u32,
}

/// Everything the persistence service needs before it can accept requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub store: StoreConfig,
    pub asset_dir: PathBuf,
}

impl BackendConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, treating empty values as unset.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<String> = REQUIRED
            .iter()
            .filter(|key| get(**key).is_none())
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing { vars: missing });
        }

        let db_path = get(ENV_DB_PATH).map(PathBuf::from).unwrap_or_default();
        let asset_dir = get(ENV_ASSET_DIR).map(PathBuf::from).unwrap_or_default();

        let synchronous: Synchronous = parse_optional(get(ENV_DB_SYNCHRONOUS), ENV_DB_SYNCHRONOUS)?
            .unwrap_or_default();
        let busy_timeout_ms: u64 =
            parse_optional(get(ENV_DB_BUSY_TIMEOUT_MS), ENV_DB_BUSY_TIMEOUT_MS)?.unwrap_or(5000);
        let max_connections: u32 =
            parse_optional(get(ENV_DB_MAX_CONNECTIONS), ENV_DB_MAX_CONNECTIONS)?.unwrap_or(5);

        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: ENV_DB_MAX_CONNECTIONS.to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let config = Self {
            store: StoreConfig {
                db_path,
                synchronous,
                busy_timeout: Duration::from_millis(busy_timeout_ms),
                max_connections,
            },
            asset_dir,
        };
        debug!(?config, "Loaded backend configuration");
        Ok(config)
    }
}

fn parse_optional<T>(value: Option<String>, var: &str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                var: var.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// Seed the process environment from a dotenv file.
///
/// An explicit path must exist; without one, `.env` in the working
/// directory is loaded when present. Variables already set win.
pub fn load_env_file(path: Option<&Path>) -> ConfigResult<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).map_err(|source| ConfigError::EnvFile {
                path: path.to_path_buf(),
                source,
            })?;
        }
        None => {
            if let Ok(path) = dotenvy::dotenv() {
                debug!(path = %path.display(), "Loaded .env");
            }
        }
    }
    Ok(())
}
