//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `GRADER_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `GRADER_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// SQLite database file holding teachers, classes and results. Default: `./results.db`.
    pub database_path: PathBuf,

    /// Directory holding the sentence-embedding model (`config.json`,
    /// `model.safetensors`, `tokenizer.json`). Unset runs the stub embedder.
    pub model_path: Option<PathBuf>,

    /// Idle lifetime of a dashboard login session. Default: one hour.
    pub session_ttl: Duration,

    /// Upper bound on a grading upload request body. Default: 32 MiB.
    pub max_upload_bytes: usize,
}

/// Default database file used when `GRADER_DATABASE_PATH` is not set.
pub const DEFAULT_DATABASE_PATH: &str = "./results.db";

/// Default idle lifetime of a login session.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

/// Default request body limit for grading uploads.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            model_path: None,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "GRADER_PORT";
    const ENV_BIND_ADDR: &'static str = "GRADER_BIND_ADDR";
    const ENV_DATABASE_PATH: &'static str = "GRADER_DATABASE_PATH";
    const ENV_MODEL_PATH: &'static str = "GRADER_MODEL_PATH";
    const ENV_SESSION_TTL_SECS: &'static str = "GRADER_SESSION_TTL_SECS";
    const ENV_MAX_UPLOAD_BYTES: &'static str = "GRADER_MAX_UPLOAD_BYTES";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let database_path =
            Self::parse_path_from_env(Self::ENV_DATABASE_PATH, defaults.database_path);
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let session_ttl = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_SESSION_TTL_SECS,
            defaults.session_ttl.as_secs(),
        ));
        let max_upload_bytes = Self::parse_u64_from_env(
            Self::ENV_MAX_UPLOAD_BYTES,
            defaults.max_upload_bytes as u64,
        ) as usize;

        Ok(Self {
            port,
            bind_addr,
            database_path,
            model_path,
            session_ttl,
            max_upload_bytes,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.is_dir() {
            return Err(ConfigError::NotAFile {
                path: self.database_path.clone(),
            });
        }

        if let Some(parent) = self.database_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            return Err(ConfigError::PathNotFound {
                path: parent.to_path_buf(),
            });
        }

        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if self.session_ttl.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_SESSION_TTL_SECS,
                reason: "session lifetime must be positive".to_string(),
            });
        }

        if self.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MAX_UPLOAD_BYTES,
                reason: "upload limit must be positive".to_string(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
