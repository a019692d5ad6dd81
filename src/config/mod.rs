//! Runtime configuration loaded from TOML with environment overrides.
//!
//! Values come from an optional TOML file; any of the following
//! environment variables then replace the file's value:
//!
//! | Variable                         | Field               |
//! |----------------------------------|---------------------|
//! | `FIELDWATCH_DATABASE_URL`        | `database_url`      |
//! | `FIELDWATCH_STORAGE_ROOT`        | `storage_root`      |
//! | `FIELDWATCH_PUBLIC_URL`          | `public_url`        |
//! | `FIELDWATCH_SESSION_TTL_HOURS`   | `session_ttl_hours` |
//! | `FIELDWATCH_SESSION_DIR`         | `session_dir`       |

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding [`FieldwatchConfig::database_url`].
pub const DATABASE_URL_VAR: &str = "FIELDWATCH_DATABASE_URL";
/// Environment variable overriding [`FieldwatchConfig::storage_root`].
pub const STORAGE_ROOT_VAR: &str = "FIELDWATCH_STORAGE_ROOT";
/// Environment variable overriding [`FieldwatchConfig::public_url`].
pub const PUBLIC_URL_VAR: &str = "FIELDWATCH_PUBLIC_URL";
/// Environment variable overriding [`FieldwatchConfig::session_ttl_hours`].
pub const SESSION_TTL_HOURS_VAR: &str = "FIELDWATCH_SESSION_TTL_HOURS";
/// Environment variable overriding [`FieldwatchConfig::session_dir`].
pub const SESSION_DIR_VAR: &str = "FIELDWATCH_SESSION_DIR";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        /// File that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override could not be parsed.
    #[error("invalid value for {key}: {value}")]
    InvalidOverride {
        /// Variable name.
        key: &'static str,
        /// Rejected value.
        value: String,
    },

    /// A required setting is absent.
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldwatchConfig {
    /// `PostgreSQL` connection URL.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Root directory of the filesystem object store.
    #[serde(default = "default_storage_root")]
    pub storage_root: Utf8PathBuf,

    /// Base URL under which stored objects are publicly served.
    #[serde(default = "default_public_url")]
    pub public_url: String,

    /// Object storage bucket for task photos.
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Hours a session stays valid after sign-in.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u32,

    /// Directory holding the persisted session.
    #[serde(default = "default_session_dir")]
    pub session_dir: Utf8PathBuf,

    /// Maximum `PostgreSQL` pool size.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

fn default_storage_root() -> Utf8PathBuf {
    Utf8PathBuf::from("data/storage")
}

fn default_public_url() -> String {
    "http://localhost:8080".to_owned()
}

fn default_bucket() -> String {
    "task-images".to_owned()
}

const fn default_session_ttl_hours() -> u32 {
    24 * 30
}

fn default_session_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("data/session")
}

const fn default_pool_size() -> u32 {
    4
}

impl Default for FieldwatchConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            storage_root: default_storage_root(),
            public_url: default_public_url(),
            bucket: default_bucket(),
            session_ttl_hours: default_session_ttl_hours(),
            session_dir: default_session_dir(),
            pool_size: default_pool_size(),
        }
    }
}

impl FieldwatchConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is malformed.
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_owned(),
            source,
        };
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path has no file name",
            ))
        })?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
        let content = dir.read_to_string(file_name).map_err(io_error)?;
        Self::from_toml(&content)
    }

    /// Loads the file at `path`, when given, then applies process
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file or an override is invalid.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(file) => Self::from_file(file)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] when the TTL override is not
    /// a positive integer.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(DATABASE_URL_VAR) {
            self.database_url = Some(url);
        }
        if let Some(root) = lookup(STORAGE_ROOT_VAR) {
            self.storage_root = Utf8PathBuf::from(root);
        }
        if let Some(url) = lookup(PUBLIC_URL_VAR) {
            self.public_url = url;
        }
        if let Some(raw) = lookup(SESSION_TTL_HOURS_VAR) {
            self.session_ttl_hours = raw
                .trim()
                .parse()
                .ok()
                .filter(|hours| *hours > 0)
                .ok_or(ConfigError::InvalidOverride {
                    key: SESSION_TTL_HOURS_VAR,
                    value: raw,
                })?;
        }
        if let Some(dir) = lookup(SESSION_DIR_VAR) {
            self.session_dir = Utf8PathBuf::from(dir);
        }
        Ok(self)
    }

    /// Returns the database URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when no URL is configured.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url.as_deref().ok_or_else(|| {
            ConfigError::Validation(format!("{DATABASE_URL_VAR} or database_url is required"))
        })
    }

    /// Returns the session lifetime.
    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        Duration::hours(i64::from(self.session_ttl_hours))
    }
}
