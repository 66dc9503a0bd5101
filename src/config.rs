//! Client configuration and credential resolution.
//!
//! A [`ClientConfiguration`] is resolved once, before the client is built, and
//! never changes afterwards. Values are looked up in this order:
//!
//! 1. explicit values passed to [`ConfigResolver`]
//! 2. the `CATO_SCIM_URL` / `CATO_SCIM_TOKEN` process environment variables
//! 3. entries of the same name in a `.env`-style file (default `./.env`)
//!
//! Reading the `.env` file does not modify the process environment.
//!
//! ```rust,no_run
//! use cato_scim::config::ConfigResolver;
//!
//! # fn example() -> Result<(), cato_scim::ConfigurationError> {
//! let config = ConfigResolver::new()
//!     .env_file("/etc/cato/scim.env")
//!     .resolve()?;
//! println!("Using {}", config.base_url());
//! # Ok(())
//! # }
//! ```

use crate::error::{ConfigResult, ConfigurationError};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

/// Environment variable holding the SCIM service URL.
pub const URL_ENV_VAR: &str = "CATO_SCIM_URL";
/// Environment variable holding the bearer token.
pub const TOKEN_ENV_VAR: &str = "CATO_SCIM_TOKEN";
/// File consulted when no explicit `.env` path is given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Verbosity of the client's own log records.
///
/// Levels are ordered; a record is emitted when its level is less than or
/// equal to the configured one. `None` silences the client entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    #[default]
    None,
    Error,
    Info,
    Debug,
}

impl LogLevel {
    /// Matching filter for a `log` backend such as `env_logger`.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::None => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
        }
    }

    /// Level for a repeated `-v` flag count.
    pub fn from_verbosity(count: u8) -> Self {
        match count {
            0 => LogLevel::None,
            1 => LogLevel::Error,
            2 => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(LogLevel::None),
            "error" => Ok(LogLevel::Error),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(format!("{other} is not a valid log level")),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::None => "none",
            LogLevel::Error => "error",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        write!(f, "{name}")
    }
}

/// Resolved, immutable settings for one [`ScimClient`](crate::ScimClient).
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfiguration {
    base_url: Url,
    token: String,
    verify_tls: bool,
    log_level: LogLevel,
}

impl ClientConfiguration {
    /// Build a configuration from explicit values.
    ///
    /// The URL must use `http` or `https` and name a host; any path it
    /// carries becomes the prefix for `/Users` and `/Groups`.
    pub fn new(base_url: impl AsRef<str>, token: impl Into<String>) -> ConfigResult<Self> {
        let raw = base_url.as_ref().trim();
        if raw.is_empty() {
            return Err(ConfigurationError::MissingBaseUrl);
        }

        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigurationError::MissingToken);
        }

        Ok(Self {
            base_url: parse_base_url(raw)?,
            token,
            verify_tls: true,
            log_level: LogLevel::None,
        })
    }

    /// Resolve from the process environment and `./.env`.
    pub fn from_env() -> ConfigResult<Self> {
        ConfigResolver::new().resolve()
    }

    /// Enable or disable TLS certificate verification.
    ///
    /// Disabling verification is for non-production use only; the client logs
    /// a warning when it is built with verification off.
    pub fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    /// Set the client's log verbosity.
    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }
}

impl fmt::Debug for ClientConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfiguration")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .field("verify_tls", &self.verify_tls)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn parse_base_url(raw: &str) -> ConfigResult<Url> {
    let url = Url::parse(raw).map_err(|e| ConfigurationError::invalid_base_url(raw, e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigurationError::invalid_base_url(
            raw,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ConfigurationError::invalid_base_url(raw, "missing host"));
    }
    if url.cannot_be_a_base() {
        return Err(ConfigurationError::invalid_base_url(
            raw,
            "URL cannot be used as a base",
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigurationError::invalid_base_url(
            raw,
            "query strings and fragments are not allowed",
        ));
    }

    Ok(url)
}

/// Builder that resolves a [`ClientConfiguration`] from explicit values, the
/// process environment and a `.env`-style file.
#[derive(Clone)]
pub struct ConfigResolver {
    base_url: Option<String>,
    token: Option<String>,
    env_file: Option<PathBuf>,
    process_env: bool,
    verify_tls: bool,
    log_level: LogLevel,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            env_file: Some(PathBuf::from(DEFAULT_ENV_FILE)),
            process_env: true,
            verify_tls: true,
            log_level: LogLevel::None,
        }
    }
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit base URL; wins over every other source.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Explicit bearer token; wins over every other source.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Read `.env` entries from `path` instead of `./.env`.
    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Skip `.env` file lookup.
    pub fn without_env_file(mut self) -> Self {
        self.env_file = None;
        self
    }

    /// Skip process environment lookup.
    pub fn without_process_env(mut self) -> Self {
        self.process_env = false;
        self
    }

    pub fn verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    pub fn log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    /// Resolve the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingBaseUrl`] or
    /// [`ConfigurationError::MissingToken`] when no source yields a value,
    /// [`ConfigurationError::EnvFile`] when the `.env` file exists but cannot
    /// be parsed, and [`ConfigurationError::InvalidBaseUrl`] for unusable URLs.
    pub fn resolve(self) -> ConfigResult<ClientConfiguration> {
        let file_values = match &self.env_file {
            Some(path) => read_env_file(path)?,
            None => HashMap::new(),
        };

        let lookup = |explicit: Option<String>, key: &str| -> Option<String> {
            explicit
                .filter(|v| !v.trim().is_empty())
                .or_else(|| {
                    self.process_env
                        .then(|| std::env::var(key).ok())
                        .flatten()
                        .filter(|v| !v.trim().is_empty())
                })
                .or_else(|| {
                    file_values
                        .get(key)
                        .filter(|v| !v.trim().is_empty())
                        .cloned()
                })
        };

        let base_url = lookup(self.base_url.clone(), URL_ENV_VAR)
            .ok_or(ConfigurationError::MissingBaseUrl)?;
        let token =
            lookup(self.token.clone(), TOKEN_ENV_VAR).ok_or(ConfigurationError::MissingToken)?;

        Ok(ClientConfiguration::new(base_url, token)?
            .with_verify_tls(self.verify_tls)
            .with_log_level(self.log_level))
    }
}

/// Parse a `.env`-style file into a map. A missing file yields an empty map.
fn read_env_file(path: &Path) -> ConfigResult<HashMap<String, String>> {
    let env_file_error = |source: dotenvy::Error| ConfigurationError::EnvFile {
        path: path.to_path_buf(),
        source,
    };

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => return Ok(HashMap::new()),
        Err(e) => return Err(env_file_error(e)),
    };

    let mut values = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(env_file_error)?;
        values.insert(key, value);
    }
    Ok(values)
}
