//! Core ScimClient structure and initialization.

use crate::config::{ClientConfiguration, LogLevel};
use crate::error::{ConfigResult, ConfigurationError, ValidationResult};
use crate::filter::Filter;
use crate::resource::value_objects::{ResourceId, ResourceType};
use chrono::{DateTime, TimeDelta, Utc};
use log::warn;
use std::sync::atomic::{AtomicU64, Ordering};
use url::Url;
use url::form_urlencoded::byte_serialize;

/// Client for a SCIM v2 service authenticated with a static bearer token.
///
/// The configuration is fixed at construction. The only state that changes
/// afterwards is the call counter, which is atomic, so a client can be shared
/// between threads.
///
/// # Examples
///
/// ```rust,no_run
/// use cato_scim::{ClientConfiguration, ScimClient, ScimFailure};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfiguration::new("https://scim.example.com/scim/v2/1234", "token")?;
/// let client = ScimClient::new(config)?;
///
/// match client.get_user("6236d20907a2c5128551028f") {
///     Ok(user) => println!("{}", user["userName"]),
///     Err(ScimFailure::Http { status: 404, .. }) => println!("no such user"),
///     Err(failure) => eprintln!("request failed: {failure}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ScimClient {
    pub(super) config: ClientConfiguration,
    pub(super) http: reqwest::blocking::Client,
    pub(super) call_count: AtomicU64,
    pub(super) started_at: DateTime<Utc>,
}

impl ScimClient {
    /// Creates a client from a resolved configuration.
    ///
    /// When TLS verification is disabled a warning is logged regardless of
    /// the configured log level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::HttpClient`] if the HTTP transport cannot
    /// be initialised.
    pub fn new(config: ClientConfiguration) -> ConfigResult<Self> {
        if !config.verify_tls() {
            warn!(
                "TLS certificate verification is disabled for {}; do not use this in production",
                config.base_url()
            );
        }

        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("cato-scim/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(!config.verify_tls())
            .build()
            .map_err(ConfigurationError::HttpClient)?;

        Ok(Self {
            config,
            http,
            call_count: AtomicU64::new(0),
            started_at: Utc::now(),
        })
    }

    /// Resolves configuration from the environment and `./.env`, then
    /// creates a client.
    pub fn from_env() -> ConfigResult<Self> {
        Self::new(ClientConfiguration::from_env()?)
    }

    pub fn config(&self) -> &ClientConfiguration {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        self.config.base_url()
    }

    /// Number of requests attempted since construction.
    ///
    /// Requests rejected by local validation are not counted; requests that
    /// failed in transport are.
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time since the client was constructed.
    pub fn elapsed(&self) -> TimeDelta {
        Utc::now() - self.started_at
    }

    pub(super) fn collection_url(&self, resource_type: ResourceType) -> Url {
        self.endpoint_url(&[resource_type.endpoint()])
    }

    pub(super) fn resource_url(&self, resource_type: ResourceType, id: &str) -> ValidationResult<Url> {
        let id = ResourceId::new(resource_type, id)?;
        Ok(self.endpoint_url(&[resource_type.endpoint(), id.as_str()]))
    }

    /// Collection URL carrying `filter=<expression>`.
    ///
    /// Spaces are encoded as `%20` rather than `+`.
    pub(super) fn filtered_url(&self, resource_type: ResourceType, filter: &Filter) -> Url {
        let mut url = self.collection_url(resource_type);
        let encoded: String = byte_serialize(filter.to_string().as_bytes())
            .collect::<String>()
            .replace('+', "%20");
        url.set_query(Some(&format!("filter={encoded}")));
        url
    }

    fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.config.base_url().clone();
        // Base URLs are validated to be hierarchical, so this cannot fail.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(super) fn logs(&self, level: LogLevel) -> bool {
        level != LogLevel::None && level <= self.config.log_level()
    }

    /// Elapsed time and call count, prefixed to every client log line.
    pub(super) fn log_context(&self) -> String {
        format!(
            "+{}ms #{}",
            self.elapsed().num_milliseconds(),
            self.call_count()
        )
    }

    pub(super) fn log_operation(&self, operation: std::fmt::Arguments<'_>) {
        if self.logs(LogLevel::Info) {
            log::info!("{} {}", self.log_context(), operation);
        }
    }
}
