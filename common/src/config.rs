use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// ip-api.com free endpoint. Plain HTTP only; TLS requires a paid key.
pub const DEFAULT_ENDPOINT: &str = "http://ip-api.com/json/{address}";

/// Placeholder replaced by the resolved address in [`Config::endpoint`].
pub const ADDRESS_PLACEHOLDER: &str = "{address}";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Config {
    /// Geolocation endpoint template, must contain `{address}`.
    pub endpoint: String,
    /// Language for localized place names (e.g. `pt-BR`), sent as `?lang=`.
    pub lang: Option<String>,
    /// Upper bound for each network call. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Never fall back to an IPv6 address when a name has no A record.
    ///
    /// Literal addresses typed by the user are always used as given.
    pub ipv4_only: bool,
    /// Print the raw provider payload after the summary.
    pub raw: bool,
    /// Print only the raw provider payload.
    pub json: bool,
    pub quiet: u8,
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            lang: None,
            timeout: Some(DEFAULT_TIMEOUT),
            ipv4_only: false,
            raw: false,
            json: false,
            quiet: 0,
            no_banner: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("endpoint '{0}' is missing the {{address}} placeholder")]
    MissingPlaceholder(String),
    #[error("endpoint '{endpoint}' is not a valid URL: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("endpoint scheme '{0}' is not supported, use http or https")]
    UnsupportedScheme(String),
}

impl Config {
    /// Checks the endpoint template by rendering it with a sample address.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.endpoint.contains(ADDRESS_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder(self.endpoint.clone()));
        }

        let sample = self.render_endpoint(&IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let url = Url::parse(&sample).map_err(|source| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            source,
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn render_endpoint(&self, address: &IpAddr) -> String {
        render_endpoint(&self.endpoint, address)
    }
}

/// Substitutes `address` into an endpoint template.
pub fn render_endpoint(template: &str, address: &IpAddr) -> String {
    template.replace(ADDRESS_PLACEHOLDER, &address.to_string())
}
