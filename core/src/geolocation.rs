//! Geolocation lookups.
//!
//! [`Geolocator`] is the seam the tracer depends on; [`IpApiClient`] is the
//! production implementation talking to ip-api.com (or anything answering
//! in its format).

use std::net::IpAddr;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use geotrace_common::config::{self, Config};
use thiserror::Error;
use tracing::debug;

mod record;

pub use record::{FAILURE_SENTINEL, GeoRecord};

/// Why a lookup produced no record.
#[derive(Debug, Error)]
pub enum GeoFailure {
    #[error("provider reported failure: {}", .message.as_deref().unwrap_or("no reason given"))]
    Reported { message: Option<String> },
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unreadable payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("payload has no status field")]
    MissingStatus,
    #[error("no answer within {0:?}")]
    TimedOut(Duration),
}

#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn geolocate(&self, address: IpAddr) -> Result<GeoRecord, GeoFailure>;
}

pub struct IpApiClient {
    http: reqwest::Client,
    endpoint: String,
    lang: Option<String>,
    timeout: Option<Duration>,
}

impl IpApiClient {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        cfg.validate()?;

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("geotrace/", env!("CARGO_PKG_VERSION")));
        if let Some(limit) = cfg.timeout {
            builder = builder.timeout(limit);
        }
        let http = builder.build().context("building HTTP client")?;

        Ok(Self {
            http,
            endpoint: cfg.endpoint.clone(),
            lang: cfg.lang.clone(),
            timeout: cfg.timeout,
        })
    }

    fn url_for(&self, address: &IpAddr) -> String {
        config::render_endpoint(&self.endpoint, address)
    }

    fn classify(&self, err: reqwest::Error) -> GeoFailure {
        match self.timeout {
            Some(limit) if err.is_timeout() => GeoFailure::TimedOut(limit),
            _ => GeoFailure::Transport(err),
        }
    }
}

#[async_trait]
impl Geolocator for IpApiClient {
    /// One GET, no retry. The HTTP status is ignored; only the body decides.
    async fn geolocate(&self, address: IpAddr) -> Result<GeoRecord, GeoFailure> {
        let url: String = self.url_for(&address);
        let mut request = self.http.get(&url);
        if let Some(lang) = &self.lang {
            request = request.query(&[("lang", lang)]);
        }

        debug!(%url, "querying geolocation provider");
        let response = request.send().await.map_err(|e| self.classify(e))?;
        debug!(status = %response.status(), "provider answered");

        let body: String = response.text().await.map_err(|e| self.classify(e))?;
        GeoRecord::from_body(&body)
    }
}
