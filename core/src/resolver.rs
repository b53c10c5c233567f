use std::io;
use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use geotrace_common::config::Config;
use geotrace_common::network::target::Target;
use thiserror::Error;
use tracing::debug;

/// A target that resolved to an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The cleaned label the user asked about.
    pub label: String,
    pub address: IpAddr,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("{label} does not resolve to any address")]
    NotFound { label: String },
    #[error("resolving {label} timed out after {after:?}")]
    TimedOut { label: String, after: Duration },
}

impl ResolveError {
    pub fn label(&self) -> &str {
        match self {
            ResolveError::NotFound { label } | ResolveError::TimedOut { label, .. } => label,
        }
    }
}

/// Backend that maps a hostname to its addresses.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>>;
}

/// Uses the operating system resolver (`getaddrinfo` on unix).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

#[async_trait]
impl NameResolver for SystemResolver {
    async fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        let addrs = tokio::net::lookup_host((host, 0)).await?;
        Ok(addrs.map(|socket_addr| socket_addr.ip()).collect())
    }
}

pub struct Resolver<R = SystemResolver> {
    backend: R,
    timeout: Option<Duration>,
    ipv4_only: bool,
}

impl Resolver<SystemResolver> {
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(SystemResolver, cfg.timeout, cfg.ipv4_only)
    }
}

impl<R: NameResolver> Resolver<R> {
    pub fn new(backend: R, timeout: Option<Duration>, ipv4_only: bool) -> Self {
        Self {
            backend,
            timeout,
            ipv4_only,
        }
    }

    /// Literal addresses come back untouched without a lookup.
    /// Names get one lookup, no retries.
    pub async fn resolve(&self, target: &Target) -> Result<Resolution, ResolveError> {
        let label: &str = target.label();

        if let Some(address) = target.as_literal() {
            debug!(%address, "target is already an address");
            return Ok(Resolution {
                label: label.to_string(),
                address,
            });
        }

        let not_found = || ResolveError::NotFound {
            label: label.to_string(),
        };

        if label.is_empty() {
            return Err(not_found());
        }

        let lookup = self.backend.lookup(label);
        let result: io::Result<Vec<IpAddr>> = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, lookup)
                .await
                .map_err(|_| ResolveError::TimedOut {
                    label: label.to_string(),
                    after: limit,
                })?,
            None => lookup.await,
        };

        let addrs: Vec<IpAddr> = result.map_err(|err| {
            debug!(%label, error = %err, "name lookup failed");
            not_found()
        })?;

        debug!(%label, ?addrs, "name lookup answered");

        let address: IpAddr = pick_address(&addrs, self.ipv4_only).ok_or_else(not_found)?;
        Ok(Resolution {
            label: label.to_string(),
            address,
        })
    }
}

/// First IPv4 answer wins. IPv6 is only a fallback.
fn pick_address(addrs: &[IpAddr], ipv4_only: bool) -> Option<IpAddr> {
    let v4 = addrs.iter().find(|addr| addr.is_ipv4());
    match (v4, ipv4_only) {
        (Some(addr), _) => Some(*addr),
        (None, true) => None,
        (None, false) => addrs.first().copied(),
    }
}
