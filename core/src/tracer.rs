//! Runs one request through resolution and geolocation.
//!
//! ```text
//! Idle ─► Resolving ─┬─► ResolutionFailed
//!                    └─► Resolved ─► Geolocating ─┬─► GeolocationFailed
//!                                                 └─► Located
//! ```
//!
//! Nothing is retried and nothing outlives a call: the next trace starts from `Idle` again.

use std::net::IpAddr;
use std::str::FromStr;

use geotrace_common::config::Config;
use geotrace_common::network::target::Target;
use tracing::debug;

use crate::error::TraceError;
use crate::geolocation::{GeoRecord, Geolocator, IpApiClient};
use crate::resolver::{NameResolver, Resolution, Resolver, SystemResolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceState {
    Idle,
    Resolving,
    Resolved,
    ResolutionFailed,
    Geolocating,
    Located,
    GeolocationFailed,
}

impl TraceState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TraceState::ResolutionFailed | TraceState::GeolocationFailed | TraceState::Located
        )
    }
}

/// Callback invoked on every state change of a trace.
pub type StateObserver<'a> = dyn Fn(TraceState) + Send + Sync + 'a;

/// Successful trace, ready for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    pub label: String,
    pub address: IpAddr,
    pub record: GeoRecord,
}

pub struct Tracer<R = SystemResolver, G = IpApiClient> {
    resolver: Resolver<R>,
    geolocator: G,
}

impl Tracer<SystemResolver, IpApiClient> {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            Resolver::from_config(cfg),
            IpApiClient::from_config(cfg)?,
        ))
    }
}

impl<R: NameResolver, G: Geolocator> Tracer<R, G> {
    pub fn new(resolver: Resolver<R>, geolocator: G) -> Self {
        Self {
            resolver,
            geolocator,
        }
    }

    /// Resolves `input` without contacting the geolocation provider.
    pub async fn resolve_only(
        &self,
        input: &str,
        observer: Option<&StateObserver<'_>>,
    ) -> Result<Resolution, TraceError> {
        let report = |state: TraceState| notify(observer, state);

        report(TraceState::Idle);
        let target = Target::from_str(input)?;

        report(TraceState::Resolving);
        match self.resolver.resolve(&target).await {
            Ok(resolution) => {
                report(TraceState::Resolved);
                Ok(resolution)
            }
            Err(err) => {
                debug!(error = %err, "resolution failed");
                report(TraceState::ResolutionFailed);
                Err(err.into())
            }
        }
    }

    /// Full trace. The observer always sees `Idle` first. Blank input fails with
    /// [`TraceError::EmptyTarget`] before any network activity and without leaving `Idle`.
    pub async fn trace(
        &self,
        input: &str,
        observer: Option<&StateObserver<'_>>,
    ) -> Result<Located, TraceError> {
        let report = |state: TraceState| notify(observer, state);

        let Resolution { label, address } = self.resolve_only(input, observer).await?;

        report(TraceState::Geolocating);
        match self.geolocator.geolocate(address).await {
            Ok(record) => {
                report(TraceState::Located);
                Ok(Located {
                    label,
                    address,
                    record,
                })
            }
            Err(cause) => {
                debug!(%address, error = %cause, "geolocation failed");
                report(TraceState::GeolocationFailed);
                Err(TraceError::from_geo(address, cause))
            }
        }
    }
}

fn notify(observer: Option<&StateObserver<'_>>, state: TraceState) {
    debug!(?state, "trace state");
    if let Some(observer) = observer {
        observer(state);
    }
}
