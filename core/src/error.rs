use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use geotrace_common::network::target::TargetError;
use thiserror::Error;

use crate::geolocation::GeoFailure;
use crate::resolver::ResolveError;

/// Pipeline step that ran out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolution,
    Geolocation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Resolution => f.write_str("name resolution"),
            Stage::Geolocation => f.write_str("geolocation"),
        }
    }
}

/// Terminal outcome of a failed trace. Every variant is meant to be shown to the user.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("enter a target first")]
    EmptyTarget,

    #[error("invalid domain or host is down: {label}")]
    Resolution { label: String },

    /// Provider refusal, transport trouble and unreadable payloads all land here.
    /// The kind survives as the error source.
    #[error("could not obtain geolocation for {address}")]
    Geolocation {
        address: IpAddr,
        #[source]
        cause: GeoFailure,
    },

    #[error("{stage} timed out after {}s", .after.as_secs_f64())]
    Timeout { stage: Stage, after: Duration },
}

impl From<TargetError> for TraceError {
    fn from(err: TargetError) -> Self {
        match err {
            TargetError::Empty => TraceError::EmptyTarget,
        }
    }
}

impl From<ResolveError> for TraceError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound { label } => TraceError::Resolution { label },
            ResolveError::TimedOut { after, .. } => TraceError::Timeout {
                stage: Stage::Resolution,
                after,
            },
        }
    }
}

impl TraceError {
    pub(crate) fn from_geo(address: IpAddr, cause: GeoFailure) -> Self {
        match cause {
            GeoFailure::TimedOut(after) => TraceError::Timeout {
                stage: Stage::Geolocation,
                after,
            },
            cause => TraceError::Geolocation { address, cause },
        }
    }
}
