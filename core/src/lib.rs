//! Resolve-then-geolocate pipeline.
//!
//! * **[`resolver`]**: turns a [`Target`](geotrace_common::network::target::Target) into an address.
//! * **[`geolocation`]**: asks a geolocation provider about that address.
//! * **[`tracer`]**: runs both in order and reports progress.
//!
//! Front ends should depend on [`tracer`] and the traits it is generic over,
//! never on a concrete backend.

pub mod error;
pub mod geolocation;
pub mod resolver;
pub mod tracer;
