//! End-to-end checks of the resolve-then-geolocate pipeline against a local
//! stand-in for ip-api.com. Nothing here talks to the internet.
#![cfg(test)]

mod pipeline;
mod provider;
mod support;
