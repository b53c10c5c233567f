use std::net::IpAddr;

use colored::*;
use geotrace_core::geolocation::GeoRecord;

use crate::terminal::colors;

/// Zoom the map link opens at; street level around the pin.
pub const MAP_ZOOM: u8 = 12;

const NOT_AVAILABLE: &str = "N/A";

pub type Detail = (String, ColoredString);

pub fn address(ip: &IpAddr) -> ColoredString {
    match ip {
        IpAddr::V4(ipv4_addr) => ipv4_addr.to_string().color(colors::IPV4_ADDR),
        IpAddr::V6(ipv6_addr) => ipv6_addr.to_string().color(colors::IPV6_ADDR),
    }
}

pub fn or_missing(value: Option<&str>) -> ColoredString {
    match value {
        Some(v) if !v.is_empty() => v.color(colors::TEXT_DEFAULT),
        _ => NOT_AVAILABLE.color(colors::MISSING),
    }
}

/// Country with its ISO code when both are known, e.g. `Brazil (BR)`.
pub fn country(record: &GeoRecord) -> String {
    match (record.country.as_deref(), record.country_code.as_deref()) {
        (Some(name), Some(code)) if !code.is_empty() => format!("{name} ({code})"),
        (Some(name), _) => name.to_string(),
        (None, _) => NOT_AVAILABLE.to_string(),
    }
}

/// The three headline metrics: country, city, ISP.
pub fn metrics(record: &GeoRecord) -> Vec<Detail> {
    vec![
        ("Country".to_string(), country(record).bold()),
        ("City".to_string(), or_missing(record.city.as_deref())),
        ("ISP".to_string(), or_missing(record.isp.as_deref())),
    ]
}

pub fn coordinates(lat: f64, lon: f64) -> String {
    format!("{lat}, {lon}")
}

/// OpenStreetMap link that drops a marker on `(lat, lon)`.
pub fn map_link(lat: f64, lon: f64) -> String {
    format!("https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map={MAP_ZOOM}/{lat}/{lon}")
}

pub fn tooltip(label: &str, ip: &IpAddr) -> String {
    format!("{label} ({ip})")
}

pub fn popup(record: &GeoRecord) -> String {
    format!(
        "Region: {}",
        record.region_name.as_deref().unwrap_or(NOT_AVAILABLE)
    )
}
