use serde::Deserialize;
use serde_json::{Map, Value};

use super::GeoFailure;

/// `status` value ip-api uses to say it has nothing for an address.
pub const FAILURE_SENTINEL: &str = "fail";

/// One provider answer, as received.
///
/// Known ip-api fields are typed. Anything else lands in [`GeoRecord::extra`].
/// The untouched payload stays available through [`GeoRecord::raw`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoRecord {
    pub status: String,
    pub message: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub region: Option<String>,
    pub region_name: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub timezone: Option<String>,
    pub isp: Option<String>,
    pub org: Option<String>,
    #[serde(rename = "as")]
    pub asn: Option<String>,
    /// The address the provider answered for.
    pub query: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    raw: Value,
}

impl GeoRecord {
    pub fn from_body(body: &str) -> Result<Self, GeoFailure> {
        let raw: Value = serde_json::from_str(body)?;
        Self::from_value(raw)
    }

    /// Applies the sentinel check, then maps the payload onto the typed fields.
    pub fn from_value(raw: Value) -> Result<Self, GeoFailure> {
        let status: &str = raw
            .get("status")
            .and_then(Value::as_str)
            .ok_or(GeoFailure::MissingStatus)?;

        if status == FAILURE_SENTINEL {
            let message = raw
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned);
            return Err(GeoFailure::Reported { message });
        }

        let mut record: GeoRecord = serde_json::from_value(raw.clone())?;
        record.raw = raw;
        Ok(record)
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// `(lat, lon)` exactly as the provider sent them.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lon?))
    }
}
