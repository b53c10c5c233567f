use std::time::Duration;

use geotrace_common::config::Config;
use geotrace_core::error::{Stage, TraceError};
use geotrace_core::geolocation::{GeoFailure, Geolocator, IpApiClient};
use geotrace_core::tracer::Tracer;
use serde_json::Value;

use crate::support::{FakeIpApi, SLOW_DELAY, google_dns};

#[tokio::test]
async fn raw_payload_is_kept_verbatim() {
    let api = FakeIpApi::spawn().await.unwrap();
    let client = IpApiClient::from_config(&api.config("json")).unwrap();

    let record = client.geolocate("8.8.8.8".parse().unwrap()).await.unwrap();

    assert_eq!(record.raw(), &google_dns("United States"));
    assert_eq!(record.extra.get("mobile"), Some(&Value::Bool(false)));
    assert_eq!(record.asn.as_deref(), Some("AS15169 Google LLC"));
    assert_eq!(record.lat, Some(39.03));
    assert_eq!(record.lon, Some(-77.5));
}

#[tokio::test]
async fn language_is_forwarded() {
    let api = FakeIpApi::spawn().await.unwrap();
    let cfg = Config {
        lang: Some("pt-BR".into()),
        ..api.config("json")
    };
    let client = IpApiClient::from_config(&cfg).unwrap();

    let record = client.geolocate("8.8.8.8".parse().unwrap()).await.unwrap();
    assert_eq!(record.country.as_deref(), Some("Estados Unidos"));
}

#[tokio::test]
async fn non_json_body_is_decode_failure() {
    let api = FakeIpApi::spawn().await.unwrap();
    let client = IpApiClient::from_config(&api.config("garbage")).unwrap();

    let err = client
        .geolocate("8.8.8.8".parse().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, GeoFailure::Decode(_)), "{err:?}");
    assert_eq!(api.hits(), 1);
}

#[tokio::test]
async fn garbage_collapses_to_one_message() {
    let api = FakeIpApi::spawn().await.unwrap();
    let tracer = Tracer::from_config(&api.config("garbage")).unwrap();

    let err = tracer.trace("8.8.8.8", None).await.unwrap_err();
    assert_eq!(err.to_string(), "could not obtain geolocation for 8.8.8.8");
}

#[tokio::test]
async fn slow_provider_times_out() {
    let api = FakeIpApi::spawn().await.unwrap();
    let limit = Duration::from_millis(300);
    assert!(limit < SLOW_DELAY);

    let cfg = Config {
        timeout: Some(limit),
        ..api.config("slow")
    };
    let tracer = Tracer::from_config(&cfg).unwrap();

    let err = tracer.trace("8.8.8.8", None).await.unwrap_err();
    assert!(
        matches!(
            err,
            TraceError::Timeout {
                stage: Stage::Geolocation,
                after
            } if after == limit
        ),
        "{err:?}"
    );
}

#[tokio::test]
async fn unreachable_provider_is_geolocation_failure() {
    let api = FakeIpApi::spawn().await.unwrap();
    let cfg = api.config("json");
    drop(api);

    // Nothing listens on the old port once the server task is gone
    tokio::time::sleep(Duration::from_millis(50)).await;
    let tracer = Tracer::from_config(&cfg).unwrap();

    let err = tracer.trace("8.8.8.8", None).await.unwrap_err();
    assert!(
        matches!(
            err,
            TraceError::Geolocation {
                cause: GeoFailure::Transport(_),
                ..
            }
        ),
        "{err:?}"
    );
}
