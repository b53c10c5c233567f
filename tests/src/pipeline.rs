use std::sync::Mutex;

use geotrace_core::error::TraceError;
use geotrace_core::geolocation::GeoFailure;
use geotrace_core::tracer::{TraceState, Tracer};

use crate::support::FakeIpApi;

#[tokio::test]
async fn literal_address_is_located() {
    let api = FakeIpApi::spawn().await.unwrap();
    let tracer = Tracer::from_config(&api.config("json")).unwrap();

    let seen: Mutex<Vec<TraceState>> = Mutex::new(Vec::new());
    let observer = |state: TraceState| seen.lock().unwrap().push(state);
    let located = tracer.trace("8.8.8.8", Some(&observer)).await.unwrap();

    assert_eq!(located.label, "8.8.8.8");
    assert_eq!(located.address.to_string(), "8.8.8.8");
    assert_eq!(located.record.country.as_deref(), Some("United States"));
    assert_eq!(located.record.coordinates(), Some((39.03, -77.5)));
    assert_eq!(api.hits(), 1);

    assert_eq!(
        seen.into_inner().unwrap(),
        vec![
            TraceState::Idle,
            TraceState::Resolving,
            TraceState::Resolved,
            TraceState::Geolocating,
            TraceState::Located
        ]
    );
}

#[tokio::test]
async fn url_like_input_is_cleaned() {
    let api = FakeIpApi::spawn().await.unwrap();
    let tracer = Tracer::from_config(&api.config("json")).unwrap();

    let located = tracer.trace("https://8.8.8.8//", None).await.unwrap();
    assert_eq!(located.label, "8.8.8.8");
    assert_eq!(located.record.query.as_deref(), Some("8.8.8.8"));

    let located = tracer.trace("https://http://8.8.8.8/", None).await.unwrap();
    assert_eq!(located.label, "8.8.8.8");
    assert_eq!(api.hits(), 2);
}

#[tokio::test]
async fn blank_input_makes_no_calls() {
    let api = FakeIpApi::spawn().await.unwrap();
    let tracer = Tracer::from_config(&api.config("json")).unwrap();

    for input in ["", "   ", "\n"] {
        let seen: Mutex<Vec<TraceState>> = Mutex::new(Vec::new());
        let observer = |state: TraceState| seen.lock().unwrap().push(state);

        let err = tracer.trace(input, Some(&observer)).await.unwrap_err();
        assert!(matches!(err, TraceError::EmptyTarget), "{input:?}: {err:?}");
        assert_eq!(seen.into_inner().unwrap(), vec![TraceState::Idle]);
    }
    assert_eq!(api.hits(), 0);
}

#[tokio::test]
async fn unresolvable_name_never_reaches_provider() {
    let api = FakeIpApi::spawn().await.unwrap();
    let tracer = Tracer::from_config(&api.config("json")).unwrap();

    let err = tracer
        .trace("nonexistent-domain-xyz123.invalid", None)
        .await
        .unwrap_err();

    match err {
        TraceError::Resolution { label } => {
            assert_eq!(label, "nonexistent-domain-xyz123.invalid")
        }
        // A resolver that hangs on .invalid is still a resolution failure
        TraceError::Timeout { .. } => {}
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(api.hits(), 0);
}

#[tokio::test]
async fn private_address_is_refused() {
    let api = FakeIpApi::spawn().await.unwrap();
    let tracer = Tracer::from_config(&api.config("json")).unwrap();

    let err = tracer.trace("10.0.0.1", None).await.unwrap_err();

    assert_eq!(err.to_string(), "could not obtain geolocation for 10.0.0.1");
    assert!(matches!(
        err,
        TraceError::Geolocation {
            cause: GeoFailure::Reported { message: Some(ref m) },
            ..
        } if m == "private range"
    ));
    assert_eq!(api.hits(), 1);
}

#[tokio::test]
async fn localhost_resolves_then_fails_geolocation() {
    let api = FakeIpApi::spawn().await.unwrap();
    let tracer = Tracer::from_config(&api.config("json")).unwrap();

    let err = tracer.trace("http://localhost/", None).await.unwrap_err();

    match err {
        TraceError::Geolocation { address, .. } => assert!(address.is_loopback()),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(api.hits(), 1);
}

#[tokio::test]
async fn repeated_lookups_are_not_cached() {
    let api = FakeIpApi::spawn().await.unwrap();
    let tracer = Tracer::from_config(&api.config("json")).unwrap();

    let first = tracer.trace("8.8.8.8", None).await.unwrap();
    let second = tracer.trace("8.8.8.8", None).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(api.hits(), 2);
}

#[tokio::test]
async fn resolve_only_leaves_provider_alone() {
    let api = FakeIpApi::spawn().await.unwrap();
    let tracer = Tracer::from_config(&api.config("json")).unwrap();

    let resolution = tracer.resolve_only("http://8.8.4.4/", None).await.unwrap();

    assert_eq!(resolution.label, "8.8.4.4");
    assert_eq!(resolution.address.to_string(), "8.8.4.4");
    assert_eq!(api.hits(), 0);
}
