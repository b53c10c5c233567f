use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use geotrace_common::config::Config;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// How long `/slow` sits on a request before answering.
pub const SLOW_DELAY: Duration = Duration::from_secs(5);

/// A throwaway HTTP server speaking ip-api's JSON dialect.
///
/// * `/json/{address}`: success for `8.8.8.8`, `fail` for everything else.
/// * `/garbage/{address}`: HTML with a 429, like a rate-limited provider.
/// * `/slow/{address}`: answers after [`SLOW_DELAY`].
pub struct FakeIpApi {
    base: String,
    hits: Arc<AtomicUsize>,
    server: JoinHandle<()>,
}

impl FakeIpApi {
    pub async fn spawn() -> anyhow::Result<Self> {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/json/:address", get(lookup))
            .route("/garbage/:address", get(garbage))
            .route("/slow/:address", get(slow))
            .with_state(hits.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base: format!("http://{addr}"),
            hits,
            server,
        })
    }

    /// Config pointing at one of the routes above.
    pub fn config(&self, route: &str) -> Config {
        Config {
            endpoint: format!("{}/{route}/{{address}}", self.base),
            timeout: Some(Duration::from_secs(5)),
            ..Config::default()
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for FakeIpApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

pub fn google_dns(country: &str) -> Value {
    json!({
        "status": "success",
        "country": country,
        "countryCode": "US",
        "region": "VA",
        "regionName": "Virginia",
        "city": "Ashburn",
        "zip": "20149",
        "lat": 39.03,
        "lon": -77.5,
        "timezone": "America/New_York",
        "isp": "Google LLC",
        "org": "Google Public DNS",
        "as": "AS15169 Google LLC",
        "mobile": false,
        "query": "8.8.8.8"
    })
}

async fn lookup(
    State(hits): State<Arc<AtomicUsize>>,
    Path(address): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);

    let country = match params.get("lang").map(String::as_str) {
        Some("pt-BR") => "Estados Unidos",
        _ => "United States",
    };

    match address.as_str() {
        "8.8.8.8" => Json(google_dns(country)),
        other => Json(json!({
            "status": "fail",
            "message": "private range",
            "query": other
        })),
    }
}

async fn garbage(State(hits): State<Arc<AtomicUsize>>) -> (StatusCode, &'static str) {
    hits.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::TOO_MANY_REQUESTS,
        "<html><body>slow down</body></html>",
    )
}

async fn slow(State(hits): State<Arc<AtomicUsize>>) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(SLOW_DELAY).await;
    Json(google_dns("United States"))
}
