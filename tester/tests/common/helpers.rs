//! Test helpers: axum servers on ephemeral ports

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use url::Url;

use tester::ReadinessProbe;

use super::fixtures::TestFixtures;

/// Serve `app` on 127.0.0.1 with an OS-assigned port
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A running stub service
pub struct ServiceStub {
    pub addr: SocketAddr,
    hits: Arc<AtomicU32>,
}

impl ServiceStub {
    pub fn url(&self, path: &str) -> Url {
        Url::parse(&format!("http://{}{}", self.addr, path)).unwrap()
    }

    /// Requests received so far
    pub fn hits(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }

    /// Backend honouring the health contract
    pub async fn healthy_backend() -> Self {
        let app = Router::new()
            .route("/health", get(|| async { Json(TestFixtures::healthy_body()) }))
            .route("/health/db", get(|| async { Json(TestFixtures::db_body()) }));
        Self::start(app).await
    }

    /// Backend answering 200 with bodies that break the contract
    pub async fn broken_backend() -> Self {
        let app = Router::new()
            .route("/health", get(|| async { Json(serde_json::json!({ "status": "degraded" })) }))
            .route("/health/db", get(|| async { Json(serde_json::json!({ "connected": false })) }));
        Self::start(app).await
    }

    /// Page that answers 503 for the first `warmup` requests, then 200
    pub async fn flaky(warmup: u32) -> Self {
        let hits = Arc::new(AtomicU32::new(0));
        let app = Router::new()
            .route(
                "/",
                get(move |State(hits): State<Arc<AtomicU32>>| async move {
                    if hits.fetch_add(1, Ordering::SeqCst) < warmup {
                        StatusCode::SERVICE_UNAVAILABLE
                    } else {
                        StatusCode::OK
                    }
                }),
            )
            .with_state(hits.clone());
        let addr = serve(app).await;
        Self { addr, hits }
    }

    /// Page that always answers with `status`
    pub async fn fixed(status: StatusCode) -> Self {
        let app = Router::new().route("/", get(move || async move { status }));
        Self::start(app).await
    }

    async fn start(app: Router) -> Self {
        let addr = serve(app).await;
        Self {
            addr,
            hits: Arc::new(AtomicU32::new(0)),
        }
    }
}

/// Common test helper functions
pub struct TestHelpers;

impl TestHelpers {
    pub fn fast_probe() -> ReadinessProbe {
        ReadinessProbe::new()
            .interval(TestFixtures::PROBE_INTERVAL)
            .deadline(TestFixtures::PROBE_DEADLINE)
            .request_timeout(TestFixtures::REQUEST_TIMEOUT)
    }

    /// A local URL nothing listens on
    pub async fn closed_url() -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    pub fn short_timeout() -> Duration {
        Duration::from_millis(500)
    }
}
