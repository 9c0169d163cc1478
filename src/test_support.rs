//! Mock chat-completion upstream for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;

pub struct MockUpstream {
    pub url: String,
    pub calls: Arc<AtomicUsize>,
    pub last_authorization: Arc<Mutex<Option<String>>>,
    pub last_body: Arc<Mutex<Option<Value>>>,
}

/// Serve `body` with `status` on `POST /v1/chat/completions` from a local port.
pub async fn spawn_upstream(status: StatusCode, body: impl Into<String>) -> MockUpstream {
    let body: Arc<str> = Arc::from(body.into());
    let calls = Arc::new(AtomicUsize::new(0));
    let last_authorization = Arc::new(Mutex::new(None));
    let last_body = Arc::new(Mutex::new(None));

    let handler = {
        let calls = calls.clone();
        let last_authorization = last_authorization.clone();
        let last_body = last_body.clone();
        move |headers: HeaderMap, received: Bytes| {
            let body = body.clone();
            let calls = calls.clone();
            let last_authorization = last_authorization.clone();
            let last_body = last_body.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                *last_authorization.lock().unwrap() = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                *last_body.lock().unwrap() = serde_json::from_slice(&received).ok();

                (
                    status,
                    [(header::CONTENT_TYPE, "application/json")],
                    body.to_string(),
                )
            }
        }
    };

    let app = Router::new().route("/v1/chat/completions", post(handler));
    let base = serve_on_loopback(app).await;

    MockUpstream {
        url: format!("{base}/v1/chat/completions"),
        calls,
        last_authorization,
        last_body,
    }
}

/// Serve `app` on an ephemeral loopback port and return its origin.
pub async fn serve_on_loopback(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}
