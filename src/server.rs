use std::io;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::system::monitor::PerformanceMonitor;

pub fn router(monitor: PerformanceMonitor) -> Router {
    Router::new()
        .route("/api/performance", get(performance_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(monitor)
}

/// Serve until `cancel` fires, then drain in-flight requests.
pub async fn serve(
    listener: TcpListener,
    monitor: PerformanceMonitor,
    cancel: CancellationToken,
) -> io::Result<()> {
    axum::serve(listener, router(monitor))
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await
}

async fn performance_handler(State(monitor): State<PerformanceMonitor>) -> Response {
    let snapshot = monitor.snapshot();
    let mut body = Vec::with_capacity(4096);
    match snapshot.write_json(&mut body) {
        Ok(()) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(err) => {
            error!(error = %err, "failed to serialize performance snapshot");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn health_handler() -> &'static str {
    "OK"
}
