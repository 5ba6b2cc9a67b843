//! Per-request access logging.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use log::{info, warn};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags each response with a fresh request id and logs one line per request.
///
/// Only method, path, status and timing are logged; query strings and bodies
/// may carry personal data and are left out.
pub async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let status = response.status();
    let duration_ms = started_at.elapsed().as_millis();
    if status.is_server_error() {
        warn!(
            "event=http_request module=http method={method} path={path} status={} duration_ms={duration_ms} request_id={request_id}",
            status.as_u16()
        );
    } else {
        info!(
            "event=http_request module=http method={method} path={path} status={} duration_ms={duration_ms} request_id={request_id}",
            status.as_u16()
        );
    }
    response
}
