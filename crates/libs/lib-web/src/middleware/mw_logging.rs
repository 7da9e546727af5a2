//! # Request/Response Logging Middleware
//!
//! Logs one `[REQUEST]` line when a request arrives and one `[RESPONSE]` line
//! when it completes, tagged with the request ID from [`RequestStamp`].
//! Level follows the status: info for success, warn for 4xx, error for 5xx.
//!
//! Bodies are never logged; submissions carry contact details.

use crate::middleware::mw_req_stamp::RequestStamp;
use axum::{extract::Request, http::header::CONTENT_LENGTH, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Headers whose values are replaced before logging.
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "x-api-key", "x-auth-token"];

fn sanitized_headers(req: &Request) -> Vec<(String, String)> {
    req.headers()
        .iter()
        .filter_map(|(name, value)| {
            let lower = name.as_str().to_lowercase();
            if SENSITIVE_HEADERS.iter().any(|h| lower.contains(h)) {
                Some((name.to_string(), "***REDACTED***".to_string()))
            } else {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect()
}

pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(|q| q.to_string());
    let request_id = RequestStamp::id_of(&req);

    let client_ip = req
        .headers()
        .get("x-forwarded-for")
        .or_else(|| req.headers().get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        query = ?query,
        client_ip = ?client_ip,
        "[REQUEST] {} {}{}",
        method,
        path,
        query.as_ref().map(|q| format!("?{}", q)).unwrap_or_default()
    );
    debug!(request_id = %request_id, headers = ?sanitized_headers(&req), "[REQUEST HEADERS]");

    let response = next.run(req).await;

    let elapsed_ms = start.elapsed().as_millis();
    let status = response.status();
    let size_bytes = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(0);

    if status.is_server_error() {
        error!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms = elapsed_ms,
            "[RESPONSE] {} {} -> {} ({}ms) [SERVER ERROR]",
            method,
            path,
            status.as_u16(),
            elapsed_ms
        );
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms = elapsed_ms,
            "[RESPONSE] {} {} -> {} ({}ms) [CLIENT ERROR]",
            method,
            path,
            status.as_u16(),
            elapsed_ms
        );
    } else {
        info!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms = elapsed_ms,
            size_bytes,
            "[RESPONSE] {} {} -> {} ({}ms, {} bytes)",
            method,
            path,
            status.as_u16(),
            elapsed_ms,
            size_bytes
        );
    }

    response
}
