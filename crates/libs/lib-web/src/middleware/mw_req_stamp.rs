//! # Request Stamping Middleware
//!
//! Gives every request an ID and a receive time. The ID is stored in request
//! extensions for logging and echoed back in the `X-Request-ID` response header.
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use lib_web::middleware::stamp_req;
//!
//! let app: Router = Router::new()
//!     .route("/health", get(|| async { "OK" }))
//!     .layer(middleware::from_fn(stamp_req));
//! ```

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request metadata for tracing.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    pub id: String,
    pub received_at: DateTime<Utc>,
}

impl RequestStamp {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            received_at: Utc::now(),
        }
    }

    /// Stamp id of `req`, or `"unknown"` when the middleware did not run.
    pub fn id_of<B>(req: &axum::http::Request<B>) -> String {
        req.extensions()
            .get::<RequestStamp>()
            .map(|s| s.id.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::new();
    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    res
}
