//! # HTTP Request Handlers
//!
//! Axum handlers grouped by feature. Handlers extract input, delegate to
//! [`crate::services`], and return `Result<T, AppError>`; [`lib_core::AppError`]
//! renders the error body.
//!
//! ## Handler Modules
//!
//! - **[`forms`]**: Inquiry form endpoints
//!   - `POST /api/submit-form` - Validate and store a submission
//!   - `GET /api/forms` - Paginated listing, newest first
//!
//! - **[`health`]**: Liveness and landing endpoints
//!   - `GET /` - Plain-text banner
//!   - `GET /health` - `OK`
//!
//! ## Request/Response Flow
//!
//! ```text
//! Client Request
//!     ↓
//! CORS (tower-http)
//!     ↓
//! stamp_req → log_requests → TraceLayer
//!     ↓
//! Handler → FormService → SubmissionStore
//!     ↓
//! JSON Response (or AppError body)
//! ```

pub mod forms;
pub mod health;
