//! # Services Layer
//!
//! Business logic between HTTP handlers and the storage layer:
//!
//! ```text
//! Handlers (HTTP) → Services (Business Logic) → SubmissionStore
//! ```
//!
//! - [`forms`] - Form submission and listing
//!
//! Services hold their dependencies (an `Arc<dyn SubmissionStore>`, limits from
//! config) and return `Result<T, AppError>`, converting store faults into the
//! matching `AppError` variant.

pub mod forms;

pub use forms::FormService;
