//! # Core Library
//!
//! Submission model, validation, pagination, storage backends, configuration,
//! and the application error type.

pub mod config;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::page::{Page, PageRequest};
pub use model::store::{open_store, DbPool, StoreError, SubmissionStore};
pub use model::submission::{NewSubmission, Submission};
pub use model::validate::{validate, FieldError, ValidationErrors};
