//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the inquiry frontend and the backend API.
//! All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::forms`]**: Form submission and listing DTOs
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::forms::SubmitFormResponse;
//!
//! let response = SubmitFormResponse {
//!     message: "Form submitted successfully".to_string(),
//!     form_id: "42".to_string(),
//! };
//! let json = serde_json::to_value(&response).unwrap();
//! assert_eq!(json["formId"], "42");
//! ```

pub mod dto;

// Wildcard re-export: everything in a DTO library is public API
pub use dto::*;
