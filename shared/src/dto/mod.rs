//! # Data Transfer Objects (DTOs)
//!
//! Data structures used for communication between the inquiry frontend and
//! the backend via the REST API.
//!
//! ## Module Organization
//!
//! - [`forms`] - Form submission, listing, and error DTOs
//!
//! ## Serialization Format
//!
//! - **Field naming**: camelCase (`#[serde(rename_all = "camelCase")]`)
//! - **Optional fields**: Omitted when `None` using `#[serde(skip_serializing_if = "Option::is_none")]`
//! - **Timestamps**: RFC 3339 strings via chrono's serde support

pub mod forms;

pub use forms::*;
