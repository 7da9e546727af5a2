//! # Domain Model
//!
//! - [`submission`] - submission entity and its validated pre-storage form
//! - [`validate`] - untrusted JSON to [`submission::NewSubmission`]
//! - [`page`] - page request coercion and page results
//! - [`store`] - storage trait and backends

pub mod page;
pub mod store;
pub mod submission;
pub mod validate;
