//! # Inquiry Form Data Transfer Objects
//!
//! Request and response structures for the form intake endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/submit-form` - [`SubmitFormRequest`] -> [`SubmitFormResponse`]
//!   (or [`ValidationErrorResponse`] / [`ErrorResponse`])
//! - `GET /api/forms?page=1&limit=10` -> [`FormsPageResponse`]
//!
//! ## Wire Format
//!
//! These DTOs use **camelCase** field names, matching what the frontend sends:
//!
//! ```text
//! POST /api/submit-form
//! Content-Type: application/json
//!
//! {
//!   "companyName": "Acme",
//!   "email": "ops@acme.com",
//!   "phone": "+34 600 000 000",
//!   "industry": "retail",
//!   "challenges": "manual invoicing",
//!   "goals": "automate billing"
//! }
//! ```
//!
//! Response:
//! ```text
//! {
//!   "message": "Form submitted successfully",
//!   "formId": "0b6f5b8e-4c1f-4c53-9a53-5d0c1f7a2c11"
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inquiry form as a well-behaved client sends it.
///
/// The server does not deserialize into this type directly: the body is read as
/// untyped JSON and validated field by field, so a malformed body still yields
/// field-level errors. Clients and tests use it to build request bodies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFormRequest {
    pub company_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub industry: String,
    pub challenges: String,
    pub goals: String,
}

/// Successful submission acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFormResponse {
    pub message: String,
    pub form_id: String,
}

/// A stored submission as returned by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormRecord {
    pub id: String,
    pub company_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub industry: String,
    pub challenges: String,
    pub goals: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of stored submissions, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormsPageResponse {
    pub forms: Vec<FormRecord>,
    pub current_page: u32,
    pub total_pages: u64,
    pub total_forms: u64,
}

/// Rejected submission with one message per violated field rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationErrorResponse {
    pub message: String,
    pub errors: Vec<String>,
}

/// Generic error response (infrastructure faults, unknown failures).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
}
