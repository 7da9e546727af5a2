//! # Form Handlers
//!
//! HTTP endpoints for the inquiry form.
//!
//! ## Endpoints
//!
//! - `POST /api/submit-form` - Validate and store one submission
//! - `GET /api/forms?page=1&limit=10` - List stored submissions, newest first
//!
//! ## Request Examples
//!
//! ```bash
//! curl -X POST http://localhost:5000/api/submit-form \
//!   -H 'content-type: application/json' \
//!   -d '{"companyName":"Acme","email":"ops@acme.com","industry":"retail","challenges":"growth","goals":"scale"}'
//!
//! curl "http://localhost:5000/api/forms?page=2&limit=10"
//! ```
//!
//! The submit endpoint also accepts `application/x-www-form-urlencoded` bodies, as
//! posted by a plain HTML form.

use crate::services::FormService;
use axum::{
    extract::{rejection::QueryRejection, Form, FromRequest, Query, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    Json,
};
use lib_core::{AppError, ValidationErrors};
use serde::Deserialize;
use serde_json::{Map, Value};
use shared::{FormRecord, FormsPageResponse, SubmitFormResponse};
use std::collections::HashMap;
use tracing::{debug, info, instrument};


/// Untrusted form body, read as JSON or urlencoded fields.
///
/// Unreadable bodies are rejected with the same 400 shape as field errors.
#[derive(Debug)]
pub struct FormBody(pub Value);

impl<S> FromRequest<S> for FormBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let urlencoded = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if urlencoded {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| body_error(e.body_text()))?;

            let object: Map<String, Value> = fields
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect();
            Ok(Self(Value::Object(object)))
        } else {
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|e| body_error(e.body_text()))?;
            Ok(Self(value))
        }
    }
}

fn body_error(detail: String) -> AppError {
    AppError::Validation(ValidationErrors::body(format!("Invalid request body: {}", detail)))
}

/// Submit an inquiry form.
///
/// **Route**: `POST /api/submit-form`
///
/// # Returns
///
/// - 201: `{"message": "Form submitted successfully", "formId": "<uuid>"}`
/// - 400: `{"message": "Validation failed", "errors": [...]}` with every violated field
/// - 500: `{"message": "Error saving form"}`
#[instrument(skip(forms, body))]
pub async fn submit_form(
    State(forms): State<FormService>,
    FormBody(body): FormBody,
) -> Result<(StatusCode, Json<SubmitFormResponse>), AppError> {
    info!("[SUBMIT] New form submission received");

    let stored = forms.submit(&body).await?;

    info!("[SUBMIT] Form saved with id {}", stored.id);

    Ok((
        StatusCode::CREATED,
        Json(SubmitFormResponse {
            message: "Form submitted successfully".to_string(),
            form_id: stored.id,
        }),
    ))
}

/// Raw listing parameters; parsed leniently by the service.
#[derive(Debug, Default, Deserialize)]
pub struct FormsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// List stored submissions, newest first.
///
/// **Route**: `GET /api/forms`
///
/// # Parameters
///
/// - `page` (query, optional) - 1-based page number, default 1
/// - `limit` (query, optional) - page size, default from config, clamped to the configured max
///
/// Malformed parameters fall back to the defaults rather than failing.
///
/// # Returns
///
/// - 200: `{"forms": [...], "currentPage": 1, "totalPages": 2, "totalForms": 15}`
/// - 500: `{"message": "Error fetching forms"}`
#[instrument(skip(forms, query))]
pub async fn list_forms(
    State(forms): State<FormService>,
    query: Result<Query<FormsQuery>, QueryRejection>,
) -> Result<Json<FormsPageResponse>, AppError> {
    let Query(query) = query.unwrap_or_else(|e| {
        debug!("[FORMS] Ignoring unparsable query string: {}", e.body_text());
        Query(FormsQuery::default())
    });

    let page = forms
        .list(query.page.as_deref(), query.limit.as_deref())
        .await?;

    info!(
        "[FORMS] Returning {} of {} form(s) (page {}/{})",
        page.items.len(),
        page.total,
        page.page,
        page.total_pages
    );

    let page = page.map(FormRecord::from);

    Ok(Json(FormsPageResponse {
        forms: page.items,
        current_page: page.page,
        total_pages: page.total_pages,
        total_forms: page.total,
    }))
}
