//! # Form Service
//!
//! Business logic for accepting and listing inquiry submissions.
//!
//! ## Overview
//!
//! The service composes the validator and the injected store:
//!
//! ```text
//! submit: raw JSON → validate → SubmissionStore::append → Submission
//! list:   raw page/limit → PageRequest (coerced) → SubmissionStore::list_page → Page
//! ```
//!
//! Validation failures never reach the store. Store faults are not retried here;
//! they surface as [`AppError::SaveFailed`] or [`AppError::FetchFailed`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lib_core::model::store::MemorySubmissionStore;
//! use lib_web::services::FormService;
//! use std::sync::Arc;
//!
//! # async fn example() -> lib_core::Result<()> {
//! let service = FormService::new(Arc::new(MemorySubmissionStore::new()), 10, 100);
//!
//! let raw = serde_json::json!({
//!     "companyName": "Acme",
//!     "email": "ops@acme.com",
//!     "industry": "retail",
//!     "challenges": "growth",
//!     "goals": "scale"
//! });
//! let stored = service.submit(&raw).await?;
//! let page = service.list(Some("1"), Some("10")).await?;
//! assert_eq!(page.items[0].id, stored.id);
//! # Ok(())
//! # }
//! ```

use lib_core::{validate, AppError, Page, PageRequest, Result, Submission, SubmissionStore};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Validates and stores submissions; serves paginated listings.
#[derive(Clone)]
pub struct FormService {
    store: Arc<dyn SubmissionStore>,
    default_limit: u32,
    max_limit: u32,
}

impl FormService {
    pub fn new(store: Arc<dyn SubmissionStore>, default_limit: u32, max_limit: u32) -> Self {
        Self {
            store,
            default_limit,
            max_limit,
        }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Validate `raw` and append it to the store.
    #[instrument(skip(self, raw), fields(backend = self.store.backend()))]
    pub async fn submit(&self, raw: &Value) -> Result<Submission> {
        let submission = validate(raw).map_err(|errors| {
            warn!("[SUBMIT] Rejected: {}", errors);
            AppError::Validation(errors)
        })?;

        let stored = self
            .store
            .append(submission)
            .await
            .map_err(AppError::SaveFailed)?;

        debug!("[SUBMIT] Stored submission {}", stored.id);
        Ok(stored)
    }

    /// Read one page, coercing malformed `page`/`limit` to defaults.
    #[instrument(skip(self), fields(backend = self.store.backend()))]
    pub async fn list(&self, page: Option<&str>, limit: Option<&str>) -> Result<Page<Submission>> {
        let request = PageRequest::from_query(page, limit, self.default_limit, self.max_limit);
        debug!(
            "[FORMS] page={} limit={} offset={}",
            request.page(),
            request.limit(),
            request.offset()
        );

        self.store
            .list_page(request)
            .await
            .map_err(AppError::FetchFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_core::model::store::MemorySubmissionStore;
    use serde_json::json;

    fn service() -> FormService {
        FormService::new(Arc::new(MemorySubmissionStore::new()), 10, 100)
    }

    fn acme() -> Value {
        json!({
            "companyName": "Acme",
            "email": "X@Acme.COM",
            "industry": "retail",
            "challenges": "growth",
            "goals": "scale"
        })
    }

    #[tokio::test]
    async fn test_submit_stores_normalized_record() {
        let service = service();
        let stored = service.submit(&acme()).await.unwrap();

        assert_eq!(stored.email, "x@acme.com");

        let page = service.list(None, None).await.unwrap();
        assert_eq!(page.items, vec![stored]);
    }

    #[tokio::test]
    async fn test_invalid_submit_never_reaches_store() {
        let service = service();
        let err = service.submit(&json!({ "companyName": "Acme" })).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(service.list(None, None).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_list_coerces_bad_parameters() {
        let service = service();
        for _ in 0..12 {
            service.submit(&acme()).await.unwrap();
        }

        let coerced = service.list(Some("0"), Some("-5")).await.unwrap();
        let explicit = service.list(Some("1"), Some("10")).await.unwrap();

        assert_eq!(coerced, explicit);
        assert_eq!(coerced.items.len(), 10);
        assert_eq!(coerced.total_pages, 2);
    }
}
