//! # SQLite Submission Store
//!
//! Persists submissions in a single `submissions` table through an `sqlx` pool.
//!
//! `seq` is an autoincrement insertion sequence used as the tie-breaker when two
//! records share a `created_at`. Timestamps are stored as fixed-width RFC 3339
//! text (microseconds, `Z`), so text order equals time order.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lib_core::model::store::{SqliteSubmissionStore, SubmissionStore};
//! use lib_core::{validate, PageRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteSubmissionStore::connect("sqlite:data/forms.db").await?;
//!
//! let raw = serde_json::json!({
//!     "companyName": "Acme",
//!     "email": "ops@acme.com",
//!     "industry": "retail",
//!     "challenges": "growth",
//!     "goals": "scale"
//! });
//! let stored = store.append(validate(&raw)?).await?;
//!
//! let page = store.list_page(PageRequest::default()).await?;
//! assert_eq!(page.items[0].id, stored.id);
//! # Ok(())
//! # }
//! ```

use super::{DbPool, StoreError, SubmissionStore};
use crate::model::page::{Page, PageRequest};
use crate::model::submission::{NewSubmission, Submission};
use async_trait::async_trait;
use lib_utils::{format_time, now_utc};
use sqlx::query_as;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info};
use uuid::Uuid;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS submissions (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        company_name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT,
        industry TEXT NOT NULL,
        challenges TEXT NOT NULL,
        goals TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
"#;

const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_submissions_created ON submissions (created_at DESC, seq DESC)";

const SELECT_PAGE: &str = r#"
    SELECT id, company_name, email, phone, industry, challenges, goals, created_at, updated_at
    FROM submissions
    ORDER BY created_at DESC, seq DESC
    LIMIT ? OFFSET ?
"#;

/// Submission store backed by SQLite.
#[derive(Clone)]
pub struct SqliteSubmissionStore {
    pool: DbPool,
}

impl SqliteSubmissionStore {
    /// Connect to `database_url`, creating the file, its directory, and the table as needed.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = database_url
            .parse::<SqliteConnectOptions>()?
            .create_if_missing(true);

        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        if !in_memory {
            // Ensure data directory exists for the database file
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    tokio::fs::create_dir_all(parent).await?;
                    info!("[STORE] Created database directory: {:?}", parent);
                }
            }
            info!("[STORE] Database file will be at: {:?}", options.get_filename());
        }

        // A private in-memory database lives only as long as its connection.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await?;
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, creating the table if it does not exist.
    pub async fn from_pool(pool: DbPool) -> Result<Self, StoreError> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        sqlx::query(CREATE_INDEX).execute(&pool).await?;
        debug!("[STORE] submissions table ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl SubmissionStore for SqliteSubmissionStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn append(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
        let record = Submission::create(submission, Uuid::new_v4().to_string(), now_utc());

        sqlx::query(
            r#"
            INSERT INTO submissions (id, company_name, email, phone, industry, challenges, goals, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&record.id)
        .bind(&record.company_name)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(&record.industry)
        .bind(&record.challenges)
        .bind(&record.goals)
        .bind(format_time(record.created_at))
        .bind(format_time(record.updated_at))
        .execute(&self.pool)
        .await?;

        debug!("[STORE] Inserted submission {}", record.id);
        Ok(record)
    }

    async fn list_page(&self, request: PageRequest) -> Result<Page<Submission>, StoreError> {
        let limit = i64::from(request.limit());
        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);

        // Count and slice inside one read transaction so they see the same snapshot.
        let mut tx = self.pool.begin().await?;

        let (total,): (i64,) = query_as("SELECT COUNT(*) FROM submissions")
            .fetch_one(&mut *tx)
            .await?;

        let items = query_as::<_, Submission>(SELECT_PAGE)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Page::new(items, request, total.max(0) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;

    async fn setup_test_store() -> SqliteSubmissionStore {
        SqliteSubmissionStore::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database")
    }

    fn new_submission(company: &str) -> NewSubmission {
        NewSubmission {
            company_name: company.to_string(),
            email: format!("{}@example.com", company.to_lowercase()),
            phone: None,
            industry: "retail".to_string(),
            challenges: "growth".to_string(),
            goals: "scale".to_string(),
        }
    }

    /// Insert a row with a chosen timestamp, bypassing `append`.
    async fn insert_at(store: &SqliteSubmissionStore, id: &str, at: chrono::DateTime<Utc>) {
        sqlx::query(
            "INSERT INTO submissions (id, company_name, email, industry, challenges, goals, created_at, updated_at)
             VALUES (?, 'Co', 'co@example.com', 'i', 'c', 'g', ?, ?)",
        )
        .bind(id)
        .bind(format_time(at))
        .bind(format_time(at))
        .execute(store.pool())
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_append_then_list_round_trip() {
        let store = setup_test_store().await;
        let mut new = new_submission("Acme");
        new.phone = Some("555".to_string());

        let stored = store.append(new.clone()).await.unwrap();
        let page = store.list_page(PageRequest::default()).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items, vec![stored.clone()]);
        assert_eq!(stored.company_name, new.company_name);
        assert_eq!(stored.phone, new.phone);
        assert_eq!(stored.created_at, stored.updated_at);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let store = setup_test_store().await;
        let a = store.append(new_submission("A")).await.unwrap();
        let b = store.append(new_submission("B")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_second_page_of_fifteen() {
        let store = setup_test_store().await;
        for i in 0..15 {
            store.append(new_submission(&format!("Co{i}"))).await.unwrap();
        }

        let page = store.list_page(PageRequest::new(2, 10)).await.unwrap();

        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total, 15);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_newest_first_with_tie_break() {
        let store = setup_test_store().await;
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();

        insert_at(&store, "oldest", base).await;
        insert_at(&store, "tie-first", base + Duration::minutes(5)).await;
        insert_at(&store, "tie-second", base + Duration::minutes(5)).await;
        insert_at(&store, "newest", base + Duration::hours(1)).await;

        let page = store.list_page(PageRequest::default()).await.unwrap();
        let ids: Vec<&str> = page.items.iter().map(|s| s.id.as_str()).collect();

        assert_eq!(ids, vec!["newest", "tie-second", "tie-first", "oldest"]);

        let again = store.list_page(PageRequest::default()).await.unwrap();
        assert_eq!(page.items, again.items);
    }

    #[tokio::test]
    async fn test_empty_store_has_zero_pages() {
        let store = setup_test_store().await;
        let page = store.list_page(PageRequest::default()).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_all_kept() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("forms.db").display());
        let store = Arc::new(SqliteSubmissionStore::connect(&url).await.unwrap());

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.append(new_submission(&format!("Co{i}"))).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }

        let page = store.list_page(PageRequest::new(1, 100)).await.unwrap();
        assert_eq!(page.total, 20);
        assert_eq!(page.items.len(), 20);
        for id in &ids {
            assert!(page.items.iter().any(|s| &s.id == id));
        }
    }

    #[tokio::test]
    async fn test_reopening_file_database_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("nested/forms.db").display());

        let stored = {
            let store = SqliteSubmissionStore::connect(&url).await.unwrap();
            let stored = store.append(new_submission("Durable")).await.unwrap();
            store.pool().close().await;
            stored
        };

        let store = SqliteSubmissionStore::connect(&url).await.unwrap();
        let page = store.list_page(PageRequest::default()).await.unwrap();
        assert_eq!(page.items, vec![stored]);
    }
}
