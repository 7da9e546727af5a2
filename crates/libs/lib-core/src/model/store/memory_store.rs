//! # In-Memory Submission Store
//!
//! Non-durable backend for tests and local demos. Appends are serialized by the
//! write half of an `RwLock`; listings read under the read half, so each listing
//! sees one consistent snapshot.

use super::{newest_first, StoreError, SubmissionStore};
use crate::model::page::{slice_for, Page, PageRequest};
use crate::model::submission::{NewSubmission, Submission};
use async_trait::async_trait;
use lib_utils::now_utc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemorySubmissionStore {
    records: RwLock<Vec<Submission>>,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records, kept in the given insertion order.
    pub fn with_records(records: Vec<Submission>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissionStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn append(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
        let mut records = self.records.write().await;
        let record = Submission::create(submission, Uuid::new_v4().to_string(), now_utc());
        records.push(record.clone());
        Ok(record)
    }

    async fn list_page(&self, request: PageRequest) -> Result<Page<Submission>, StoreError> {
        let records = self.records.read().await;

        let mut ordered: Vec<(u64, Submission)> = records
            .iter()
            .enumerate()
            .map(|(seq, record)| (seq as u64, record.clone()))
            .collect();
        ordered.sort_by(newest_first);

        let items = slice_for(&ordered, request)
            .into_iter()
            .map(|(_, record)| record)
            .collect();

        Ok(Page::new(items, request, records.len() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;

    fn new_submission(company: &str) -> NewSubmission {
        NewSubmission {
            company_name: company.to_string(),
            email: "ops@example.com".to_string(),
            phone: None,
            industry: "retail".to_string(),
            challenges: "growth".to_string(),
            goals: "scale".to_string(),
        }
    }

    fn record_at(id: &str, minutes: i64) -> Submission {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        Submission::create(new_submission(id), id.to_string(), base + Duration::minutes(minutes))
    }

    #[tokio::test]
    async fn test_orders_by_created_at_then_insertion() {
        let store = MemorySubmissionStore::with_records(vec![
            record_at("b", 10),
            record_at("a", 0),
            record_at("c", 10),
            record_at("d", 30),
        ]);

        let page = store.list_page(PageRequest::default()).await.unwrap();
        let ids: Vec<&str> = page.items.iter().map(|s| s.id.as_str()).collect();

        assert_eq!(ids, vec!["d", "c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_pages_sum_to_total() {
        let store = MemorySubmissionStore::new();
        for i in 0..23 {
            store.append(new_submission(&format!("Co{i}"))).await.unwrap();
        }

        let first = store.list_page(PageRequest::new(1, 7)).await.unwrap();
        assert_eq!(first.total_pages, 4);

        let mut seen = 0;
        for page in 1..=first.total_pages {
            let page = store.list_page(PageRequest::new(page as i64, 7)).await.unwrap();
            assert_eq!(page.total, 23);
            seen += page.items.len();
        }
        assert_eq!(seen, 23);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_all_kept() {
        let store = Arc::new(MemorySubmissionStore::new());

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.append(new_submission(&format!("Co{i}"))).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.len().await, 20);
        let page = store.list_page(PageRequest::new(1, 100)).await.unwrap();
        assert_eq!(page.items.len(), 20);
    }
}
