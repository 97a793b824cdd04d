use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

use crate::types::SubmissionRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),
    #[error("Store rejected record {submission_id}: {reason}")]
    Rejected { submission_id: String, reason: String },
}

/// Write-once persistence for accepted submissions.
///
/// Records are keyed by `submission_id` and expire on their own at `ttl`;
/// nothing here reads them back.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;

    /// Persist one record. Ownership passes to the store.
    async fn save(&self, record: SubmissionRecord) -> Result<(), StoreError>;
}

/// Process-local store used for development runs and tests.
///
/// Expired records are dropped on each write, so the default backend stays bounded
/// by the submissions of the last TTL window.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<SubmissionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything saved so far, in write order
    pub fn records(&self) -> Vec<SubmissionRecord> {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn save(&self, record: SubmissionRecord) -> Result<(), StoreError> {
        tracing::debug!(submission_id = %record.submission_id, "Saving submission in memory");
        let now = Utc::now().timestamp();
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());

        let before = records.len();
        records.retain(|r| r.ttl > now);
        let expired = before - records.len();
        if expired > 0 {
            tracing::debug!(expired, "Dropped expired submissions");
        }

        // A record that arrives already expired is not kept either
        if record.ttl > now {
            records.push(record);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClientInfo, ValidatedSubmission};
    use chrono::{DateTime, Duration};

    fn record(name: &str) -> SubmissionRecord {
        record_at(name, Utc::now())
    }

    fn record_at(name: &str, created: DateTime<Utc>) -> SubmissionRecord {
        SubmissionRecord::new(
            ValidatedSubmission {
                name: name.to_string(),
                email: "someone@example.com".to_string(),
                message: "A message long enough to be stored.".to_string(),
            },
            ClientInfo::default(),
            created,
        )
    }

    #[tokio::test]
    async fn test_memory_store_keeps_write_order() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.save(record("first")).await.unwrap();
        store.save(record("second")).await.unwrap();

        let names: Vec<_> = store.records().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_memory_store_drops_expired_records() {
        let store = MemoryStore::new();

        store.save(record_at("stale", Utc::now() - Duration::days(365))).await.unwrap();
        store.save(record("fresh")).await.unwrap();

        let names: Vec<_> = store.records().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["fresh"]);
    }

    #[tokio::test]
    async fn test_memory_store_evicts_on_later_write() {
        let store = MemoryStore::new();
        let mut aging = record("aging");
        aging.ttl = Utc::now().timestamp() + 3600;
        store.save(aging).await.unwrap();
        assert_eq!(store.len(), 1);

        // Simulate the TTL passing while the record sits in the store
        store.records.lock().unwrap()[0].ttl = Utc::now().timestamp() - 1;
        store.save(record("next")).await.unwrap();

        let names: Vec<_> = store.records().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["next"]);
    }
}
