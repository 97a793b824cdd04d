//! Shared types used across the codebase

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Days a stored submission lives before the store expires it
pub const RECORD_TTL_DAYS: i64 = 30;

/// Sentinel for request metadata the host could not supply
pub const UNKNOWN: &str = "unknown";

/// Contact form fields after validation: trimmed, email lower-cased
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Received,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Received => "received",
        }
    }
}

/// Best-effort caller details captured from the inbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: String,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            ip: UNKNOWN.to_string(),
            user_agent: UNKNOWN.to_string(),
        }
    }
}

/// Write-once record handed to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub submission_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub message: String,
    pub client_ip: String,
    pub user_agent: String,
    pub status: SubmissionStatus,
    /// Expiry instant as Unix epoch seconds
    pub ttl: i64,
}

impl SubmissionRecord {
    /// Build a fresh record. The id is random and never derived from content.
    pub fn new(submission: ValidatedSubmission, client: ClientInfo, now: DateTime<Utc>) -> Self {
        let ValidatedSubmission { name, email, message } = submission;
        Self {
            submission_id: Uuid::new_v4(),
            timestamp: now,
            name,
            email,
            message,
            client_ip: client.ip,
            user_agent: client.user_agent,
            status: SubmissionStatus::Received,
            ttl: (now + Duration::days(RECORD_TTL_DAYS)).timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn submission() -> ValidatedSubmission {
        ValidatedSubmission {
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            message: "This is a test message that is long enough.".to_string(),
        }
    }

    #[test]
    fn test_record_derived_fields() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let record = SubmissionRecord::new(submission(), ClientInfo::default(), now);

        assert_eq!(record.status, SubmissionStatus::Received);
        assert_eq!(record.client_ip, "unknown");
        assert_eq!(record.user_agent, "unknown");
        assert_eq!(record.timestamp, now);
        assert_eq!(record.ttl - now.timestamp(), 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_record_ids_are_unique() {
        let now = Utc::now();
        let a = SubmissionRecord::new(submission(), ClientInfo::default(), now);
        let b = SubmissionRecord::new(submission(), ClientInfo::default(), now);
        assert_ne!(a.submission_id, b.submission_id);
    }

    #[test]
    fn test_record_wire_shape() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let client = ClientInfo {
            ip: "203.0.113.7".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
        };
        let record = SubmissionRecord::new(submission(), client, now);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["submissionId"], json!(record.submission_id.to_string()));
        assert_eq!(value["timestamp"], json!("2024-01-01T12:00:00Z"));
        assert_eq!(value["clientIp"], json!("203.0.113.7"));
        assert_eq!(value["userAgent"], json!("Mozilla/5.0"));
        assert_eq!(value["status"], json!("received"));
        assert_eq!(value["ttl"], json!(1706702400));
    }
}
