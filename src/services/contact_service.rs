use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use super::notification::EmailNotification;
use super::notifier::{NotifyError, Notifier};
use super::store::{StoreError, SubmissionStore};
use crate::config::ContactConfig;
use crate::types::{ClientInfo, SubmissionRecord};
use crate::validation::{self, ValidationError};

/// Problems with what the caller sent. Messages are safe to return as-is.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ClientInputError {
    #[error("Request body is required")]
    MissingBody,
    #[error("Invalid JSON in request body")]
    InvalidJson,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Client(#[from] ClientInputError),
    #[error("store: {0}")]
    Store(#[from] StoreError),
    #[error("notify: {0}")]
    Notify(#[from] NotifyError),
}

/// Accepts contact submissions: parse, validate, persist, notify.
///
/// Holds no per-request state. The ports are built once at start-up and
/// shared across concurrent requests.
pub struct ContactService {
    store: Arc<dyn SubmissionStore>,
    notifier: Arc<dyn Notifier>,
    contact: ContactConfig,
}

impl ContactService {
    pub fn new(
        store: Arc<dyn SubmissionStore>,
        notifier: Arc<dyn Notifier>,
        contact: ContactConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            contact,
        }
    }

    /// Process one raw request body.
    ///
    /// Parse and validation failures return before any side effect. Otherwise
    /// exactly one record is written, and the notification is attempted only
    /// after the write succeeds. Repeated calls with the same body produce
    /// separate records.
    #[tracing::instrument(
        name = "contact_submit",
        skip(self, body, client),
        fields(client_ip = %client.ip, submission_id = tracing::field::Empty)
    )]
    pub async fn submit(&self, body: &[u8], client: ClientInfo) -> Result<Uuid, SubmitError> {
        if body.is_empty() {
            return Err(ClientInputError::MissingBody.into());
        }

        let input: Value =
            serde_json::from_slice(body).map_err(|_| ClientInputError::InvalidJson)?;

        let submission = validation::validate(&input).map_err(|err| {
            tracing::warn!(rule = err.rule(), "Submission rejected: {}", err);
            ClientInputError::from(err)
        })?;

        let record = SubmissionRecord::new(submission, client, Utc::now());
        let submission_id = record.submission_id;
        tracing::Span::current().record("submission_id", tracing::field::display(submission_id));

        let notification = EmailNotification::for_submission(&record, &self.contact);

        self.store.save(record).await?;
        tracing::debug!(store = self.store.name(), "Submission stored");

        self.notifier.send(&notification).await?;
        tracing::debug!(notifier = self.notifier.name(), "Notification sent");

        tracing::info!("Submission accepted");
        Ok(submission_id)
    }
}
