use async_trait::async_trait;
use std::sync::Mutex;

use super::notification::EmailNotification;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification rejected: {0}")]
    Rejected(String),
    #[error("Notification transport error: {0}")]
    Transport(String),
    #[error("Could not build notification: {0}")]
    Build(String),
}

/// Delivery of operator notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;

    async fn send(&self, notification: &EmailNotification) -> Result<(), NotifyError>;
}

/// Writes notifications to the log instead of delivering them
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, notification: &EmailNotification) -> Result<(), NotifyError> {
        tracing::info!(
            to = %notification.to,
            reply_to = %notification.reply_to,
            subject = %notification.subject,
            text_len = notification.text_body.len(),
            "Notification (not delivered)"
        );
        Ok(())
    }
}

/// Captures sent notifications in memory
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    outbox: Mutex<Vec<EmailNotification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<EmailNotification> {
        self.outbox.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.outbox.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn send(&self, notification: &EmailNotification) -> Result<(), NotifyError> {
        self.outbox
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification.clone());
        Ok(())
    }
}
