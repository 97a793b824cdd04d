pub mod contact_service;
pub mod notification;
pub mod notifier;
pub mod store;

#[cfg(feature = "aws")]
pub mod aws;

pub use contact_service::{ClientInputError, ContactService, SubmitError};
pub use notification::EmailNotification;
pub use notifier::{LogNotifier, MemoryNotifier, NotifyError, Notifier};
pub use store::{MemoryStore, StoreError, SubmissionStore};

use std::sync::Arc;

use crate::config::{AppConfig, NotifierBackend, StoreBackend};

/// Store and notifier handles, created once per process
#[derive(Clone)]
pub struct Ports {
    pub store: Arc<dyn SubmissionStore>,
    pub notifier: Arc<dyn Notifier>,
}

impl Ports {
    /// Build the backends selected in `config`
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        #[cfg(feature = "aws")]
        let sdk_config = if config.store.backend == StoreBackend::DynamoDb
            || config.notifier.backend == NotifierBackend::Ses
        {
            Some(aws::load_sdk_config().await)
        } else {
            None
        };

        let store: Arc<dyn SubmissionStore> = match config.store.backend {
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; submissions are lost on restart");
                Arc::new(MemoryStore::new())
            }
            #[cfg(feature = "aws")]
            StoreBackend::DynamoDb => match &sdk_config {
                Some(sdk) => Arc::new(aws::DynamoStore::new(sdk, config.store.table.clone())),
                None => anyhow::bail!("AWS configuration was not loaded"),
            },
            #[cfg(not(feature = "aws"))]
            StoreBackend::DynamoDb => {
                anyhow::bail!("STORE_BACKEND=dynamodb requires building with the `aws` feature")
            }
        };

        let notifier: Arc<dyn Notifier> = match config.notifier.backend {
            NotifierBackend::Log => Arc::new(LogNotifier),
            #[cfg(feature = "aws")]
            NotifierBackend::Ses => match &sdk_config {
                Some(sdk) => Arc::new(aws::SesNotifier::new(sdk)),
                None => anyhow::bail!("AWS configuration was not loaded"),
            },
            #[cfg(not(feature = "aws"))]
            NotifierBackend::Ses => {
                anyhow::bail!("NOTIFIER_BACKEND=ses requires building with the `aws` feature")
            }
        };

        tracing::info!(
            store = store.name(),
            notifier = notifier.name(),
            table = %config.store.table,
            "Ports initialized"
        );

        Ok(Self { store, notifier })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_ports_are_local() {
        let config = AppConfig::development("owner@example.com");
        let ports = Ports::from_config(&config).await.unwrap();
        assert_eq!(ports.store.name(), "memory");
        assert_eq!(ports.notifier.name(), "log");
    }

    #[cfg(not(feature = "aws"))]
    #[tokio::test]
    async fn test_aws_backends_need_feature() {
        let mut config = AppConfig::development("owner@example.com");
        config.store.backend = StoreBackend::DynamoDb;
        assert!(Ports::from_config(&config).await.is_err());
    }
}
