use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_CORS_ORIGIN: &str = "*";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub contact: ContactConfig,
    pub store: StoreConfig,
    pub notifier: NotifierConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Operator mailbox that receives every notification
    pub contact_email: String,
    /// `From` address of notifications; falls back to `contact_email`
    pub sender_email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    Memory,
    DynamoDb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub table: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifierBackend {
    Log,
    Ses,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    pub backend: NotifierBackend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    pub max_body_bytes: usize,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let contact_email = get("CONTACT_EMAIL").ok_or(ConfigError::Missing("CONTACT_EMAIL"))?;
        if !contact_email.contains('@') {
            return Err(ConfigError::Invalid {
                name: "CONTACT_EMAIL",
                value: contact_email,
            });
        }
        let sender_email = get("SENDER_EMAIL").unwrap_or_else(|| contact_email.clone());

        // DYNAMODB_TABLE is the name used by existing deployments
        let table = get("STORE_TABLE")
            .or_else(|| get("DYNAMODB_TABLE"))
            .ok_or(ConfigError::Missing("STORE_TABLE"))?;

        let store_backend = match get("STORE_BACKEND").as_deref() {
            None | Some("memory") => StoreBackend::Memory,
            Some("dynamodb") | Some("dynamo") => StoreBackend::DynamoDb,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "STORE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let notifier_backend = match get("NOTIFIER_BACKEND").as_deref() {
            None | Some("log") => NotifierBackend::Log,
            Some("ses") => NotifierBackend::Ses,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "NOTIFIER_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let port = match get("CONTACT_API_PORT").or_else(|| get("PORT")) {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: v,
            })?,
            None => DEFAULT_PORT,
        };

        let max_body_bytes = match get("MAX_BODY_BYTES") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                name: "MAX_BODY_BYTES",
                value: v,
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            contact: ContactConfig {
                contact_email,
                sender_email,
            },
            store: StoreConfig {
                backend: store_backend,
                table,
            },
            notifier: NotifierConfig {
                backend: notifier_backend,
            },
            api: ApiConfig {
                port,
                cors_origin: get("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
                max_body_bytes,
            },
        })
    }

    /// In-memory backends with the given operator address, for local runs and tests
    pub fn development(contact_email: &str) -> Self {
        Self {
            contact: ContactConfig {
                contact_email: contact_email.to_string(),
                sender_email: contact_email.to_string(),
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                table: "contact-submissions".to_string(),
            },
            notifier: NotifierConfig {
                backend: NotifierBackend::Log,
            },
            api: ApiConfig {
                port: DEFAULT_PORT,
                cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
                max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            },
        }
    }
}
