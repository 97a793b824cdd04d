//! DynamoDB record store and SES notifier, enabled with the `aws` feature.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};

use super::notification::EmailNotification;
use super::notifier::{NotifyError, Notifier};
use super::store::{StoreError, SubmissionStore};
use crate::types::SubmissionRecord;

const CHARSET: &str = "UTF-8";

/// Load region and credentials from the standard AWS provider chain
pub async fn load_sdk_config() -> aws_config::SdkConfig {
    aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await
}

/// Puts each record as one item; the table's TTL attribute is `ttl`
pub struct DynamoStore {
    client: aws_sdk_dynamodb::Client,
    table: String,
}

impl DynamoStore {
    pub fn new(sdk_config: &aws_config::SdkConfig, table: impl Into<String>) -> Self {
        Self {
            client: aws_sdk_dynamodb::Client::new(sdk_config),
            table: table.into(),
        }
    }
}

#[async_trait]
impl SubmissionStore for DynamoStore {
    fn name(&self) -> &'static str {
        "dynamodb"
    }

    async fn save(&self, record: SubmissionRecord) -> Result<(), StoreError> {
        let submission_id = record.submission_id.to_string();

        self.client
            .put_item()
            .table_name(&self.table)
            .item("submissionId", AttributeValue::S(submission_id.clone()))
            .item("timestamp", AttributeValue::S(record.timestamp.to_rfc3339()))
            .item("name", AttributeValue::S(record.name))
            .item("email", AttributeValue::S(record.email))
            .item("message", AttributeValue::S(record.message))
            .item("clientIp", AttributeValue::S(record.client_ip))
            .item("userAgent", AttributeValue::S(record.user_agent))
            .item("status", AttributeValue::S(record.status.as_str().to_string()))
            .item("ttl", AttributeValue::N(record.ttl.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Rejected {
                submission_id,
                reason: aws_sdk_dynamodb::error::DisplayErrorContext(&e).to_string(),
            })?;

        Ok(())
    }
}

pub struct SesNotifier {
    client: aws_sdk_sesv2::Client,
}

impl SesNotifier {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_sesv2::Client::new(sdk_config),
        }
    }
}

fn content(data: &str) -> Result<Content, NotifyError> {
    Content::builder()
        .data(data)
        .charset(CHARSET)
        .build()
        .map_err(|e| NotifyError::Build(e.to_string()))
}

#[async_trait]
impl Notifier for SesNotifier {
    fn name(&self) -> &'static str {
        "ses"
    }

    async fn send(&self, notification: &EmailNotification) -> Result<(), NotifyError> {
        let body = Body::builder()
            .html(content(&notification.html_body)?)
            .text(content(&notification.text_body)?)
            .build();

        let message = Message::builder()
            .subject(content(&notification.subject)?)
            .body(body)
            .build();

        self.client
            .send_email()
            .from_email_address(&notification.from)
            .destination(
                Destination::builder()
                    .to_addresses(&notification.to)
                    .build(),
            )
            .reply_to_addresses(&notification.reply_to)
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| {
                NotifyError::Transport(aws_sdk_sesv2::error::DisplayErrorContext(&e).to_string())
            })?;

        Ok(())
    }
}
