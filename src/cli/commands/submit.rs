use serde_json::json;
use std::time::Duration;

use crate::cli::client::ContactClient;
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;

pub async fn handle(
    url: &str,
    name: String,
    email: String,
    message: String,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let client = ContactClient::new(url, Duration::from_secs(30))?;
    let payload = json!({ "name": name, "email": email, "message": message });

    let response = client.submit(&payload).await?;

    if response.status.is_success() {
        let submission_id = response
            .body
            .get("submissionId")
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        output_success(
            &output_format,
            "Submission accepted",
            Some(json!({ "submissionId": submission_id, "status": response.status.as_u16() })),
        )
    } else {
        let code = response.status.as_u16().to_string();
        let message = match response.body.get("error").and_then(|v| v.as_str()) {
            Some(error) => error.to_string(),
            None => response.body.to_string(),
        };
        output_error(&output_format, &message, Some(&code))?;
        anyhow::bail!("submission failed with status {}", response.status)
    }
}
