//! Post-deployment smoke checks for a contact endpoint.

use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

use crate::cli::client::{ContactClient, EndpointResponse};
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;

/// One rejection the endpoint must produce: payload plus the words the
/// error message has to contain (any of them).
struct RejectionCase {
    name: &'static str,
    payload: Value,
    expect_any: &'static [&'static str],
}

fn rejection_cases() -> Vec<RejectionCase> {
    vec![
        RejectionCase {
            name: "missing name is rejected",
            payload: json!({ "email": "test@example.com", "message": "Test message without name" }),
            expect_any: &["name"],
        },
        RejectionCase {
            name: "invalid email is rejected",
            payload: json!({
                "name": "Test User",
                "email": "invalid-email",
                "message": "Test message with invalid email"
            }),
            expect_any: &["email"],
        },
        RejectionCase {
            name: "short message is rejected",
            payload: json!({ "name": "Test User", "email": "test@example.com", "message": "Short" }),
            expect_any: &["message", "character"],
        },
        RejectionCase {
            name: "spam is rejected",
            payload: json!({
                "name": "Spam User",
                "email": "spam@example.com",
                "message": "Buy viagra now! Amazing casino deals and bitcoin opportunities!"
            }),
            expect_any: &["spam"],
        },
    ]
}

/// Outcome of a single check
#[derive(Debug)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, passed: true, detail: detail.into() }
    }

    fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, passed: false, detail: detail.into() }
    }
}

pub fn check_preflight(response: &EndpointResponse) -> CheckResult {
    const NAME: &str = "preflight returns CORS headers";

    if !matches!(response.status, StatusCode::OK | StatusCode::NO_CONTENT) {
        return CheckResult::fail(NAME, format!("status {}", response.status));
    }
    for header in ["access-control-allow-origin", "access-control-allow-methods"] {
        if !response.has_header(header) {
            return CheckResult::fail(NAME, format!("missing {header}"));
        }
    }
    CheckResult::pass(NAME, format!("status {}", response.status))
}

fn check_rejection(case: &RejectionCase, response: &EndpointResponse) -> CheckResult {
    if response.status != StatusCode::BAD_REQUEST {
        return CheckResult::fail(case.name, format!("expected 400, got {}", response.status));
    }
    let error = response.error_text();
    if case.expect_any.iter().any(|word| error.contains(word)) {
        CheckResult::pass(case.name, error)
    } else {
        CheckResult::fail(
            case.name,
            format!("error {:?} mentions none of {:?}", error, case.expect_any),
        )
    }
}

pub fn check_accepted(response: &EndpointResponse) -> CheckResult {
    const NAME: &str = "valid submission is accepted";

    if response.status != StatusCode::OK {
        return CheckResult::fail(NAME, format!("expected 200, got {}", response.status));
    }
    match response.body.get("submissionId").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => CheckResult::pass(NAME, format!("submissionId {id}")),
        _ => CheckResult::fail(NAME, "response has no submissionId"),
    }
}

pub async fn handle(
    url: &str,
    submit: bool,
    timeout_secs: u64,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let client = ContactClient::new(url, Duration::from_secs(timeout_secs))?;
    tracing::info!(url = %client.url(), "Checking contact endpoint");

    let mut results = vec![check_preflight(&client.preflight().await?)];

    for case in rejection_cases() {
        let response = client.submit(&case.payload).await?;
        results.push(check_rejection(&case, &response));
    }

    if submit {
        let payload = json!({
            "name": format!("Smoke Test {}", chrono::Utc::now().to_rfc3339()),
            "email": "smoke-test@example.com",
            "message": "This is an automated smoke test message. Please ignore."
        });
        results.push(check_accepted(&client.submit(&payload).await?));
    }

    let failed = results.iter().filter(|r| !r.passed).count();

    match output_format {
        OutputFormat::Json => {
            let checks: Vec<Value> = results
                .iter()
                .map(|r| json!({ "check": r.name, "passed": r.passed, "detail": r.detail }))
                .collect();
            if failed == 0 {
                output_success(&output_format, "All checks passed", Some(json!({ "checks": checks })))?;
            } else {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({ "success": false, "checks": checks }))?
                );
            }
        }
        OutputFormat::Text => {
            for r in &results {
                let mark = if r.passed { "✓" } else { "✗" };
                println!("{} {} ({})", mark, r.name, r.detail);
            }
            if failed > 0 {
                output_error(
                    &output_format,
                    &format!("{} of {} checks failed", failed, results.len()),
                    None,
                )?;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} check(s) failed against {}", failed, url);
    }
    Ok(())
}
