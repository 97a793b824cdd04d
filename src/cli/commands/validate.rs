use anyhow::Context;
use serde_json::{json, Value};
use std::io::Read;

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::services::ClientInputError;
use crate::validation::{self, ValidationError};

pub fn handle(input: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let raw = read_input(input)?;

    match check(&raw) {
        Ok(normalized) => output_success(
            &output_format,
            "Submission passes all rules",
            Some(json!({ "submission": normalized })),
        ),
        Err(err) => {
            output_error(&output_format, &err.to_string(), Some(error_code(&err)))?;
            anyhow::bail!("submission rejected")
        }
    }
}

/// Same body handling as the endpoint: empty, malformed, then the rules
pub fn check(raw: &str) -> Result<Value, ClientInputError> {
    if raw.is_empty() {
        return Err(ClientInputError::MissingBody);
    }
    let value: Value = serde_json::from_str(raw).map_err(|_| ClientInputError::InvalidJson)?;
    let submission = validation::validate(&value)?;
    Ok(json!(submission))
}

fn error_code(err: &ClientInputError) -> &'static str {
    match err {
        ClientInputError::MissingBody => "missing_body",
        ClientInputError::InvalidJson => "invalid_json",
        ClientInputError::Invalid(rule) => ValidationError::rule(rule),
    }
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input))
    }
}
