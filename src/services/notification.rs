use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::config::ContactConfig;
use crate::types::SubmissionRecord;

pub const SUBJECT_PREFIX: &str = "Portfolio Contact Form: Message from";
const SENT_FROM: &str = "Portfolio Contact Form";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Operator notification for one accepted submission, in both renderings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailNotification {
    pub from: String,
    pub to: String,
    /// The submitter, so the operator can answer directly
    pub reply_to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

impl EmailNotification {
    pub fn for_submission(record: &SubmissionRecord, contact: &ContactConfig) -> Self {
        let fields = Fields {
            name: &record.name,
            email: &record.email,
            message: &record.message,
            submission_id: record.submission_id,
            sent_at: record.timestamp,
        };

        Self {
            from: contact.sender_email.clone(),
            to: contact.contact_email.clone(),
            reply_to: record.email.clone(),
            subject: format!("{SUBJECT_PREFIX} {}", record.name),
            html_body: render_html(&fields),
            text_body: render_text(&fields),
        }
    }
}

struct Fields<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    submission_id: Uuid,
    sent_at: DateTime<Utc>,
}

fn render_text(fields: &Fields<'_>) -> String {
    format!(
        "New Portfolio Contact Form Submission\n\
         \n\
         Name: {name}\n\
         Email: {email}\n\
         \n\
         Message:\n\
         {message}\n\
         \n\
         ---\n\
         Submission ID: {id}\n\
         Timestamp: {ts} UTC\n\
         Sent from: {SENT_FROM}\n",
        name = fields.name,
        email = fields.email,
        message = fields.message,
        id = fields.submission_id,
        ts = fields.sent_at.format(TIMESTAMP_FORMAT),
    )
}

// Submitter text is escaped; message line breaks survive as <br>.
fn render_html(fields: &Fields<'_>) -> String {
    let name = html_escape::encode_safe(fields.name);
    let email = html_escape::encode_safe(fields.email);
    let message = html_escape::encode_safe(fields.message)
        .replace("\r\n", "\n")
        .replace('\n', "<br>\n");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<style>
  body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
  .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
  .header {{ background: #146eb4; color: #fff; padding: 20px; border-radius: 8px 8px 0 0; }}
  .content {{ background: #f9f9f9; padding: 20px; border-radius: 0 0 8px 8px; }}
  .label {{ font-weight: bold; }}
  .value {{ background: #fff; padding: 10px; border-left: 4px solid #146eb4; margin-bottom: 15px; }}
  .footer {{ border-top: 1px solid #ddd; padding-top: 15px; font-size: 12px; color: #666; }}
</style>
</head>
<body>
<div class="container">
  <div class="header"><h2>New Portfolio Contact Form Submission</h2></div>
  <div class="content">
    <div class="label">Name:</div>
    <div class="value">{name}</div>
    <div class="label">Email:</div>
    <div class="value">{email}</div>
    <div class="label">Message:</div>
    <div class="value">{message}</div>
    <div class="footer">
      <p>Submission ID: {id}</p>
      <p>Timestamp: {ts} UTC</p>
      <p>Sent from: {SENT_FROM}</p>
    </div>
  </div>
</div>
</body>
</html>
"#,
        id = fields.submission_id,
        ts = fields.sent_at.format(TIMESTAMP_FORMAT),
    )
}
