// handlers/contact.rs - the contact form endpoint

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::Response,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::types::ClientInfo;

/// POST /contact - accept a contact form submission
///
/// Expected input:
/// ```json
/// { "name": "string", "email": "string", "message": "string" }
/// ```
///
/// 200 `{message, submissionId}` on success, 400 `{error, statusCode}` for a
/// missing body, malformed JSON or a failed rule, 500 with a generic message
/// when the store or notifier fails.
pub async fn contact_post(
    State(state): State<AppState>,
    client: ClientInfo,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return state.responses.error(&ApiError::payload_too_large());
        }
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Could not read request body");
            return state.responses.error(&ApiError::bad_request("Request body is required"));
        }
    };

    match state.service.submit(&body, client).await {
        Ok(submission_id) => state.responses.accepted(submission_id),
        Err(err) => state.responses.error(&ApiError::from(err)),
    }
}

/// OPTIONS /contact - CORS preflight, no further processing
pub async fn contact_options(State(state): State<AppState>) -> Response {
    state.responses.preflight()
}

/// Any other method on the contact route
pub async fn method_not_allowed(State(state): State<AppState>) -> Response {
    state.responses.error(&ApiError::method_not_allowed())
}

/// Unknown paths
pub async fn not_found(State(state): State<AppState>) -> Response {
    state.responses.error(&ApiError::not_found())
}
