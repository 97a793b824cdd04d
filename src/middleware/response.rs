use axum::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};
use std::any::Any;
use uuid::Uuid;

use crate::error::ApiError;

pub const ALLOW_HEADERS: &str =
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";
pub const ALLOW_METHODS: &str = "POST,OPTIONS";

pub const PREFLIGHT_MESSAGE: &str = "CORS preflight successful";
pub const ACCEPTED_MESSAGE: &str = "Thank you for your message! I will get back to you soon.";

/// Body of a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAccepted {
    pub message: String,
    pub submission_id: String,
}

/// Builds every response the endpoint returns, each with the same CORS headers
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    allow_origin: HeaderValue,
}

impl ResponseBuilder {
    pub fn new(cors_origin: &str) -> Result<Self, axum::http::header::InvalidHeaderValue> {
        Ok(Self {
            allow_origin: HeaderValue::from_str(cors_origin)?,
        })
    }

    /// Stamp the CORS headers onto an existing header map
    pub fn apply_cors(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
    }

    pub fn json(&self, status: StatusCode, body: Value) -> Response {
        self.typed(status, body)
    }

    fn typed<T: Serialize>(&self, status: StatusCode, body: T) -> Response {
        let mut response = (status, Json(body)).into_response();
        self.apply_cors(response.headers_mut());
        response
    }

    pub fn preflight(&self) -> Response {
        self.json(StatusCode::OK, json!({ "message": PREFLIGHT_MESSAGE }))
    }

    pub fn accepted(&self, submission_id: Uuid) -> Response {
        let body = SubmissionAccepted {
            message: ACCEPTED_MESSAGE.to_string(),
            submission_id: submission_id.to_string(),
        };
        self.typed(StatusCode::OK, body)
    }

    pub fn error(&self, err: &ApiError) -> Response {
        self.json(err.status(), err.to_json())
    }

    /// Generic 500 for a handler that panicked. The panic payload is logged only.
    pub fn panic_response(&self, payload: Box<dyn Any + Send + 'static>) -> Response {
        let detail = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        tracing::error!(panic = %detail, "Request handler panicked");
        self.error(&ApiError::internal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::INTERNAL_ERROR_MESSAGE;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn assert_cors(response: &Response, origin: &str) {
        let headers = response.headers();
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], origin);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], ALLOW_HEADERS);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], ALLOW_METHODS);
    }

    #[tokio::test]
    async fn test_preflight_response() {
        let builder = ResponseBuilder::new("*").unwrap();
        let response = builder.preflight();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response, "*");
        assert_eq!(body_json(response).await, json!({ "message": PREFLIGHT_MESSAGE }));
    }

    #[tokio::test]
    async fn test_accepted_response() {
        let builder = ResponseBuilder::new("https://portfolio.example.com").unwrap();
        let id = Uuid::new_v4();
        let response = builder.accepted(id);

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response, "https://portfolio.example.com");
        let body = body_json(response).await;
        assert_eq!(body["message"], json!(ACCEPTED_MESSAGE));
        assert_eq!(body["submissionId"], json!(id.to_string()));
    }

    #[tokio::test]
    async fn test_error_response() {
        let builder = ResponseBuilder::new("*").unwrap();
        let response = builder.error(&ApiError::bad_request("Request body is required"));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_cors(&response, "*");
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Request body is required", "statusCode": 400 })
        );
    }

    #[tokio::test]
    async fn test_panic_response_is_generic() {
        let builder = ResponseBuilder::new("*").unwrap();
        let response = builder.panic_response(Box::new("store client exploded"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response, "*");
        let body = body_json(response).await;
        assert_eq!(body["error"], json!(INTERNAL_ERROR_MESSAGE));
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        assert!(ResponseBuilder::new("bad\norigin").is_err());
    }
}
