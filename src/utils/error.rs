use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Slack returned `ok: false` or a non-200 status; carries the upstream error string
    SlackApi(String),
    /// Required request parameter is absent
    MissingParameter(String),
    /// Bearer token header is absent
    MissingToken,
    /// Webhook signature did not match
    InvalidSignature,
    ConfigError(String),
    JsonError(serde_json::Error),
    HttpError(reqwest::Error),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::SlackApi(msg) => write!(f, "Slack API error: {}", msg),
            AppError::MissingParameter(field) => write!(f, "Missing required parameter: {}", field),
            AppError::MissingToken => write!(f, "Authentication token is missing"),
            AppError::InvalidSignature => write!(f, "Event not from Slack!"),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::JsonError(err) => write!(f, "JSON error: {}", err),
            AppError::HttpError(err) => write!(f, "HTTP error: {}", err),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonError(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::HttpError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::SlackApi(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::MissingParameter(field) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Missing required parameter: {}", field),
            ),
            AppError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Authentication token is missing".to_string(),
            ),
            AppError::InvalidSignature => {
                (StatusCode::FORBIDDEN, "Event not from Slack!".to_string())
            }
            AppError::ConfigError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::JsonError(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::HttpError(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = json!({
            "error": error_message,
            "status": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases: Vec<(AppError, StatusCode)> = vec![
            (
                AppError::SlackApi("invalid_code".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::MissingParameter("code".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::MissingToken, StatusCode::UNAUTHORIZED),
            (AppError::InvalidSignature, StatusCode::FORBIDDEN),
            (
                AppError::InternalError("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_display_carries_upstream_error() {
        let err = AppError::SlackApi("invalid_auth".to_string());
        assert_eq!(err.to_string(), "Slack API error: invalid_auth");
    }
}
