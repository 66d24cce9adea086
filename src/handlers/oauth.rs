//! OAuth2 HTTP handlers: authorization URL, code exchange, connection check.

use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::{AuthorizationResponse, PostAuthorizeResponse, VerifyConnectionResponse};
use crate::services::USER_SCOPES;
use crate::utils::logging::*;
use crate::utils::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CodeParams {
    code: Option<String>,
}

/// GET /authorize
///
/// Returns the Slack authorization URL the client should send the user to.
pub async fn authorize(State(state): State<Arc<AppState>>) -> Json<AuthorizationResponse> {
    log_request_received("/authorize", "GET");

    let authorization_url = state.slack.build_authorization_url(&USER_SCOPES);

    Json(AuthorizationResponse { authorization_url })
}

/// GET /post-authorize?code=
///
/// Exchanges the authorization code for a user access token and returns it
/// together with the authorizing user's id and team metadata.
pub async fn post_authorize(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CodeParams>,
) -> Result<Json<PostAuthorizeResponse>, AppError> {
    log_request_received("/post-authorize", "GET");

    let code = params.code.ok_or_else(|| {
        log_validation_error("code", "query parameter missing");
        AppError::MissingParameter("code".to_string())
    })?;

    let response = state.slack.exchange_code(&code).await?;

    Ok(Json(response))
}

/// GET /verify-connection?code=
///
/// Performs the same exchange but reports only a boolean; upstream errors
/// are swallowed into `false`.
pub async fn verify_connection(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CodeParams>,
) -> Result<Json<VerifyConnectionResponse>, AppError> {
    log_request_received("/verify-connection", "GET");

    let code = params.code.ok_or_else(|| {
        log_validation_error("code", "query parameter missing");
        AppError::MissingParameter("code".to_string())
    })?;

    let connection_verified = state.slack.verify_connection(&code).await;

    Ok(Json(VerifyConnectionResponse {
        connection_verified,
    }))
}
