//! Directory endpoints: paged user listing and the (stubbed) app listing.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Json;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::{AppsResponse, UserRecord, UsersPageResponse};
use crate::utils::logging::*;
use crate::utils::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UsersPageParams {
    page_token: Option<String>,
}

/// GET /get-users?page_token=
///
/// Requires the caller's bearer token in the `auth-token` header; forwards
/// the page token as Slack's `cursor` and normalizes each member entry.
pub async fn get_users(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<UsersPageParams>,
) -> Result<Json<UsersPageResponse>, AppError> {
    log_request_received("/get-users", "GET");

    let auth_token = headers
        .get("auth-token")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::MissingToken)?
        .to_string();

    let page_token = params.page_token.ok_or_else(|| {
        log_validation_error("page_token", "query parameter missing");
        AppError::MissingParameter("page_token".to_string())
    })?;

    let response = state
        .slack
        .call("users.list", &auth_token, &[("cursor", &page_token)])
        .await?;

    let users: Vec<UserRecord> = response
        .get("members")
        .and_then(|v| v.as_array())
        .map(|members| members.iter().map(UserRecord::from_member).collect())
        .unwrap_or_default();

    let next_page_token = response
        .get("response_metadata")
        .and_then(|m| m.get("next_cursor"))
        .and_then(|v| v.as_str())
        .filter(|cursor| !cursor.is_empty())
        .map(|cursor| cursor.to_string());

    log_info(&format!("📄 users.list page fetched: {} users", users.len()));

    Ok(Json(UsersPageResponse {
        users,
        page_token: Some(page_token),
        next_page_token,
    }))
}

/// GET /get-apps/:org_id
///
/// Listing installed apps needs an admin-scoped app, which this integration
/// does not have; the contract is an empty list.
pub async fn get_apps(Path(org_id): Path<String>) -> Json<AppsResponse> {
    log_request_received("/get-apps", "GET");
    log_info(&format!("App listing requested for org {}", org_id));

    Json(AppsResponse { apps: vec![] })
}
