use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    authorize, get_apps, get_users, health_check, post_authorize, slack_events, verify_connection,
};
use crate::AppState;

/// Builds the application router with all integration endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/authorize", get(authorize))
        .route("/post-authorize", get(post_authorize))
        .route("/get-users", get(get_users))
        .route("/get-apps/:org_id", get(get_apps))
        .route("/verify-connection", get(verify_connection))
        .route("/slack-events", post(slack_events))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
