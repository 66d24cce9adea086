// Slack integration middleware library
// Exposes modules for use in tests and the server binary

pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

pub use routes::build_router;

/// Shared application state
pub struct AppState {
    pub settings: config::Settings,
    pub slack: services::SlackService,
}

impl AppState {
    pub fn new(settings: config::Settings) -> Self {
        let slack = services::SlackService::new(settings.slack.clone());
        Self { settings, slack }
    }
}
