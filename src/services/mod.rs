pub mod events;
pub mod signature;
pub mod slack_api;

pub use slack_api::{SlackService, USER_SCOPES};
