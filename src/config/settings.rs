use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub slack: SlackSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SlackSettings {
    /// OAuth2 app credentials registered with Slack
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Secret used to verify inbound event signatures
    pub signing_secret: String,
    /// REST API base, e.g. "https://slack.com/api/"
    pub api_base_url: String,
    /// OAuth2 authorize page, e.g. "https://slack.com/oauth/v2/authorize"
    pub authorize_url: String,
    /// Directory where files from file_shared events are written
    pub download_dir: String,
}

impl Settings {
    /// Loads configuration from optional config files plus the environment.
    ///
    /// CLIENT_ID, CLIENT_SECRET, REDIRECT_URI and SIGNING_SECRET must be
    /// present (env or file); startup fails otherwise.
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("slack.api_base_url", "https://slack.com/api/")?
            .set_default("slack.authorize_url", "https://slack.com/oauth/v2/authorize")?
            .set_default("slack.download_dir", "downloads")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        if let Ok(client_id) = std::env::var("CLIENT_ID") {
            builder = builder.set_override("slack.client_id", client_id)?;
        }
        if let Ok(client_secret) = std::env::var("CLIENT_SECRET") {
            builder = builder.set_override("slack.client_secret", client_secret)?;
        }
        if let Ok(redirect_uri) = std::env::var("REDIRECT_URI") {
            builder = builder.set_override("slack.redirect_uri", redirect_uri)?;
        }
        if let Ok(signing_secret) = std::env::var("SIGNING_SECRET") {
            builder = builder.set_override("slack.signing_secret", signing_secret)?;
        }
        if let Ok(download_dir) = std::env::var("DOWNLOAD_DIR") {
            builder = builder.set_override("slack.download_dir", download_dir)?;
        }

        let s = builder.build()?;

        s.try_deserialize()
    }
}

/// Settings preset pointed at a mock upstream; used across the unit tests.
#[cfg(test)]
pub(crate) fn test_settings(api_base_url: &str) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        slack: SlackSettings {
            client_id: "test-client-id".to_string(),
            client_secret: "test-client-secret".to_string(),
            redirect_uri: "https://example.com/callback".to_string(),
            signing_secret: "test-signing-secret".to_string(),
            api_base_url: api_base_url.to_string(),
            authorize_url: "https://slack.com/oauth/v2/authorize".to_string(),
            download_dir: "downloads".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_fail_without_credentials() {
        // No CLIENT_ID/CLIENT_SECRET in the test environment and no config
        // files on disk, so deserialization must fail on the missing fields.
        for var in ["CLIENT_ID", "CLIENT_SECRET", "REDIRECT_URI", "SIGNING_SECRET"] {
            std::env::remove_var(var);
        }
        let result = Settings::new();
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_shape() {
        let settings = test_settings("https://slack.com/api/");
        assert_eq!(settings.slack.api_base_url, "https://slack.com/api/");
        assert_eq!(settings.slack.download_dir, "downloads");
    }
}
