//! Background handling of Slack Events API payloads.
//!
//! Runs after the webhook response has already been returned, so every
//! failure here is logged only: there is no caller left to report to, no
//! retry and no redelivery.

use serde_json::Value;
use std::path::Path;

use crate::services::SlackService;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

/// Processes one event envelope. Only `file_shared` events are acted on:
/// fetch the file metadata, download the private content with the stored
/// token and write it under the download directory as `<file_id>.<filetype>`.
pub async fn process_event(slack: &SlackService, payload: &Value) -> AppResult<()> {
    let event = match payload.get("event") {
        Some(event) => event,
        None => return Ok(()),
    };

    if event.get("type").and_then(|v| v.as_str()) != Some("file_shared") {
        return Ok(());
    }

    let file_id = event
        .get("file_id")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    let user_id = event.get("user_id").and_then(|v| v.as_str()).unwrap_or_default();
    let event_ts = event.get("event_ts").and_then(|v| v.as_str()).unwrap_or_default();

    log_info(&format!(
        "📎 file_shared event - FileID: {}, UserID: {}, Timestamp: {}",
        file_id, user_id, event_ts
    ));

    // Without a token from a previous authorization the event is dropped
    // silently; there is nothing to fetch the file with.
    let token = match slack.access_token().await {
        Some(token) => token,
        None => {
            log_warning("⚠️ file_shared event dropped: no access token held");
            return Ok(());
        }
    };

    let file_response = slack
        .call("files.info", &token, &[("file", &file_id)])
        .await?;
    let file_data = file_response.get("file").cloned().unwrap_or(Value::Null);

    log_info(&format!(
        "File info - User: {:?}, FileSize: {:?}, FileType: {:?}, Timestamp: {:?}",
        file_data.get("user"),
        file_data.get("size"),
        file_data.get("filetype"),
        file_data.get("timestamp"),
    ));

    let download_url = file_data
        .get("url_private_download")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    let file_type = file_data
        .get("filetype")
        .and_then(|v| v.as_str())
        .unwrap_or("bin");

    let content = slack.download(download_url, &token).await?;

    let download_dir = &slack.settings().download_dir;
    tokio::fs::create_dir_all(download_dir).await.map_err(|e| {
        AppError::InternalError(format!("Failed to create download dir: {}", e))
    })?;

    let file_path = Path::new(download_dir).join(format!("{}.{}", file_id, file_type));
    tokio::fs::write(&file_path, &content).await.map_err(|e| {
        AppError::InternalError(format!("Failed to write file: {}", e))
    })?;

    log_file_saved(&file_path.display().to_string());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::test_settings;
    use httpmock::prelude::*;
    use serde_json::json;

    fn service_for(server: &MockServer, download_dir: &str) -> SlackService {
        let mut settings = test_settings(&format!("{}/", server.base_url()));
        settings.slack.download_dir = download_dir.to_string();
        SlackService::new(settings.slack)
    }

    #[tokio::test]
    async fn test_non_file_event_is_ignored() {
        let server = MockServer::start_async().await;
        let api = server
            .mock_async(|when, then| {
                when.method(GET).path("/files.info");
                then.status(200).json_body(json!({"ok": true}));
            })
            .await;

        let service = service_for(&server, "unused");
        service.set_access_token("xoxp-token".to_string()).await;

        let payload = json!({"event": {"type": "message", "text": "hi"}});
        process_event(&service, &payload).await.unwrap();

        assert_eq!(api.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_event_without_token_is_dropped() {
        let server = MockServer::start_async().await;
        let api = server
            .mock_async(|when, then| {
                when.method(GET).path("/files.info");
                then.status(200).json_body(json!({"ok": true}));
            })
            .await;

        let service = service_for(&server, "unused");
        let payload = json!({
            "event": {"type": "file_shared", "file_id": "F123", "user_id": "U1", "event_ts": "1"}
        });

        // No token stored: drops quietly, never reaches the API
        process_event(&service, &payload).await.unwrap();
        assert_eq!(api.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_file_shared_event_downloads_and_saves() {
        let server = MockServer::start_async().await;
        let download_url = format!("{}/files-pri/F123/download", server.base_url());

        let info = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/files.info")
                    .query_param("file", "F123")
                    .header("authorization", "Bearer xoxp-token");
                then.status(200).json_body(json!({
                    "ok": true,
                    "file": {
                        "id": "F123",
                        "user": "U1",
                        "size": 11,
                        "filetype": "txt",
                        "timestamp": 1700000000,
                        "url_private_download": download_url
                    }
                }));
            })
            .await;
        let download = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/files-pri/F123/download")
                    .header("authorization", "Bearer xoxp-token");
                then.status(200).body("hello files");
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let service = service_for(&server, dir.path().to_str().unwrap());
        service.set_access_token("xoxp-token".to_string()).await;

        let payload = json!({
            "event": {"type": "file_shared", "file_id": "F123", "user_id": "U1", "event_ts": "1"}
        });
        process_event(&service, &payload).await.unwrap();

        info.assert_async().await;
        download.assert_async().await;

        let saved = tokio::fs::read(dir.path().join("F123.txt")).await.unwrap();
        assert_eq!(saved, b"hello files");
    }

    #[tokio::test]
    async fn test_failed_download_is_an_error_for_the_logger_only() {
        let server = MockServer::start_async().await;
        let download_url = format!("{}/files-pri/F9/download", server.base_url());

        server
            .mock_async(|when, then| {
                when.method(GET).path("/files.info");
                then.status(200).json_body(json!({
                    "ok": true,
                    "file": {
                        "filetype": "png",
                        "url_private_download": download_url
                    }
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/files-pri/F9/download");
                then.status(403);
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let service = service_for(&server, dir.path().to_str().unwrap());
        service.set_access_token("xoxp-token".to_string()).await;

        let payload = json!({"event": {"type": "file_shared", "file_id": "F9"}});
        let result = process_event(&service, &payload).await;

        assert!(result.is_err());
        assert!(!dir.path().join("F9.png").exists());
    }
}
