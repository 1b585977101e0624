use async_trait::async_trait;
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::app_config::TranscriptionConfig;
use crate::errors::TranscriptionError;
use crate::providers::Transcriber;

/// Client for the remote transcription server
///
/// The server accepts a multipart video upload on `POST {endpoint}/upload`
/// and answers with a JSON body carrying the finished SRT document.
#[derive(Debug)]
pub struct RemoteTranscriber {
    /// Base URL of the service
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds, doubled on each retry
    backoff_base_ms: u64,
}

/// Response body of the upload endpoint
#[derive(Debug, Deserialize)]
pub struct TranscriptionResponse {
    /// Finished subtitle document in SRT format
    #[serde(rename = "srtContent")]
    pub srt_content: String,
}

impl RemoteTranscriber {
    /// Create a new client from the transcription configuration
    pub fn new(config: &TranscriptionConfig) -> Self {
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            max_retries: config.max_retries,
            backoff_base_ms: config.backoff_base_ms,
        }
    }

    /// Create a client from a complete URL with default retry settings
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            endpoint: url.into().trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(300))
                .build()
                .unwrap_or_default(),
            max_retries: 3,
            backoff_base_ms: 1000,
        }
    }

    /// Full URL of the upload endpoint
    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.endpoint)
    }

    /// Delay before the given retry, doubling with each attempt (0-based)
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_base_ms << attempt)
    }

    /// Build the multipart form for one upload attempt
    ///
    /// reqwest forms are not reusable across retries, so the video bytes are
    /// read once and a fresh form is built per attempt.
    fn build_form(file_name: &str, bytes: Vec<u8>) -> Result<Form, TranscriptionError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;
        Ok(Form::new().part("video", part))
    }

    async fn send_once(&self, video: &Path, bytes: &[u8]) -> Result<String, TranscriptionError> {
        let file_name = video
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "video".to_string());
        let form = Self::build_form(&file_name, bytes.to_vec())?;

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranscriptionError::Timeout(e.to_string())
                } else if e.is_connect() {
                    TranscriptionError::ConnectionError(e.to_string())
                } else {
                    TranscriptionError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        if body.srt_content.trim().is_empty() {
            return Err(TranscriptionError::ParseError(
                "Service returned empty SRT content".to_string(),
            ));
        }

        Ok(body.srt_content)
    }
}

#[async_trait]
impl Transcriber for RemoteTranscriber {
    async fn transcribe(&self, video: &Path) -> Result<String, TranscriptionError> {
        let bytes = tokio::fs::read(video).await.map_err(|e| {
            TranscriptionError::RequestFailed(format!(
                "Failed to read video file {}: {}",
                video.display(),
                e
            ))
        })?;

        let mut attempt = 0;
        loop {
            debug!(
                "Uploading {} to {} (attempt {}/{})",
                video.display(),
                self.upload_url(),
                attempt + 1,
                self.max_retries + 1
            );

            match self.send_once(video, &bytes).await {
                Ok(srt) => return Ok(srt),
                Err(e) => {
                    if !e.is_retryable() || attempt >= self.max_retries {
                        return Err(e);
                    }

                    let backoff = self.backoff_delay(attempt);
                    warn!(
                        "Transcription attempt {} failed ({}), retrying in {}ms",
                        attempt + 1,
                        e,
                        backoff.as_millis()
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn test_connection(&self) -> Result<(), TranscriptionError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| TranscriptionError::ConnectionError(e.to_string()))?;

        // Any HTTP answer means the server is up; the root path need not exist
        if response.status().is_server_error() {
            return Err(TranscriptionError::ApiError {
                status_code: response.status().as_u16(),
                message: "Service reported an internal error".to_string(),
            });
        }

        Ok(())
    }
}
