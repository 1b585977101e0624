/*!
 * Tests for the remote transcription client
 */

use std::time::Duration;

use sinsub::app_config::TranscriptionConfig;
use sinsub::errors::TranscriptionError;
use sinsub::providers::remote::RemoteTranscriber;

/// Client-side rejections are final; everything else is worth another try
#[test]
fn test_isRetryable_withVariousErrors_shouldOnlyRetryTransientOnes() {
    let bad_request = TranscriptionError::ApiError {
        status_code: 400,
        message: "no video field".to_string(),
    };
    let not_found = TranscriptionError::ApiError {
        status_code: 404,
        message: "unknown route".to_string(),
    };
    let server_error = TranscriptionError::ApiError {
        status_code: 500,
        message: "worker crashed".to_string(),
    };

    assert!(!bad_request.is_retryable());
    assert!(!not_found.is_retryable());
    assert!(server_error.is_retryable());
    assert!(TranscriptionError::ConnectionError("refused".to_string()).is_retryable());
    assert!(TranscriptionError::Timeout("deadline".to_string()).is_retryable());
    assert!(TranscriptionError::RequestFailed("reset".to_string()).is_retryable());
    assert!(TranscriptionError::ParseError("bad json".to_string()).is_retryable());
}

/// Backoff doubles from the configured base on each attempt
#[test]
fn test_backoffDelay_withConfiguredBase_shouldDoublePerAttempt() {
    let config = TranscriptionConfig {
        endpoint: "http://127.0.0.1:5000".to_string(),
        timeout_secs: 10,
        max_retries: 3,
        backoff_base_ms: 250,
    };
    let client = RemoteTranscriber::new(&config);

    assert_eq!(client.backoff_delay(0), Duration::from_millis(250));
    assert_eq!(client.backoff_delay(1), Duration::from_millis(500));
    assert_eq!(client.backoff_delay(2), Duration::from_millis(1000));
}

/// The upload route hangs off the configured endpoint without double slashes
#[test]
fn test_uploadUrl_withTrailingSlashEndpoint_shouldNormalize() {
    let client = RemoteTranscriber::from_url("http://localhost:5000/");
    assert_eq!(client.upload_url(), "http://localhost:5000/upload");

    let client = RemoteTranscriber::from_url("http://localhost:5000");
    assert_eq!(client.upload_url(), "http://localhost:5000/upload");
}
