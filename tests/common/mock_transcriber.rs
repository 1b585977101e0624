/*!
 * Mock transcriber implementation for testing
 *
 * Provides a mock implementation of the Transcriber trait to avoid
 * external service calls in tests, returning predetermined SRT content.
 */

use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};

use sinsub::errors::TranscriptionError;
use sinsub::providers::Transcriber;

/// Tracks service calls to ensure no actual uploads are made
#[derive(Debug, Default)]
pub struct CallTracker {
    /// Count of mock transcription calls made
    pub call_count: usize,
    /// Should the next call fail
    pub should_fail: bool,
}

/// Mock implementation of the transcription service
#[derive(Debug)]
pub struct MockTranscriber {
    /// SRT content returned on success
    srt_content: String,
    tracker: Arc<Mutex<CallTracker>>,
}

impl MockTranscriber {
    /// Create a mock returning the given SRT content
    pub fn new(srt_content: impl Into<String>) -> Self {
        MockTranscriber {
            srt_content: srt_content.into(),
            tracker: Arc::new(Mutex::new(CallTracker::default())),
        }
    }

    /// Get the call tracker
    pub fn tracker(&self) -> Arc<Mutex<CallTracker>> {
        self.tracker.clone()
    }

    /// Configure the mock to fail on the next call
    pub fn fail_next_call(&self) {
        self.tracker.lock().unwrap().should_fail = true;
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _video: &Path) -> Result<String, TranscriptionError> {
        let mut tracker = self.tracker.lock().unwrap();
        tracker.call_count += 1;

        if tracker.should_fail {
            tracker.should_fail = false; // Reset for next call
            return Err(TranscriptionError::ConnectionError(
                "Mock connection failure".into(),
            ));
        }

        Ok(self.srt_content.clone())
    }

    async fn test_connection(&self) -> Result<(), TranscriptionError> {
        Ok(())
    }
}
