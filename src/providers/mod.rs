/*!
 * Provider implementations for speech-to-text services.
 *
 * This module contains the client for the remote transcription server:
 * - Remote: HTTP multipart upload endpoint returning SRT content
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::TranscriptionError;

/// Common trait for transcription backends
///
/// This trait defines the interface that all transcriber implementations must
/// follow, allowing tests to substitute a mock for the remote service.
#[async_trait]
pub trait Transcriber: Send + Sync + Debug {
    /// Transcribe a video file into SRT content
    ///
    /// # Arguments
    /// * `video` - Path to the video file to upload
    ///
    /// # Returns
    /// * `Result<String, TranscriptionError>` - The SRT content produced by the service or an error
    async fn transcribe(&self, video: &Path) -> Result<String, TranscriptionError>;

    /// Test the connection to the service
    ///
    /// # Returns
    /// * `Result<(), TranscriptionError>` - Ok if the service is reachable, or an error
    async fn test_connection(&self) -> Result<(), TranscriptionError>;
}

pub mod remote;
