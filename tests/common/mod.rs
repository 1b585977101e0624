/*!
 * Common test utilities for the sinsub test suite
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// Re-export the mock transcriber module
pub mod mock_transcriber;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a legacy-encoded subtitle file for testing
///
/// Caption text is in the legacy visual-order font encoding; the first entry
/// decodes to a Sinhala greeting.
pub fn create_legacy_subtitle(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = "1\n\
00:00:01,000 --> 00:00:04,000\n\
wdhqfndajka\n\
\n\
2\n\
00:00:05,000 --> 00:00:09,000\n\
Y»S ñksid\n\
\n\
3\n\
00:00:10,000 --> 00:00:14,000\n\
plain ascii line\n";
    create_test_file(dir, filename, content)
}

/// Creates a plain-ASCII subtitle file for testing
pub fn create_ascii_subtitle(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = "1\n\
00:00:01,000 --> 00:00:04,000\n\
This is a test subtitle.\n\
\n\
2\n\
00:00:05,000 --> 00:00:09,000\n\
It contains multiple entries.\n";
    create_test_file(dir, filename, content)
}
