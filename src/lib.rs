/*!
 * # sinsub - Sinhala legacy-font subtitle converter
 *
 * A Rust library for converting SRT subtitle files written in legacy
 * visual-order Sinhala fonts into proper Unicode.
 *
 * ## Features
 *
 * - Ordered rewrite-rule table covering the legacy glyph chart, including
 *   pre-base vowel (kombuva) reordering and ligature forms
 * - Structure-aware SRT conversion: sequence and timecode lines pass through
 *   untouched, caption lines are transliterated
 * - Mixed-content handling: plain-ASCII words on a caption line survive
 *   byte-for-byte
 * - Transcription client for a local speech-to-text service
 * - Persistent cache of the last transcription with an in-memory fallback
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `rule_table`: The conversion rule table and its audit helpers
 * - `transliterate`: The engine applying a rule table to text
 * - `subtitle_processor`: Line classification, document conversion and SRT handling
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `providers`: Client for the remote transcription service
 * - `storage`: Subtitle cache with SQLite and in-memory backends
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod providers;
pub mod rule_table;
pub mod storage;
pub mod subtitle_processor;
pub mod transliterate;

// Re-export main types for easier usage
pub use app_config::{Config, ConversionMode};
pub use errors::{AppError, StorageError, SubtitleError, TranscriptionError};
pub use rule_table::{Rule, RULE_TABLE};
pub use subtitle_processor::{
    classify, convert_document, LineKind, SubtitleCollection, SubtitleEntry,
};
pub use transliterate::{transliterate, Transliterator};
