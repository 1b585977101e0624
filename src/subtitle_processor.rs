use std::fmt;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::ConversionMode;
use crate::rule_table::has_legacy_evidence;
use crate::transliterate::Transliterator;

// @module: Subtitle line classification and document conversion

// @const: Anchored SRT timecode line
static TIMECODE_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2}:\d{2}:\d{2},\d{3} --> \d{2}:\d{2}:\d{2},\d{3}$").unwrap()
});

// @const: Anchored block sequence index line
static SEQUENCE_LINE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

// @const: Capturing timecode for record parsing
static TIMECODE_PARTS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2}):(\d{2}):(\d{2}),(\d{3})$").unwrap()
});

/// What one line of an SRT file is.
///
/// Classification is stateless and whole-line; no cross-line context is
/// consulted, and indices are not checked for monotonicity. Lines that
/// almost match a structural pattern fall through to `CaptionText`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A line consisting solely of ASCII digits.
    SequenceIndex,
    /// A line matching the exact `HH:MM:SS,mmm --> HH:MM:SS,mmm` pattern.
    Timecode,
    /// Everything else, including blank lines.
    CaptionText,
}

/// Classify one line of a subtitle file.
///
/// A trailing `\r` (CRLF input) is ignored for classification; the line
/// itself is still passed through byte-for-byte when structural.
pub fn classify(line: &str) -> LineKind {
    let body = line.strip_suffix('\r').unwrap_or(line);
    if SEQUENCE_LINE_REGEX.is_match(body) {
        LineKind::SequenceIndex
    } else if TIMECODE_LINE_REGEX.is_match(body) {
        LineKind::Timecode
    } else {
        LineKind::CaptionText
    }
}

/// Convert a whole `.srt` document from the legacy encoding to Unicode.
///
/// Splits on `\n`, keeps structural lines verbatim, transliterates legacy
/// runs in caption lines, and rejoins. The output always has exactly as
/// many lines as the input; no whitespace normalization is performed.
pub fn convert_document(file_text: &str, mode: ConversionMode) -> String {
    let engine = Transliterator::default();
    file_text
        .split('\n')
        .map(|line| convert_line(line, mode, &engine))
        .collect::<Vec<String>>()
        .join("\n")
}

fn convert_line(line: &str, mode: ConversionMode, engine: &Transliterator) -> String {
    match classify(line) {
        LineKind::SequenceIndex | LineKind::Timecode => line.to_string(),
        LineKind::CaptionText => convert_caption_line(line, mode, engine),
    }
}

/// Transliterate the legacy runs of one caption line.
///
/// In `Auto` mode the line is segmented at whitespace; a segment is
/// transliterated when `has_legacy_evidence` says it is glyph-order text
/// (an extended-range character, a lone base-letter code, or the u-vowel
/// sign code outside English `qu`), and passes through untouched otherwise,
/// so plain-ASCII words, spacing and tags on a mixed line survive
/// byte-for-byte. `Full` mode feeds the whole line to the engine, for files
/// known to be entirely legacy-encoded.
fn convert_caption_line(line: &str, mode: ConversionMode, engine: &Transliterator) -> String {
    match mode {
        ConversionMode::Full => engine.transliterate(line),
        ConversionMode::Auto => {
            let mut output = String::with_capacity(line.len());
            let mut segment = String::new();
            for ch in line.chars() {
                if ch.is_whitespace() {
                    flush_segment(&mut output, &mut segment, engine);
                    output.push(ch);
                } else {
                    segment.push(ch);
                }
            }
            flush_segment(&mut output, &mut segment, engine);
            output
        }
    }
}

fn flush_segment(output: &mut String, segment: &mut String, engine: &Transliterator) {
    if segment.is_empty() {
        return;
    }
    if has_legacy_evidence(segment) {
        output.push_str(&engine.transliterate(segment));
    } else {
        output.push_str(segment);
    }
    segment.clear();
}

// @struct: Single subtitle entry
#[derive(Debug, Clone)]
pub struct SubtitleEntry {
    // @field: Sequence number
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry without validation.
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    // @creates: Validated subtitle entry
    // @validates: Time range and non-empty text
    pub fn new_validated(
        seq_num: usize,
        start_time_ms: u64,
        end_time_ms: u64,
        text: String,
    ) -> Result<Self> {
        if end_time_ms <= start_time_ms {
            return Err(anyhow!(
                "Invalid time range: end time {} <= start time {}",
                end_time_ms,
                start_time_ms
            ));
        }

        let trimmed_text = text.trim();
        if trimmed_text.is_empty() {
            return Err(anyhow!("Empty subtitle text for entry {}", seq_num));
        }

        Ok(SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text: trimmed_text.to_string(),
        })
    }

    /// Build an entry from the `{index, timecode, text}` record shape the
    /// transcription service produces.
    pub fn from_record(index: usize, timecode: &str, text: &str) -> Result<Self> {
        let caps = TIMECODE_PARTS_REGEX
            .captures(timecode.trim())
            .ok_or_else(|| anyhow!("Invalid timecode for entry {}: {}", index, timecode))?;
        let start_ms = Self::capture_to_ms(&caps, 1);
        let end_ms = Self::capture_to_ms(&caps, 5);
        Self::new_validated(index, start_ms, end_ms, text.to_string())
    }

    /// Parse an SRT timestamp (`HH:MM:SS,mmm`) to milliseconds.
    pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
        let parts: Vec<&str> = timestamp.split(&[':', ',', '.'][..]).collect();

        if parts.len() != 4 {
            return Err(anyhow!("Invalid timestamp format: {}", timestamp));
        }

        let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
        let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
        let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
        let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(anyhow!(
                "Invalid time components in timestamp: {}",
                timestamp
            ));
        }

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    fn capture_to_ms(caps: &regex::Captures, start_idx: usize) -> u64 {
        let field = |idx: usize| -> u64 {
            caps.get(idx)
                .map_or(0, |m| m.as_str().parse().unwrap_or(0))
        };
        (field(start_idx) * 3600 + field(start_idx + 1) * 60 + field(start_idx + 2)) * 1000
            + field(start_idx + 3)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(
            f,
            "{} --> {}",
            self.format_start_time(),
            self.format_end_time()
        )?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Collection of subtitle entries reconstructed from a transcription.
#[derive(Debug)]
pub struct SubtitleCollection {
    /// File the entries were produced for
    pub source_file: PathBuf,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create a new subtitle collection
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Render the collection back into `.srt` text.
    pub fn to_srt_string(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.to_string());
        }
        out
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        for entry in &self.entries {
            write!(file, "{}", entry)?;
        }

        Ok(())
    }

    /// Parse SRT format string into subtitle entries.
    ///
    /// Blocks are accumulated as `{index, timecode, text}` records and built
    /// through `SubtitleEntry::from_record`; invalid records are skipped with
    /// a warning rather than failing the whole document.
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>> {
        let mut entries = Vec::new();

        let mut current_seq_num: Option<usize> = None;
        let mut current_timecode: Option<String> = None;
        let mut current_text = String::new();
        let mut line_count = 0;

        fn add_record(entries: &mut Vec<SubtitleEntry>, seq_num: usize, timecode: &str, text: &str) {
            match SubtitleEntry::from_record(seq_num, timecode, text) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!("Skipping invalid subtitle entry {}: {}", seq_num, e),
            }
        }

        for line in content.lines() {
            line_count += 1;
            let trimmed = line.trim();

            // Blank line terminates the current block
            if trimmed.is_empty() {
                if let (Some(seq_num), Some(timecode)) = (current_seq_num, current_timecode.as_ref())
                {
                    if !current_text.is_empty() {
                        add_record(&mut entries, seq_num, timecode, &current_text);
                        current_seq_num = None;
                        current_timecode = None;
                        current_text.clear();
                    }
                }
                continue;
            }

            if current_seq_num.is_none() && current_text.is_empty() {
                if let Ok(num) = trimmed.parse::<usize>() {
                    current_seq_num = Some(num);
                    continue;
                }
            }

            if current_seq_num.is_some() && current_timecode.is_none() {
                if TIMECODE_PARTS_REGEX.is_match(trimmed) {
                    current_timecode = Some(trimmed.to_string());
                    continue;
                }
            }

            if current_seq_num.is_some() && current_timecode.is_some() {
                if !current_text.is_empty() {
                    current_text.push('\n');
                }
                current_text.push_str(trimmed);
            } else {
                warn!(
                    "Unexpected text at line {} before sequence number or timestamp: {}",
                    line_count, trimmed
                );
            }
        }

        // Flush the last block
        if let (Some(seq_num), Some(timecode)) = (current_seq_num, current_timecode.as_ref()) {
            if !current_text.is_empty() {
                add_record(&mut entries, seq_num, timecode, &current_text);
            }
        }

        if entries.is_empty() {
            warn!("No valid subtitle entries found in content");
            return Err(anyhow!(
                "No valid subtitle entries were found in the SRT content"
            ));
        }

        entries.sort_by_key(|entry| entry.start_time_ms);
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.seq_num = i + 1;
        }

        Ok(entries)
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
