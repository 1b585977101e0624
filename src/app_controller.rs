use anyhow::{Context, Result};
use chrono::Utc;
use futures::future::join_all;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{error, info, warn};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::{FileManager, FileType};
use crate::providers::Transcriber;
use crate::storage::{CachedSubtitles, SubtitleCache};
use crate::subtitle_processor::{convert_document, SubtitleCollection};

// @module: Application controller for subtitle conversion

/// Marker inserted into output filenames, as in `movie.unicode.srt`
const OUTPUT_MARKER: &str = "unicode";

/// Outcome of converting a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// File converted and written to the given path
    Converted(PathBuf),
    /// File skipped because the output already exists
    Skipped(PathBuf),
}

/// Main application controller for subtitle conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Compute the output path for a subtitle file
    pub fn output_path_for(input_file: &Path) -> PathBuf {
        FileManager::generate_output_path(input_file, OUTPUT_MARKER, "srt")
    }

    /// Convert a single subtitle file on disk
    pub fn convert_file(&self, input_file: &Path, force_overwrite: bool) -> Result<ConversionOutcome> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow::anyhow!(
                "Input file does not exist: {:?}",
                input_file
            ));
        }

        let output_path = Self::output_path_for(input_file);
        if output_path.exists() && !force_overwrite {
            warn!(
                "Skipping {:?}, output already exists (use -f to force overwrite)",
                input_file
            );
            return Ok(ConversionOutcome::Skipped(output_path));
        }

        let content = FileManager::read_to_string(input_file)?;
        let converted = convert_document(&content, self.config.conversion.mode);
        FileManager::write_to_file(&output_path, &converted)?;

        info!("Converted {:?} -> {:?}", input_file, output_path);
        Ok(ConversionOutcome::Converted(output_path))
    }

    /// Run the conversion workflow for a file or a directory
    pub async fn run_convert(&self, input_path: PathBuf, force_overwrite: bool) -> Result<()> {
        if input_path.is_file() {
            self.convert_file(&input_path, force_overwrite)?;
            Ok(())
        } else if input_path.is_dir() {
            self.run_convert_folder(input_path, force_overwrite).await
        } else {
            Err(anyhow::anyhow!(
                "Input path does not exist: {:?}",
                input_path
            ))
        }
    }

    /// Convert every subtitle file under a directory (recursive)
    pub async fn run_convert_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow::anyhow!(
                "Input directory does not exist: {:?}",
                input_dir
            ));
        }

        let mut subtitle_files = FileManager::find_files(&input_dir, "srt")?;
        // Converted outputs found by the scan must not be converted again
        subtitle_files.retain(|p| {
            !p.file_name()
                .map(|n| {
                    n.to_string_lossy()
                        .ends_with(&format!(".{}.srt", OUTPUT_MARKER))
                })
                .unwrap_or(false)
        });

        if subtitle_files.is_empty() {
            warn!("No subtitle files found in directory: {:?}", input_dir);
            return Ok(());
        }

        info!(
            "Found {} subtitle file(s) in {:?}",
            subtitle_files.len(),
            input_dir
        );

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(subtitle_files.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Converting files");

        // Conversion is CPU-bound file work; run each file on the blocking pool
        let mode = self.config.conversion.mode;
        let tasks: Vec<_> = subtitle_files
            .iter()
            .cloned()
            .map(|file| {
                let pb = folder_pb.clone();
                tokio::task::spawn_blocking(move || {
                    let result = (|| -> Result<ConversionOutcome> {
                        let output_path = Self::output_path_for(&file);
                        if output_path.exists() && !force_overwrite {
                            return Ok(ConversionOutcome::Skipped(output_path));
                        }
                        let content = FileManager::read_to_string(&file)?;
                        let converted = convert_document(&content, mode);
                        FileManager::write_to_file(&output_path, &converted)?;
                        Ok(ConversionOutcome::Converted(output_path))
                    })();
                    pb.inc(1);
                    (file, result)
                })
            })
            .collect();

        let mut success_count = 0;
        let mut skip_count = 0;
        let mut error_count = 0;

        for joined in join_all(tasks).await {
            match joined.context("Conversion task panicked")? {
                (_, Ok(ConversionOutcome::Converted(_))) => success_count += 1,
                (file, Ok(ConversionOutcome::Skipped(_))) => {
                    warn!(
                        "Skipped {:?}, output already exists (use -f to force overwrite)",
                        file
                    );
                    skip_count += 1;
                }
                (file, Err(e)) => {
                    error!("Failed to convert {:?}: {}", file, e);
                    error_count += 1;
                }
            }
        }

        folder_pb.finish_with_message("Done");

        info!(
            "Converted {} file(s), skipped {}, failed {} in {:.1}s",
            success_count,
            skip_count,
            error_count,
            start_time.elapsed().as_secs_f64()
        );

        Ok(())
    }

    /// Transcribe a video through the remote service and convert the result
    ///
    /// The cache keeps the last transcription keyed by the video's SHA-256
    /// digest, so repeated runs on the same file skip the upload. Cache
    /// failures are logged and ignored; only the service and the filesystem
    /// can fail this operation.
    pub async fn run_transcribe(
        &self,
        video_file: &Path,
        transcriber: &dyn Transcriber,
        cache: &dyn SubtitleCache,
        force_overwrite: bool,
    ) -> Result<()> {
        if !FileManager::file_exists(video_file) {
            return Err(anyhow::anyhow!(
                "Video file does not exist: {:?}",
                video_file
            ));
        }

        if FileManager::detect_file_type(video_file)? == FileType::Subtitle {
            return Err(anyhow::anyhow!(
                "Input is a subtitle file, use the convert command instead: {:?}",
                video_file
            ));
        }

        let output_path = Self::output_path_for(video_file);
        if output_path.exists() && !force_overwrite {
            warn!(
                "Skipping {:?}, output already exists (use -f to force overwrite)",
                video_file
            );
            return Ok(());
        }

        let digest = Self::file_digest(video_file)?;

        let srt_content = match cache.load() {
            Ok(Some(cached)) if cached.video_digest.as_deref() == Some(digest.as_str()) => {
                info!(
                    "Using cached transcription from {} backend",
                    cache.backend_name()
                );
                cached.srt_content
            }
            Ok(_) => {
                info!("Uploading {:?} for transcription", video_file);
                let srt = transcriber.transcribe(video_file).await?;

                let cached = CachedSubtitles {
                    video_digest: Some(digest.clone()),
                    srt_content: srt.clone(),
                    updated_at: Utc::now().timestamp(),
                };
                if let Err(e) = cache.save(&cached) {
                    warn!("Failed to cache transcription: {}", e);
                }
                srt
            }
            Err(e) => {
                warn!("Failed to read transcription cache: {}", e);
                transcriber.transcribe(video_file).await?
            }
        };

        // Rebuild the service text as records so malformed blocks are dropped
        // and sequence numbers come out normalized
        let entries = SubtitleCollection::parse_srt_string(&srt_content)
            .context("Transcription service returned unusable SRT content")?;
        let mut collection = SubtitleCollection::new(video_file.to_path_buf());
        collection.entries = entries;

        let converted = convert_document(&collection.to_srt_string(), self.config.conversion.mode);
        FileManager::write_to_file(&output_path, &converted)?;

        info!(
            "Transcribed {:?} -> {:?} ({} entries)",
            video_file,
            output_path,
            collection.entries.len()
        );
        Ok(())
    }

    /// SHA-256 digest of a file, as lowercase hex
    fn file_digest(path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read file for hashing: {:?}", path))?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hasher.finalize();
        Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
    }
}
