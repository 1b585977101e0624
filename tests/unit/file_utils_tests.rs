/*!
 * Tests for file and folder utilities
 */

use std::path::PathBuf;

use sinsub::file_utils::{FileManager, FileType};

use crate::common;

/// Output files sit next to their source with the marker inserted
#[test]
fn test_generateOutputPath_withNestedInput_shouldKeepDirectory() {
    let output = FileManager::generate_output_path(
        PathBuf::from("/subs/movie.srt"),
        "unicode",
        "srt",
    );

    assert_eq!(output, PathBuf::from("/subs/movie.unicode.srt"));
}

/// A bare filename produces a bare output filename
#[test]
fn test_generateOutputPath_withBareFilename_shouldNotPrependDirectory() {
    let output = FileManager::generate_output_path(PathBuf::from("movie.srt"), "unicode", "srt");
    assert_eq!(output, PathBuf::from("movie.unicode.srt"));
}

/// Recursive scan finds subtitle files and nothing else
#[test]
fn test_findFiles_withMixedTree_shouldReturnOnlyMatchingExtension() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();

    common::create_ascii_subtitle(&dir, "a.srt").unwrap();
    common::create_test_file(&dir, "notes.txt", "not a subtitle").unwrap();
    std::fs::create_dir(dir.join("nested")).unwrap();
    common::create_ascii_subtitle(&dir.join("nested"), "b.srt").unwrap();

    let mut found = FileManager::find_files(&dir, "srt").unwrap();
    found.sort();

    assert_eq!(found.len(), 2);
    assert!(found[0].ends_with("a.srt"));
    assert!(found[1].ends_with("b.srt"));
}

/// Write creates parent directories as needed
#[test]
fn test_writeToFile_withMissingParent_shouldCreateIt() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("deep").join("out.srt");

    FileManager::write_to_file(&path, "content").unwrap();

    assert!(FileManager::file_exists(&path));
    assert_eq!(FileManager::read_to_string(&path).unwrap(), "content");
}

/// SRT files are detected by extension and by content
#[test]
fn test_detectFileType_withVariousFiles_shouldClassify() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();

    let srt = common::create_ascii_subtitle(&dir, "a.srt").unwrap();
    assert_eq!(FileManager::detect_file_type(&srt).unwrap(), FileType::Subtitle);

    let video = common::create_test_file(&dir, "clip.mp4", "").unwrap();
    assert_eq!(FileManager::detect_file_type(&video).unwrap(), FileType::Video);

    // SRT content under a different extension is still recognized
    let srt_content = FileManager::read_to_string(&srt).unwrap();
    let renamed = common::create_test_file(&dir, "a.sub", &srt_content).unwrap();
    assert_eq!(
        FileManager::detect_file_type(&renamed).unwrap(),
        FileType::Subtitle
    );

    let unknown = common::create_test_file(&dir, "plain.bin", "just bytes").unwrap();
    assert_eq!(
        FileManager::detect_file_type(&unknown).unwrap(),
        FileType::Unknown
    );
}
