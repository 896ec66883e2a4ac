/*!
 * Tests for subtitle discovery and charset decoding
 */

use std::path::PathBuf;

use anyhow::Result;
use subdialogs::errors::CorpusError;
use subdialogs::file_utils::{Charset, FileManager, SubtitleDirectory};
use crate::common;

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect()
}

/// Discovery is recursive, skips directories and is ordered by file name
#[test]
fn test_files_withNestedDirectories_shouldYieldRegularFilesInOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b.txt", "b")?;
    common::create_test_file(temp_dir.path(), "a.txt", "a")?;
    common::create_test_file(temp_dir.path(), "season1/c.txt", "c")?;

    let directory = SubtitleDirectory::open(temp_dir.path())?;
    let files = directory.files().collect::<Result<Vec<_>, _>>()?;

    assert_eq!(file_names(&files), vec!["a.txt", "b.txt", "c.txt"]);
    Ok(())
}

/// Every call to files() starts a fresh walk
#[test]
fn test_files_whenCalledTwice_shouldRestartDiscovery() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "a.txt", "a")?;
    common::create_test_file(temp_dir.path(), "b.txt", "b")?;

    let directory = SubtitleDirectory::open(temp_dir.path())?;
    let first: Vec<_> = directory.files().collect::<Result<_, _>>()?;
    let second: Vec<_> = directory.files().collect::<Result<_, _>>()?;

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    Ok(())
}

#[test]
fn test_open_withMissingDirectory_shouldFail() {
    let result = SubtitleDirectory::open("./non_existent_directory_12345");
    assert!(matches!(result, Err(CorpusError::DirectoryNotFound(_))));
}

#[test]
fn test_open_withFilePath_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "a.txt", "a")?;

    assert!(matches!(
        SubtitleDirectory::open(&file),
        Err(CorpusError::NotADirectory(_))
    ));
    Ok(())
}

/// UTF-8 comes first in the priority list
#[test]
fn test_decode_withUtf8File_shouldUseUtf8() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "a.txt", "{1}{2}Cześć\n{3}{4}Hej")?;

    let decoded = FileManager::decode(&file, &Charset::DEFAULT_PRIORITY).unwrap();

    assert_eq!(decoded.charset, Charset::Utf8);
    let lines: Vec<_> = decoded.lines().map(|l| l.text).collect();
    assert_eq!(lines, vec!["{1}{2}Cześć", "{3}{4}Hej"]);
    Ok(())
}

/// Bytes invalid as UTF-8 fall through to Windows-1250
#[test]
fn test_decode_withWindows1250File_shouldFallBack() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_bytes_file(temp_dir.path(), "a.txt", b"{1}{2}Cze\x9C\xE6\r\n{3}{4}x")?;

    let decoded = FileManager::decode(&file, &Charset::DEFAULT_PRIORITY).unwrap();

    assert_eq!(decoded.charset, Charset::Windows1250);
    let lines: Vec<_> = decoded.lines().collect();
    assert_eq!(lines[0].text, "{1}{2}Cześć");
    assert_eq!(lines[0].source, file.as_path());
    assert_eq!(lines[1].text, "{3}{4}x");
    Ok(())
}

/// 0x98 has no Windows-1250 character, so the file falls through to ISO-8859-1
#[test]
fn test_decode_withUndefinedWindows1250Byte_shouldFallBackToIso8859_1() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_bytes_file(temp_dir.path(), "a.txt", b"{1}{2}Co\x9C\x98")?;

    let decoded = FileManager::decode(&file, &Charset::DEFAULT_PRIORITY).unwrap();

    assert_eq!(decoded.charset, Charset::Iso8859_1);
    assert_eq!(decoded.text, "{1}{2}Co\u{9C}\u{98}");
    Ok(())
}

#[test]
fn test_decode_withNoMatchingCharset_shouldReturnNone() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_bytes_file(temp_dir.path(), "a.txt", b"{1}{2}\xFF\xFE")?;
    let charsets = [Charset::Utf8, Charset::UsAscii];

    assert!(FileManager::decode(&file, &charsets).is_none());
    match FileManager::try_decode(&file, &charsets) {
        Err(CorpusError::Undecodable { tried, .. }) => assert_eq!(tried, "UTF-8, US-ASCII"),
        other => panic!("expected undecodable error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_decode_withMissingFile_shouldReturnNone() {
    assert!(FileManager::decode("non_existent_file.txt", &Charset::DEFAULT_PRIORITY).is_none());
}

#[test]
fn test_write_to_file_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("out/train.jsonl");

    FileManager::write_to_file(&target, "[\"a\",\"b\"]\n")?;

    assert!(FileManager::dir_exists(temp_dir.path().join("out")));
    assert_eq!(std::fs::read_to_string(target)?, "[\"a\",\"b\"]\n");
    Ok(())
}

/// Dangling and looping links below the root are skipped, valid files are kept
#[cfg(unix)]
#[test]
fn test_files_withBrokenAndLoopingLinks_shouldSkipThem() -> Result<()> {
    use std::os::unix::fs::symlink;

    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    let target = common::create_test_file(root, "a.txt", "a")?;
    symlink(root.join("gone.txt"), root.join("zz_link.txt"))?;
    std::fs::create_dir(root.join("sub"))?;
    symlink(root, root.join("sub/loop"))?;
    symlink(&target, root.join("sub/alias.txt"))?;

    let directory = SubtitleDirectory::open(root)?;
    let files = directory.files().collect::<Result<Vec<_>, _>>()?;

    assert_eq!(file_names(&files), vec!["a.txt", "alias.txt"]);
    Ok(())
}
