use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::errors::CorpusError;

// @module: Subtitle file discovery and charset-aware decoding

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// @const: Bytes with no character assigned in Windows-1250
const WINDOWS_1250_UNDEFINED: [u8; 5] = [0x81, 0x83, 0x88, 0x90, 0x98];

// @enum: Charsets a subtitle file may be decoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Charset {
    Utf8,
    Windows1250,
    Iso8859_1,
    Iso8859_2,
    UsAscii,
}

impl Charset {
    /// Default decode priority for Polish subtitle archives
    pub const DEFAULT_PRIORITY: [Charset; 5] = [
        Charset::Utf8,
        Charset::Windows1250,
        Charset::Iso8859_1,
        Charset::Iso8859_2,
        Charset::UsAscii,
    ];

    // @returns: Canonical charset label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Windows1250 => "Windows-1250",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::Iso8859_2 => "ISO-8859-2",
            Self::UsAscii => "US-ASCII",
        }
    }

    /// Strictly decode `bytes`, returning `None` on any invalid or unmappable sequence.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(bytes).ok().map(str::to_owned)
            }
            // encoding_rs maps the undefined bytes to C1 controls instead of failing
            Self::Windows1250 if bytes.iter().any(|b| WINDOWS_1250_UNDEFINED.contains(b)) => None,
            Self::Windows1250 => encoding_rs::WINDOWS_1250
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(Cow::into_owned),
            Self::Iso8859_2 => encoding_rs::ISO_8859_2
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(Cow::into_owned),
            // encoding_rs folds latin1 into windows-1252, so map bytes to code points directly
            Self::Iso8859_1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::UsAscii => bytes
                .is_ascii()
                .then(|| String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Charset {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "windows-1250" | "cp1250" | "x-cp1250" => Ok(Self::Windows1250),
            "iso-8859-1" | "latin1" | "iso8859-1" => Ok(Self::Iso8859_1),
            "iso-8859-2" | "latin2" | "iso8859-2" => Ok(Self::Iso8859_2),
            "us-ascii" | "ascii" => Ok(Self::UsAscii),
            _ => Err(CorpusError::UnknownCharset(s.to_string())),
        }
    }
}

impl TryFrom<String> for Charset {
    type Error = CorpusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Charset> for String {
    fn from(charset: Charset) -> Self {
        charset.label().to_string()
    }
}

/// A root directory of subtitle files.
///
/// Discovery is lazy and restartable: every call to [`SubtitleDirectory::files`]
/// walks the tree again from the start.
#[derive(Debug, Clone)]
pub struct SubtitleDirectory {
    root: PathBuf,
}

impl SubtitleDirectory {
    /// Open a subtitle directory, failing if it is missing or not a directory
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CorpusError> {
        let root = path.as_ref();
        if !root.exists() {
            return Err(CorpusError::DirectoryNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(CorpusError::NotADirectory(root.to_path_buf()));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a fresh recursive walk yielding regular files in file-name order.
    ///
    /// Directory links are not followed. A link to a regular file is yielded,
    /// a dangling link is skipped.
    pub fn files(&self) -> SubtitleFiles {
        SubtitleFiles {
            walker: WalkDir::new(&self.root)
                .sort_by_file_name()
                .into_iter(),
        }
    }
}

/// Lazy iterator over the regular files below a [`SubtitleDirectory`]
pub struct SubtitleFiles {
    walker: walkdir::IntoIter,
}

impl Iterator for SubtitleFiles {
    type Item = Result<PathBuf, CorpusError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walker.next()? {
                Ok(entry) if entry.file_type().is_file() => {
                    return Some(Ok(entry.into_path()));
                }
                Ok(entry) if entry.path_is_symlink() && entry.path().is_file() => {
                    return Some(Ok(entry.into_path()));
                }
                Ok(_) => continue,
                Err(e) if e.depth() > 0 => {
                    warn!("Skipping unreadable entry below subtitle root: {}", e);
                    continue;
                }
                Err(e) => return Some(Err(CorpusError::Walk(e))),
            }
        }
    }
}

/// A single decoded line together with where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub text: &'a str,
    pub source: &'a Path,
    pub charset: Charset,
}

/// Full text of a subtitle file decoded with the first charset that accepted it
#[derive(Debug, Clone)]
pub struct DecodedFile {
    pub path: PathBuf,
    pub charset: Charset,
    pub text: String,
}

impl DecodedFile {
    /// Lines in original order, without line terminators
    pub fn lines(&self) -> impl Iterator<Item = RawLine<'_>> {
        self.text.lines().map(move |text| RawLine {
            text,
            source: &self.path,
            charset: self.charset,
        })
    }
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Decode a file with the first charset that accepts every byte.
    ///
    /// The file is read in one scoped call so no handle stays open while
    /// charsets are tried.
    pub fn try_decode<P: AsRef<Path>>(
        path: P,
        charsets: &[Charset],
    ) -> Result<DecodedFile, CorpusError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;

        for charset in charsets {
            match charset.decode(&bytes) {
                Some(text) => {
                    trace!("Decoded {:?} as {}", path, charset);
                    return Ok(DecodedFile {
                        path: path.to_path_buf(),
                        charset: *charset,
                        text,
                    });
                }
                None => trace!("{:?} is not valid {}", path, charset),
            }
        }

        Err(CorpusError::Undecodable {
            path: path.to_path_buf(),
            tried: charsets
                .iter()
                .map(Charset::label)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Decode a file, logging a warning and returning `None` when it cannot be read
    pub fn decode<P: AsRef<Path>>(path: P, charsets: &[Charset]) -> Option<DecodedFile> {
        match Self::try_decode(&path, charsets) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Skipping {:?}: {}", path.as_ref(), e);
                None
            }
        }
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
