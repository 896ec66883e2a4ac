/*!
 * Per-file dialog loading.
 *
 * `DialogLoader` is the single pipeline used for every subtitle file:
 * decode with the charset priority list, normalise each line, parse cues and
 * window them into dialogs. Every stage keeps the original line order.
 */

use std::path::{Path, PathBuf};

use log::debug;

use crate::app_config::Config;
use crate::errors::CorpusError;
use crate::file_utils::{Charset, FileManager};
use crate::preprocessor::LinePreprocessor;
use crate::subtitle_processor::MicroDvdParser;

use super::{Dialog, DialogWindower};

/// Dialogs extracted from one subtitle file
#[derive(Debug, Clone)]
pub struct FileDialogs {
    pub path: PathBuf,
    pub charset: Charset,
    pub dialogs: Vec<Dialog>,
    /// Decoded lines, before preprocessing
    pub line_count: usize,
    /// Lines that parsed as cues
    pub cue_count: usize,
}

/// Result of processing one file
#[derive(Debug, Clone)]
pub enum FileOutcome {
    Loaded(FileDialogs),
    /// The file could not be read or decoded with any configured charset
    Skipped { path: PathBuf },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Loaded(file) => &file.path,
            Self::Skipped { path } => path,
        }
    }
}

/// Running counts for one batch of lines
struct LineStats {
    dialogs: Vec<Dialog>,
    lines: usize,
    cues: usize,
}

/// Turns subtitle files into dialogs
#[derive(Debug, Clone)]
pub struct DialogLoader {
    charsets: Vec<Charset>,
    preprocessor: LinePreprocessor,
    parser: MicroDvdParser,
    max_gap_between_dialogs: u32,
}

impl DialogLoader {
    pub fn new(
        charsets: Vec<Charset>,
        preprocessor: LinePreprocessor,
        parser: MicroDvdParser,
        max_gap_between_dialogs: u32,
    ) -> Self {
        Self {
            charsets,
            preprocessor,
            parser,
            max_gap_between_dialogs,
        }
    }

    /// Build a loader from the dialog, encoding and preprocessing settings
    pub fn from_config(config: &Config) -> Result<Self, CorpusError> {
        Ok(Self::new(
            config.encodings.clone(),
            LinePreprocessor::new(&config.preprocessing.watermarks),
            MicroDvdParser::new(config.dialogs.fps)?,
            config.dialogs.max_gap_between_dialogs,
        ))
    }

    /// Decode one file and extract its dialogs
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> FileOutcome {
        let path = path.as_ref();
        let Some(decoded) = FileManager::decode(path, &self.charsets) else {
            return FileOutcome::Skipped {
                path: path.to_path_buf(),
            };
        };

        let stats = self.process(decoded.lines().map(|line| line.text));
        debug!(
            "{:?} ({}): {} lines, {} cues, {} dialogs",
            path,
            decoded.charset,
            stats.lines,
            stats.cues,
            stats.dialogs.len()
        );

        FileOutcome::Loaded(FileDialogs {
            path: decoded.path,
            charset: decoded.charset,
            dialogs: stats.dialogs,
            line_count: stats.lines,
            cue_count: stats.cues,
        })
    }

    /// Extract dialogs from the already decoded lines of a single file
    pub fn load_lines<I>(&self, lines: I) -> Vec<Dialog>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.process(lines).dialogs
    }

    fn process<I>(&self, lines: I) -> LineStats
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut windower = DialogWindower::new(self.max_gap_between_dialogs);
        let mut line_count = 0;
        let mut cue_count = 0;

        for line in lines {
            line_count += 1;
            let Some(cleaned) = self.preprocessor.preprocess(line.as_ref()) else {
                continue;
            };
            if let Some(cue) = self.parser.parse(&cleaned) {
                cue_count += 1;
                windower.push(cue);
            }
        }

        LineStats {
            dialogs: windower.finish(),
            lines: line_count,
            cues: cue_count,
        }
    }
}
