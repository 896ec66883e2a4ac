/*!
 * Plain text feed over a subtitle directory.
 *
 * Word-vector trainers consume raw sentences rather than dialogs. Each item
 * is the preprocessed text of one file with the frame brackets blanked out,
 * one subtitle line per text line. The iterator can be reset to walk the
 * directory again, which trainers do once per epoch.
 */

use log::warn;

use crate::file_utils::{Charset, FileManager, SubtitleDirectory, SubtitleFiles};
use crate::preprocessor::LinePreprocessor;

/// Restartable iterator yielding the cleaned text of each decodable file
pub struct SentenceIterator {
    directory: SubtitleDirectory,
    charsets: Vec<Charset>,
    preprocessor: LinePreprocessor,
    files: SubtitleFiles,
}

impl SentenceIterator {
    pub fn new(
        directory: SubtitleDirectory,
        charsets: Vec<Charset>,
        preprocessor: LinePreprocessor,
    ) -> Self {
        let files = directory.files();
        Self {
            directory,
            charsets,
            preprocessor,
            files,
        }
    }

    /// Restart from the first file
    pub fn reset(&mut self) {
        self.files = self.directory.files();
    }

    fn file_text(decoded_lines: impl Iterator<Item = String>) -> String {
        decoded_lines
            .map(|line| line.replace(['{', '}'], " "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Iterator for SentenceIterator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let path = match self.files.next()? {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping unreadable directory entry: {}", e);
                    continue;
                }
            };

            if let Some(decoded) = FileManager::decode(&path, &self.charsets) {
                let lines = decoded
                    .lines()
                    .filter_map(|line| self.preprocessor.preprocess(line.text));
                return Some(Self::file_text(lines));
            }
        }
    }
}
