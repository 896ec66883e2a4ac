/*!
 * Line normalisation applied before cue parsing.
 *
 * Subtitle archives carry a lot of noise that is meaningless for dialog
 * modelling: MicroDVD style tags such as `{y:i}` or `{c:$4444ff}`, dashes that
 * mark speaker changes, stray punctuation and credit lines of the groups that
 * published the files. The preprocessor strips the noise and drops credit
 * lines entirely.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// @const: `{...}` blocks holding at least one non-digit, or empty `{}`
static ANNOTATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^{}]*[^{}0-9][^{}]*\}|\{\}").unwrap());

// @const: Punctuation removed from every line
const NOISE_CHARS: &[char] = &['#', '$', '%', '&', '|', '<', '>', '=', ':', ';', '/', '\\'];

/// Watermarks of subtitle groups whose lines are dropped by default
pub const DEFAULT_WATERMARKS: [&str; 2] = ["napisy24", "hatak"];

/// Filtering map over decoded subtitle lines
#[derive(Debug, Clone)]
pub struct LinePreprocessor {
    /// Lowercased watermark substrings
    watermarks: Vec<String>,
}

impl LinePreprocessor {
    /// Create a preprocessor dropping lines that contain any of `watermarks`
    pub fn new<I, S>(watermarks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            watermarks: watermarks
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Normalise one line, returning `None` when the line must be dropped.
    ///
    /// Annotation blocks are removed before punctuation so that characters
    /// which only occur inside a style tag never reach the cleaned text.
    pub fn preprocess(&self, line: &str) -> Option<String> {
        let without_annotations = ANNOTATION_REGEX.replace_all(line, "");
        let cleaned: String = without_annotations
            .chars()
            .filter(|c| *c != '-' && !NOISE_CHARS.contains(c))
            .collect();

        if self.is_watermarked(&cleaned) {
            None
        } else {
            Some(cleaned)
        }
    }

    fn is_watermarked(&self, line: &str) -> bool {
        let lowered = line.to_lowercase();
        self.watermarks.iter().any(|w| lowered.contains(w.as_str()))
    }
}

impl Default for LinePreprocessor {
    fn default() -> Self {
        Self::new(DEFAULT_WATERMARKS)
    }
}
