use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::CorpusError;

// @module: MicroDVD cue parsing

// @const: MicroDVD cue regex, `{start}{stop}text` or `[start][stop]text`
static CUE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\{(\d+)\}|\[(\d+)\])(?:\{(\d+)\}|\[(\d+)\])(.+)$").unwrap()
});

// @struct: Single timed subtitle entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleCue {
    // @field: Start time in whole seconds
    pub start_seconds: i64,

    // @field: Stop time in whole seconds
    pub stop_seconds: i64,

    // @field: Subtitle text
    pub text: String,
}

impl SubtitleCue {
    /// Creates a new cue - `start_seconds <= stop_seconds` is not checked
    pub fn new(start_seconds: i64, stop_seconds: i64, text: impl Into<String>) -> Self {
        SubtitleCue {
            start_seconds,
            stop_seconds,
            text: text.into(),
        }
    }
}

impl fmt::Display for SubtitleCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}s-{}s] {}", self.start_seconds, self.stop_seconds, self.text)
    }
}

/// Parser for frame based MicroDVD subtitle lines
#[derive(Debug, Clone, Copy)]
pub struct MicroDvdParser {
    fps: i64,
}

impl MicroDvdParser {
    /// Create a parser converting frames to seconds at `fps` frames per second
    pub fn new(fps: u32) -> Result<Self, CorpusError> {
        if fps == 0 {
            return Err(CorpusError::InvalidConfig(
                "fps must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            fps: i64::from(fps),
        })
    }

    pub fn fps(&self) -> i64 {
        self.fps
    }

    /// Parse a single line into a cue.
    ///
    /// Lines that do not follow the grammar are expected (blank lines, headers)
    /// and simply yield `None`.
    pub fn parse(&self, line: &str) -> Option<SubtitleCue> {
        let captures = CUE_REGEX.captures(line)?;
        let start_frame: i64 = captures.get(1).or_else(|| captures.get(2))?.as_str().parse().ok()?;
        let stop_frame: i64 = captures.get(3).or_else(|| captures.get(4))?.as_str().parse().ok()?;
        let text = captures.get(5)?.as_str();

        Some(SubtitleCue::new(
            start_frame / self.fps,
            stop_frame / self.fps,
            text,
        ))
    }

    /// Parse lines in order, skipping the ones that are not cues
    pub fn parse_lines<I>(&self, lines: I) -> impl Iterator<Item = SubtitleCue>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let parser = *self;
        lines.into_iter().filter_map(move |line| parser.parse(line.as_ref()))
    }
}
