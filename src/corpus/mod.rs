/*!
 * The pooled dialog corpus and its ingestion statistics.
 */

pub mod splitter;

use std::fmt;

use crate::dialogs::{Dialog, FileOutcome};

pub use splitter::{CorpusSplitter, LearningSets, split_into_sets};

/// Every dialog extracted from a directory, in file discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    dialogs: Vec<Dialog>,
}

impl Corpus {
    pub fn new(dialogs: Vec<Dialog>) -> Self {
        Self { dialogs }
    }

    /// Pool the dialogs of processed files, keeping the order of `outcomes`
    pub fn from_outcomes<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a FileOutcome>,
    {
        let dialogs = outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                FileOutcome::Loaded(file) => Some(file.dialogs.iter().cloned()),
                FileOutcome::Skipped { .. } => None,
            })
            .flatten()
            .collect();
        Self { dialogs }
    }

    pub fn dialogs(&self) -> &[Dialog] {
        &self.dialogs
    }

    pub fn len(&self) -> usize {
        self.dialogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialogs.is_empty()
    }

    /// Shuffle and partition the corpus into training and testing sets
    pub fn split(self, splitter: &CorpusSplitter) -> LearningSets<Dialog> {
        splitter.split_into_sets(self.dialogs)
    }

    pub fn into_dialogs(self) -> Vec<Dialog> {
        self.dialogs
    }
}

/// Counters collected while building a corpus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusReport {
    pub files_discovered: usize,
    pub files_loaded: usize,
    pub files_skipped: usize,
    pub lines: usize,
    pub cues: usize,
    pub dialogs: usize,
    pub utterances: usize,
}

impl CorpusReport {
    /// Account for one processed file
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.files_discovered += 1;
        match outcome {
            FileOutcome::Loaded(file) => {
                self.files_loaded += 1;
                self.lines += file.line_count;
                self.cues += file.cue_count;
                self.dialogs += file.dialogs.len();
                self.utterances += file.dialogs.iter().map(Dialog::len).sum::<usize>();
            }
            FileOutcome::Skipped { .. } => self.files_skipped += 1,
        }
    }

    pub fn from_outcomes<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a FileOutcome>,
    {
        let mut report = Self::default();
        for outcome in outcomes {
            report.record(outcome);
        }
        report
    }
}

impl fmt::Display for CorpusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files ({} loaded, {} skipped), {} lines, {} cues, {} dialogs, {} utterances",
            self.files_discovered,
            self.files_loaded,
            self.files_skipped,
            self.lines,
            self.cues,
            self.dialogs,
            self.utterances
        )
    }
}
