/*!
 * Dialogs extracted from subtitle files.
 *
 * - `windower`: groups a file's cues into dialogs using timing gaps
 * - `loader`: per-file pipeline from raw bytes to dialogs
 */

pub mod loader;
pub mod windower;

use serde::{Deserialize, Serialize};

use crate::errors::DialogError;

pub use loader::{DialogLoader, FileDialogs, FileOutcome};
pub use windower::DialogWindower;

/// An ordered run of at least two consecutive utterances.
///
/// Dialogs are immutable and compare by content only. They serialize as a
/// plain array of utterances; deserialization applies the same validation as
/// [`Dialog::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Dialog {
    utterances: Vec<String>,
}

impl Dialog {
    /// Minimum number of utterances in a dialog
    pub const MIN_UTTERANCES: usize = 2;

    pub fn new(utterances: Vec<String>) -> Result<Self, DialogError> {
        if utterances.len() < Self::MIN_UTTERANCES {
            return Err(DialogError::TooShort(utterances.len()));
        }
        Ok(Self { utterances })
    }

    pub fn utterances(&self) -> &[String] {
        &self.utterances
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }

    /// Everything but the last utterance, newline separated
    pub fn question(&self) -> String {
        self.utterances[..self.utterances.len() - 1].join("\n")
    }

    /// The last utterance
    pub fn answer(&self) -> &str {
        // non-empty by construction
        &self.utterances[self.utterances.len() - 1]
    }

    pub fn into_utterances(self) -> Vec<String> {
        self.utterances
    }
}

impl TryFrom<Vec<String>> for Dialog {
    type Error = DialogError;

    fn try_from(utterances: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(utterances)
    }
}

impl From<Dialog> for Vec<String> {
    fn from(dialog: Dialog) -> Self {
        dialog.utterances
    }
}
