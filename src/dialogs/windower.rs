/*!
 * Gap based grouping of subtitle cues into dialogs.
 *
 * Consecutive cues belong to the same dialog while the silence between the
 * end of one cue and the start of the next stays within the configured gap.
 * A windower must only ever see the cues of a single file: timing across
 * files has no meaning.
 */

use crate::subtitle_processor::SubtitleCue;

use super::Dialog;

/// Stateful fold turning an ordered cue sequence into dialogs
#[derive(Debug, Clone)]
pub struct DialogWindower {
    /// Maximum silence in seconds between cues of one dialog (inclusive)
    max_gap: i64,

    /// Cues of the group currently being extended
    current: Vec<SubtitleCue>,

    /// Dialogs closed so far
    dialogs: Vec<Dialog>,
}

impl DialogWindower {
    pub fn new(max_gap_between_dialogs: u32) -> Self {
        Self {
            max_gap: i64::from(max_gap_between_dialogs),
            current: Vec::new(),
            dialogs: Vec::new(),
        }
    }

    /// Feed the next cue in file order
    pub fn push(&mut self, cue: SubtitleCue) {
        let continues = self
            .current
            .last()
            .is_some_and(|last| cue.start_seconds - last.stop_seconds <= self.max_gap);

        if !continues {
            self.close_current();
        }
        self.current.push(cue);
    }

    /// Close the last group and return every dialog of at least two cues
    pub fn finish(mut self) -> Vec<Dialog> {
        self.close_current();
        self.dialogs
    }

    /// Window a complete cue sequence in one go
    pub fn window<I>(max_gap_between_dialogs: u32, cues: I) -> Vec<Dialog>
    where
        I: IntoIterator<Item = SubtitleCue>,
    {
        let mut windower = Self::new(max_gap_between_dialogs);
        for cue in cues {
            windower.push(cue);
        }
        windower.finish()
    }

    fn close_current(&mut self) {
        let group = std::mem::take(&mut self.current);
        // a lone line is not a dialog
        if let Ok(dialog) = Dialog::new(group.into_iter().map(|cue| cue.text).collect()) {
            self.dialogs.push(dialog);
        }
    }
}
