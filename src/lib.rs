/*!
 * # subdialogs - dialog corpora from subtitle archives
 *
 * A Rust library that turns folders of frame-timed MicroDVD subtitles into a
 * corpus of conversational dialogs for sequence-model training.
 *
 * ## Features
 *
 * - Recursive, restartable discovery of subtitle files
 * - Strict decoding with a charset priority list (UTF-8, Windows-1250,
 *   ISO-8859-1, ISO-8859-2, US-ASCII)
 * - Removal of style tags, speaker dashes, punctuation noise and group credits
 * - `{start}{stop}text` and `[start][stop]text` cue parsing
 * - Dialog detection from the silence between consecutive cues
 * - Reproducible, seeded 9/10 train/test split
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `file_utils`: File discovery and charset decoding
 * - `preprocessor`: Line normalisation
 * - `subtitle_processor`: Cue parsing
 * - `dialogs`: Dialog type, windowing and the per-file loader
 * - `corpus`: Pooled corpus, statistics and the seeded splitter
 * - `sentences`: Plain text feed for word-vector training
 * - `app_controller`: Worker pool driving the whole pipeline
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod corpus;
pub mod dialogs;
pub mod errors;
pub mod file_utils;
pub mod preprocessor;
pub mod sentences;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, StopHandle};
pub use corpus::{Corpus, CorpusReport, CorpusSplitter, LearningSets};
pub use dialogs::{Dialog, DialogLoader, DialogWindower};
pub use errors::{CorpusError, DialogError};
pub use file_utils::{Charset, FileManager, SubtitleDirectory};
pub use preprocessor::LinePreprocessor;
pub use sentences::SentenceIterator;
pub use subtitle_processor::{MicroDvdParser, SubtitleCue};
