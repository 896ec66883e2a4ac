use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::file_utils::{Charset, FileManager};
use crate::preprocessor::DEFAULT_WATERMARKS;

/// Application configuration module
/// This module handles loading, validating and saving the corpus builder
/// settings. Every field has a default so partial config files are accepted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the subtitle files
    #[serde(default = "default_subtitles_path")]
    pub subtitles_path: String,

    /// Cue timing and dialog windowing
    #[serde(default)]
    pub dialogs: DialogConfig,

    /// Seed of the train/test shuffle
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Charsets tried in order when decoding a file
    #[serde(default = "default_encodings")]
    pub encodings: Vec<Charset>,

    /// Line normalisation
    #[serde(default)]
    pub preprocessing: PreprocessingConfig,

    /// Number of files processed concurrently
    #[serde(default = "default_concurrent_files")]
    pub concurrent_files: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Cue timing and windowing configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DialogConfig {
    /// Frame rate used to turn frame numbers into seconds
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Largest silence in seconds between two cues of the same dialog
    #[serde(default = "default_max_gap_between_dialogs")]
    pub max_gap_between_dialogs: u32,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            max_gap_between_dialogs: default_max_gap_between_dialogs(),
        }
    }
}

/// Line preprocessing configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PreprocessingConfig {
    /// Lines containing any of these (case-insensitive) are dropped
    #[serde(default = "default_watermarks")]
    pub watermarks: Vec<String>,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            watermarks: default_watermarks(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_subtitles_path() -> String {
    "subtitles".to_string()
}

fn default_fps() -> u32 {
    25
}

fn default_max_gap_between_dialogs() -> u32 {
    5
}

fn default_seed() -> u64 {
    1337
}

fn default_encodings() -> Vec<Charset> {
    Charset::DEFAULT_PRIORITY.to_vec()
}

fn default_watermarks() -> Vec<String> {
    DEFAULT_WATERMARKS.iter().map(|w| w.to_string()).collect()
}

fn default_concurrent_files() -> usize {
    4
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load `path` if it exists, otherwise write and return the defaults
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        log::warn!("Config file not found at {:?}, creating default config.", path);
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save the configuration as pretty printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        FileManager::write_to_file(path, &json)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.dialogs.fps == 0 {
            return Err(anyhow!("dialogs.fps must be a positive integer"));
        }

        if self.encodings.is_empty() {
            return Err(anyhow!("At least one encoding must be configured"));
        }

        if self.concurrent_files == 0 {
            return Err(anyhow!("concurrent_files must be at least 1"));
        }

        if self.preprocessing.watermarks.iter().any(|w| w.trim().is_empty()) {
            return Err(anyhow!("Watermarks must not be empty strings"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            subtitles_path: default_subtitles_path(),
            dialogs: DialogConfig::default(),
            seed: default_seed(),
            encodings: default_encodings(),
            preprocessing: PreprocessingConfig::default(),
            concurrent_files: default_concurrent_files(),
            log_level: LogLevel::default(),
        }
    }
}
