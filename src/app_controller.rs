use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use futures::stream::{self, StreamExt, TryStreamExt};
use log::{info, warn};

use crate::app_config::Config;
use crate::corpus::{Corpus, CorpusReport, CorpusSplitter, LearningSets};
use crate::dialogs::{Dialog, DialogLoader, FileOutcome};
use crate::errors::CorpusError;
use crate::file_utils::SubtitleDirectory;
use crate::preprocessor::LinePreprocessor;
use crate::sentences::SentenceIterator;

// @module: Application controller for corpus construction

/// Shared flag that stops submitting files to the worker pool
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Main application controller building dialog corpora
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Per-file pipeline shared by the workers
    loader: Arc<DialogLoader>,

    stop: StopHandle,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let loader = DialogLoader::from_config(&config)?;

        Ok(Self {
            config,
            loader: Arc::new(loader),
            stop: StopHandle::default(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle for stopping a running load from another task or thread
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn splitter(&self) -> CorpusSplitter {
        CorpusSplitter::new(self.config.seed)
    }

    /// Build the corpus of every subtitle file below `dir`.
    ///
    /// Files are decoded and windowed on a bounded pool of blocking workers.
    /// Results are put back in discovery order before pooling so the corpus,
    /// and every seeded split of it, is reproducible. `on_file` is called as
    /// each file finishes, in completion order.
    pub async fn load_corpus<P, F>(
        &self,
        dir: P,
        mut on_file: F,
    ) -> Result<(Corpus, CorpusReport), CorpusError>
    where
        P: AsRef<Path>,
        F: FnMut(&FileOutcome),
    {
        let directory = SubtitleDirectory::open(dir)?;
        info!("Creating corpus of all dialogs in {:?}", directory.root());

        let stop = self.stop.clone();
        let files = directory
            .files()
            .enumerate()
            .take_while(move |_| !stop.is_stopped());

        let mut finished: Vec<(usize, FileOutcome)> = stream::iter(files)
            .map(|(index, entry)| {
                let loader = Arc::clone(&self.loader);
                async move {
                    let path = entry?;
                    let outcome = tokio::task::spawn_blocking(move || loader.load_file(path)).await?;
                    Ok::<_, CorpusError>((index, outcome))
                }
            })
            .buffer_unordered(self.config.concurrent_files)
            .inspect_ok(|(_, outcome)| on_file(outcome))
            .try_collect()
            .await?;

        if self.stop.is_stopped() {
            warn!(
                "Stopped before the whole directory was processed, keeping {} finished files",
                finished.len()
            );
        }

        finished.sort_by_key(|(index, _)| *index);
        let outcomes: Vec<FileOutcome> = finished.into_iter().map(|(_, outcome)| outcome).collect();

        let report = CorpusReport::from_outcomes(&outcomes);
        let corpus = Corpus::from_outcomes(&outcomes);
        info!("Corpus ready: {}", report);

        Ok((corpus, report))
    }

    /// Build the corpus and partition it with the configured seed
    pub async fn load_train_data<P: AsRef<Path>>(
        &self,
        dir: P,
    ) -> Result<LearningSets<Dialog>, CorpusError> {
        let (corpus, _) = self.load_corpus(dir, |_| {}).await?;
        Ok(corpus.split(&self.splitter()))
    }

    /// Restartable per-file text feed for an external word-vector trainer
    pub fn sentences<P: AsRef<Path>>(&self, dir: P) -> Result<SentenceIterator, CorpusError> {
        Ok(SentenceIterator::new(
            SubtitleDirectory::open(dir)?,
            self.config.encodings.clone(),
            LinePreprocessor::new(&self.config.preprocessing.watermarks),
        ))
    }
}
