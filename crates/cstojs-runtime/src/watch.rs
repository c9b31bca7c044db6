//! Polling watch sessions
//!
//! Every tick the scheduler walks the file jobs in registry order and
//! re-translates each file whose modification time is newer than the one
//! recorded when its text was last read. For a fresh session that is the
//! time seen while loading the descriptor, so edits saved between loading and
//! the first tick are still picked up. Files are handled one at a time; a
//! re-translation finishes before the next file is checked.
//!
//! The first failure in a tick stops the session for good. Remaining files in
//! that tick are not checked and later ticks return
//! [`Error::SessionStopped`].
//!
//! The descriptor itself is not watched. Option changes need a new session.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use cstojs_core::{Error, FileJob, ProjectConfig, Result, TranslationEngine};

use crate::orchestrator::Orchestrator;

/// Delay between ticks, validated to lie within
/// [`MIN_MILLIS`](Self::MIN_MILLIS)..=[`MAX_MILLIS`](Self::MAX_MILLIS)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollInterval(Duration);

impl PollInterval {
    /// Shortest accepted interval
    pub const MIN_MILLIS: u64 = 1000;
    /// Longest accepted interval
    pub const MAX_MILLIS: u64 = 10_000;

    /// Validate an interval given in milliseconds
    pub fn from_millis(millis: u64) -> Result<Self> {
        if !(Self::MIN_MILLIS..=Self::MAX_MILLIS).contains(&millis) {
            return Err(Error::InvalidPollInterval {
                millis,
                min: Self::MIN_MILLIS,
                max: Self::MAX_MILLIS,
            });
        }
        Ok(Self(Duration::from_millis(millis)))
    }

    /// The interval as a duration
    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// The interval in milliseconds
    pub fn as_millis(&self) -> u64 {
        self.0.as_millis() as u64
    }
}

impl Default for PollInterval {
    fn default() -> Self {
        Self(Duration::from_millis(Self::MIN_MILLIS))
    }
}

/// Lifecycle of a watch session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// Ticking
    Running,
    /// Terminal; a new session is needed to resume
    Stopped,
}

/// Files re-translated during one tick
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Output paths written, in registry order
    pub retranslated: Vec<PathBuf>,
}

/// Fixed-interval polling loop over a project's file jobs
pub struct WatchScheduler<E> {
    orchestrator: Orchestrator<E>,
    output_directory: PathBuf,
    jobs: Vec<FileJob>,
    interval: PollInterval,
    state: WatchState,
}

impl<E: TranslationEngine> WatchScheduler<E> {
    /// Start a session over `project`.
    ///
    /// Each file counts as translated at the modification time recorded when
    /// it was loaded.
    pub fn new(orchestrator: Orchestrator<E>, project: ProjectConfig, interval: PollInterval) -> Self {
        Self {
            orchestrator,
            output_directory: project.output_directory,
            jobs: project.jobs,
            interval,
            state: WatchState::Running,
        }
    }

    /// Current session state
    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Run one tick.
    ///
    /// On failure the session moves to [`WatchState::Stopped`] and the error
    /// is returned.
    pub fn tick(&mut self) -> Result<TickReport> {
        if self.state == WatchState::Stopped {
            return Err(Error::SessionStopped);
        }

        match self.poll() {
            Ok(report) => Ok(report),
            Err(e) => {
                tracing::error!("{}", e);
                tracing::error!("Stopping watch session");
                self.state = WatchState::Stopped;
                Err(e)
            }
        }
    }

    fn poll(&mut self) -> Result<TickReport> {
        let mut report = TickReport::default();

        for job in &mut self.jobs {
            if !job.options.translate_file {
                continue;
            }

            if job.modified()? <= job.source_modified {
                continue;
            }

            tracing::info!("Change detected: {}", job.source_path.display());
            job.reload()?;
            let file = self
                .orchestrator
                .translate_job(job, &self.output_directory)?;

            tracing::info!("✓ {}", file.output_path.display());
            report.retranslated.push(file.output_path);
        }

        Ok(report)
    }

    /// Tick every interval until `shutdown` resolves or a tick fails.
    ///
    /// `shutdown` is only observed while waiting between ticks, so an
    /// in-flight tick always completes. Both exits leave the session
    /// [`WatchState::Stopped`].
    pub async fn run<F: Future>(&mut self, shutdown: F) -> Result<()> {
        tokio::pin!(shutdown);

        tracing::info!(
            "Watching {} file(s) every {}ms (press Ctrl+C to stop)",
            self.jobs.len(),
            self.interval.as_millis()
        );

        while self.state == WatchState::Running {
            tokio::select! {
                _ = tokio::time::sleep(self.interval.as_duration()) => {}
                _ = &mut shutdown => {
                    tracing::info!("Received shutdown signal");
                    self.state = WatchState::Stopped;
                    return Ok(());
                }
            }

            self.tick()?;
        }

        Err(Error::SessionStopped)
    }
}
