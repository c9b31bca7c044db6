//! Translation orchestrator
//!
//! Feeds file jobs to a [`TranslationEngine`] and writes the results into the
//! project's output directory.
//!
//! Batch failures are per file: a file that fails to translate or write does
//! not stop the remaining files, and nothing already written is rolled back.
//! All failures are collected into the [`BatchReport`].

use std::path::{Path, PathBuf};

use cstojs_core::{Error, FileJob, ProjectConfig, Result, TranslationEngine, TranslationUnit};

/// One written output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedFile {
    /// Where the text was written
    pub output_path: PathBuf,
    /// The translated text
    pub text: String,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files written, in registry order
    pub written: Vec<TranslatedFile>,
    /// Per-file failures, in registry order
    pub failures: Vec<Error>,
}

impl BatchReport {
    /// Whether every file was written
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives a translation engine over file jobs
pub struct Orchestrator<E> {
    engine: E,
}

impl<E: TranslationEngine> Orchestrator<E> {
    /// Create an orchestrator around `engine`
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Translate every job with one engine call per file.
    pub fn translate_all(&self, project: &ProjectConfig) -> BatchReport {
        let mut report = BatchReport::default();

        for job in selected(project) {
            match self.translate_job(job, &project.output_directory) {
                Ok(file) => report.written.push(file),
                Err(e) => {
                    tracing::warn!("{}", e);
                    report.failures.push(e);
                }
            }
        }

        log_completion(&report);
        report
    }

    /// Translate every job with a single engine call for the whole batch.
    ///
    /// An engine failure, or results that do not line up with the jobs, fail
    /// the batch before anything is written. Writes are still per file.
    pub fn translate_batch(&self, project: &ProjectConfig) -> Result<BatchReport> {
        let jobs: Vec<&FileJob> = selected(project).collect();
        let units: Vec<TranslationUnit<'_>> = jobs.iter().map(|job| (*job).into()).collect();

        let translated = self
            .engine
            .translate(&units)
            .map_err(|e| Error::EngineBatch {
                files: units.len(),
                message: e.message,
            })?;

        if translated.len() != units.len() {
            return Err(Error::EngineBatch {
                files: units.len(),
                message: format!("engine returned {} result(s)", translated.len()),
            });
        }

        if let Some((job, unit)) = jobs
            .iter()
            .zip(&translated)
            .find(|(job, unit)| unit.id != job.source_path)
        {
            return Err(Error::EngineBatch {
                files: units.len(),
                message: format!(
                    "result for {} returned in place of {}",
                    unit.id.display(),
                    job.source_path.display()
                ),
            });
        }

        let mut report = BatchReport::default();
        for (job, unit) in jobs.iter().zip(translated) {
            match write_output(job.output_path(&project.output_directory), unit.text) {
                Ok(file) => report.written.push(file),
                Err(e) => {
                    tracing::warn!("{}", e);
                    report.failures.push(e);
                }
            }
        }

        log_completion(&report);
        Ok(report)
    }

    /// Translate a single job and write its output, overwriting any existing
    /// file.
    pub fn translate_job(&self, job: &FileJob, output_directory: &Path) -> Result<TranslatedFile> {
        let text = self
            .engine
            .translate_one(&TranslationUnit::from(job))
            .map_err(|e| Error::EngineTranslation {
                path: job.source_path.clone(),
                message: e.message,
            })?;

        write_output(job.output_path(output_directory), text)
    }
}

fn selected(project: &ProjectConfig) -> impl Iterator<Item = &FileJob> {
    project.jobs.iter().filter(|job| {
        if !job.options.translate_file {
            tracing::debug!("Skipping {}", job.source_path.display());
        }
        job.options.translate_file
    })
}

fn write_output(output_path: PathBuf, text: String) -> Result<TranslatedFile> {
    if let Err(source) = std::fs::write(&output_path, &text) {
        return Err(Error::IoWrite {
            path: output_path,
            source,
        });
    }
    Ok(TranslatedFile { output_path, text })
}

fn log_completion(report: &BatchReport) {
    for file in &report.written {
        tracing::info!("✓ {}", file.output_path.display());
    }
    if !report.is_success() {
        tracing::error!("{} file(s) failed", report.failures.len());
    }
}
