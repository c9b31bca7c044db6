//! Translation engine contract
//!
//! The engine does the actual source-to-target conversion. This crate only
//! describes how it is called; implementations live elsewhere.

use std::path::Path;

use thiserror::Error;

use crate::job::FileJob;
use crate::options::OptionSet;

/// Error reported by a translation engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EngineError {
    /// Engine message
    pub message: String,
}

impl EngineError {
    /// Create an engine error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Read-only view of one file handed to the engine
#[derive(Debug, Clone, Copy)]
pub struct TranslationUnit<'a> {
    /// Identifies the unit; the job's source path
    pub id: &'a Path,
    /// Text to translate
    pub source_text: &'a str,
    /// Options resolved for the file
    pub options: &'a OptionSet,
}

impl<'a> From<&'a FileJob> for TranslationUnit<'a> {
    fn from(job: &'a FileJob) -> Self {
        Self {
            id: &job.source_path,
            source_text: &job.source_text,
            options: &job.options,
        }
    }
}

/// Engine output for one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedUnit {
    /// Id of the unit this was produced from
    pub id: std::path::PathBuf,
    /// Translated text
    pub text: String,
}

/// A source-to-target translator.
///
/// Engines only see shared references, so they can not mutate the jobs they
/// are given.
pub trait TranslationEngine {
    /// Extension (without the dot) given to output files
    fn target_extension(&self) -> &str;

    /// Translate a single unit
    fn translate_one(&self, unit: &TranslationUnit<'_>) -> Result<String, EngineError>;

    /// Translate a batch, returning one result per unit in input order.
    ///
    /// The default calls [`translate_one`](Self::translate_one) for each unit
    /// and stops at the first failure.
    fn translate(&self, units: &[TranslationUnit<'_>]) -> Result<Vec<TranslatedUnit>, EngineError> {
        units
            .iter()
            .map(|unit| {
                Ok(TranslatedUnit {
                    id: unit.id.to_path_buf(),
                    text: self.translate_one(unit)?,
                })
            })
            .collect()
    }
}

impl<E: TranslationEngine + ?Sized> TranslationEngine for &E {
    fn target_extension(&self) -> &str {
        (**self).target_extension()
    }

    fn translate_one(&self, unit: &TranslationUnit<'_>) -> Result<String, EngineError> {
        (**self).translate_one(unit)
    }

    fn translate(&self, units: &[TranslationUnit<'_>]) -> Result<Vec<TranslatedUnit>, EngineError> {
        (**self).translate(units)
    }
}
