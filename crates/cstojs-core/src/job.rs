//! File jobs and the project registry

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

use crate::descriptor::DescriptorParser;
use crate::error::{Error, Result};
use crate::options::OptionSet;

/// One source file's resolved translation unit
#[derive(Debug, Clone, Serialize)]
pub struct FileJob {
    /// Absolute path of the source file
    pub source_path: PathBuf,

    /// File name written into the output directory
    pub output_file_name: String,

    /// Source text, loaded at parse time and refreshed by the watcher
    #[serde(skip)]
    pub source_text: String,

    /// Options resolved for this file
    pub options: OptionSet,

    /// Modification time observed when `source_text` was last read
    #[serde(skip)]
    pub source_modified: SystemTime,
}

impl FileJob {
    /// Load `source_path` and build a job for it.
    pub fn load(
        source_path: impl Into<PathBuf>,
        target_extension: &str,
        options: OptionSet,
    ) -> Result<Self> {
        let source_path = source_path.into();
        if !source_path.is_file() {
            return Err(Error::SourceFileNotFound { path: source_path });
        }

        let output_file_name = output_file_name(&source_path, target_extension);
        let mut job = Self {
            source_path,
            output_file_name,
            source_text: String::new(),
            options,
            source_modified: SystemTime::UNIX_EPOCH,
        };
        job.reload()?;
        Ok(job)
    }

    /// Re-read the source text from disk, recording its modification time.
    ///
    /// The time is taken before the read, so an edit racing the read is seen
    /// as newer on the next check.
    pub fn reload(&mut self) -> Result<()> {
        let modified = self.modified()?;
        self.source_text =
            std::fs::read_to_string(&self.source_path).map_err(|source| Error::SourceRead {
                path: self.source_path.clone(),
                source,
            })?;
        self.source_modified = modified;
        Ok(())
    }

    /// Last-modified time of the source file
    pub fn modified(&self) -> Result<SystemTime> {
        std::fs::metadata(&self.source_path)
            .and_then(|m| m.modified())
            .map_err(|source| Error::SourceRead {
                path: self.source_path.clone(),
                source,
            })
    }

    /// Path of this job's output inside `output_directory`
    pub fn output_path(&self, output_directory: &Path) -> PathBuf {
        output_directory.join(&self.output_file_name)
    }
}

/// Swap the source file's extension for the target language's.
fn output_file_name(source_path: &Path, target_extension: &str) -> String {
    let stem = source_path
        .file_stem()
        .or_else(|| source_path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if target_extension.is_empty() {
        stem
    } else {
        format!("{}.{}", stem, target_extension.trim_start_matches('.'))
    }
}

/// A parsed descriptor: where to write and what to translate
///
/// Built fresh for every `translate` or `watch` invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectConfig {
    /// Absolute, existing output directory
    pub output_directory: PathBuf,

    /// Jobs in descriptor order
    pub jobs: Vec<FileJob>,
}

impl ProjectConfig {
    /// Load a project from a descriptor file
    ///
    /// # Arguments
    ///
    /// * `path` - Descriptor file, or a directory containing `cstojs_options.xml`
    /// * `target_extension` - Extension given to output files, e.g. `"js"`
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let project = ProjectConfig::load("./cstojs_options.xml", "js")?;
    /// println!("Writing to {}", project.output_directory.display());
    /// ```
    pub fn load<P: AsRef<Path>>(path: P, target_extension: &str) -> Result<Self> {
        DescriptorParser::new(target_extension).parse_file(path)
    }

    /// Look up a job by its source path
    pub fn job(&self, source_path: &Path) -> Option<&FileJob> {
        self.jobs.iter().find(|j| j.source_path == source_path)
    }

    /// Number of jobs
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the project has no jobs
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
