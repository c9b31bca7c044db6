//! Error types for cstojs-core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for cstojs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a project or translating its files
#[derive(Error, Debug)]
pub enum Error {
    /// Descriptor file could not be found
    #[error("descriptor file not found: {path}")]
    DescriptorNotFound {
        /// Path that was searched
        path: PathBuf,
    },

    /// Descriptor is not a well-formed document
    #[error("malformed descriptor {path}: {source}")]
    Xml {
        /// Descriptor path
        path: PathBuf,
        /// Underlying reader error
        #[source]
        source: quick_xml::Error,
    },

    /// A required attribute is absent from an element
    #[error("<{element}> is missing its '{attribute}' attribute")]
    MissingAttribute {
        /// Element name
        element: &'static str,
        /// Attribute name
        attribute: &'static str,
    },

    /// A `File` element was opened before the previous one was closed
    #[error("<File Source=\"{source_attr}\"> is nested inside another <File>")]
    NestedFile {
        /// Source attribute of the inner element
        source_attr: String,
    },

    /// Two sources would be written to the same output file
    #[error("{first} and {second} both translate to '{output_file_name}'")]
    DuplicateOutput {
        /// Shared output file name
        output_file_name: String,
        /// Source declared first
        first: PathBuf,
        /// Source declared later
        second: PathBuf,
    },

    /// Output folder does not exist
    #[error("output directory does not exist: {path}")]
    OutputDirectoryNotFound {
        /// Resolved folder path
        path: PathBuf,
    },

    /// Source file does not exist
    #[error("source file does not exist: {path}")]
    SourceFileNotFound {
        /// Resolved source path
        path: PathBuf,
    },

    /// Attribute on an `Option` element is not a known option
    #[error("unknown option '{name}' (value: \"{value}\"); expected one of: {expected}")]
    UnknownOption {
        /// Attribute name
        name: String,
        /// Attribute value
        value: String,
        /// Accepted attribute names, comma separated
        expected: String,
    },

    /// Custom name mapping does not follow the `from-to,from-to` grammar
    #[error("malformed name mapping \"{value}\": pair \"{pair}\" must be 'source-target'")]
    MalformedMapping {
        /// Whole attribute value
        value: String,
        /// The pair that failed to split
        pair: String,
    },

    /// Boolean option with a value other than true/false
    #[error("option '{attribute}' expects true or false, got \"{value}\"")]
    MalformedBoolean {
        /// Attribute name
        attribute: String,
        /// Offending value
        value: String,
    },

    /// Poll interval outside the accepted range
    #[error("poll interval {millis}ms is outside {min}..={max}ms")]
    InvalidPollInterval {
        /// Requested interval
        millis: u64,
        /// Lower bound
        min: u64,
        /// Upper bound
        max: u64,
    },

    /// The translation engine rejected a file
    #[error("translation of {path} failed: {message}")]
    EngineTranslation {
        /// Source file being translated
        path: PathBuf,
        /// Engine message
        message: String,
    },

    /// The engine failed a whole batch or broke the one-result-per-file contract
    #[error("batch translation of {files} file(s) failed: {message}")]
    EngineBatch {
        /// Number of files in the batch
        files: usize,
        /// Engine message
        message: String,
    },

    /// Source file could not be (re)read
    #[error("failed to read {path}: {source}")]
    SourceRead {
        /// Source path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Translated output could not be written
    #[error("failed to write {path}: {source}")]
    IoWrite {
        /// Output path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A watch session that already failed was asked to tick again
    #[error("watch session has stopped")]
    SessionStopped,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
