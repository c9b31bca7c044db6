//! cstojs Core Library
//!
//! This crate provides the configuration side of the cstojs translator:
//! - Descriptor (`cstojs_options.xml`) parsing
//! - Cascading option resolution (global defaults, per-file overrides)
//! - The file job registry handed to the orchestrator
//! - The contract a translation engine has to fulfil
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Descriptor  │────▶│  FileJob    │────▶│ Translation │
//! │   (XML)     │     │  Registry   │     │   Engine    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use cstojs_core::ProjectConfig;
//!
//! let project = ProjectConfig::load("./cstojs_options.xml", "js")?;
//! for job in &project.jobs {
//!     println!("{} -> {}", job.source_path.display(), job.output_file_name);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod descriptor;
pub mod engine;
pub mod error;
pub mod job;
pub mod options;

pub use descriptor::{DEFAULT_DESCRIPTOR, DescriptorParser, starter_descriptor};
pub use engine::{EngineError, TranslatedUnit, TranslationEngine, TranslationUnit};
pub use error::{Error, Result};
pub use job::{FileJob, ProjectConfig};
pub use options::OptionSet;
