//! cstojs Runtime
//!
//! This crate drives translation for a parsed project.
//!
//! # Features
//!
//! - Batch translation of every file job (`translate`)
//! - Polling watch sessions that re-translate changed files (`watch`)
//! - A passthrough engine for running the pipeline without a real translator
//!
//! # Usage
//!
//! ```rust,ignore
//! use cstojs_core::ProjectConfig;
//! use cstojs_runtime::{Orchestrator, PassthroughEngine, PollInterval, WatchScheduler};
//!
//! let engine = PassthroughEngine::default();
//! let project = ProjectConfig::load("cstojs_options.xml", engine.target_extension())?;
//! let orchestrator = Orchestrator::new(engine);
//! orchestrator.translate_all(&project);
//!
//! let mut watcher = WatchScheduler::new(orchestrator, project, PollInterval::default());
//! watcher.run(tokio::signal::ctrl_c()).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod orchestrator;
pub mod watch;

pub use engine::PassthroughEngine;
pub use orchestrator::{BatchReport, Orchestrator, TranslatedFile};
pub use watch::{PollInterval, TickReport, WatchScheduler, WatchState};
