//! Translate, then keep re-translating changed files

use anyhow::{Context, Result};
use cstojs_core::{ProjectConfig, TranslationEngine};
use cstojs_runtime::{Orchestrator, PassthroughEngine, PollInterval, WatchScheduler};

use super::translate::check;

/// Run the watch command
pub async fn run(config_path: &str, delay: PollInterval) -> Result<()> {
    tracing::info!("Loading descriptor from {}", config_path);

    let engine = PassthroughEngine::default();
    let project = ProjectConfig::load(config_path, engine.target_extension())
        .context("Failed to load descriptor")?;

    let orchestrator = Orchestrator::new(engine);
    check(&orchestrator.translate_all(&project), project.len())?;
    tracing::info!("Descriptor changes need a restart of the watch session");

    let mut watcher = WatchScheduler::new(orchestrator, project, delay);
    watcher
        .run(tokio::signal::ctrl_c())
        .await
        .context("Watch session stopped")?;

    tracing::info!("Watch session ended");
    Ok(())
}
