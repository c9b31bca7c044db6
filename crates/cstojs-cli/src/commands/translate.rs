//! Translate every file in the descriptor

use anyhow::{Context, Result};
use cstojs_core::{ProjectConfig, TranslationEngine};
use cstojs_runtime::{BatchReport, Orchestrator, PassthroughEngine};

/// Run the translate command
pub async fn run(config_path: &str, batch: bool) -> Result<()> {
    tracing::info!("Loading descriptor from {}", config_path);

    let engine = PassthroughEngine::default();
    let project = ProjectConfig::load(config_path, engine.target_extension())
        .context("Failed to load descriptor")?;

    let orchestrator = Orchestrator::new(engine);
    let report = if batch {
        orchestrator
            .translate_batch(&project)
            .context("Batch translation failed")?
    } else {
        orchestrator.translate_all(&project)
    };

    check(&report, project.len())?;
    tracing::info!("--- Done: {}", project.output_directory.display());
    Ok(())
}

/// Turn per-file failures into a single error
pub(crate) fn check(report: &BatchReport, total: usize) -> Result<()> {
    if report.is_success() {
        return Ok(());
    }

    let details: Vec<String> = report.failures.iter().map(|e| format!("  {}", e)).collect();
    anyhow::bail!(
        "{} of {} file(s) failed:\n{}",
        report.failures.len(),
        total,
        details.join("\n")
    )
}
