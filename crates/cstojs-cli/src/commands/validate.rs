//! Validate the descriptor without translating

use anyhow::{Context, Result};
use cstojs_core::{ProjectConfig, TranslationEngine};
use cstojs_runtime::PassthroughEngine;

/// Run the validate command
pub async fn run(config_path: &str, json: bool) -> Result<()> {
    tracing::info!("Validating descriptor: {}", config_path);

    let engine = PassthroughEngine::default();
    let project = ProjectConfig::load(config_path, engine.target_extension())
        .context("Failed to load descriptor")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&project)?);
        return Ok(());
    }

    tracing::info!("✓ Output: {}", project.output_directory.display());
    for job in &project.jobs {
        tracing::info!(
            "✓ {} -> {}",
            job.source_path.display(),
            job.output_file_name
        );
        tracing::debug!("  {:?}", job.options);
    }
    tracing::info!("✓ {} file(s) to translate", project.len());
    Ok(())
}
