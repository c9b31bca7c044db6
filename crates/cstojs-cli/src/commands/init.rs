//! Create a starter descriptor

use anyhow::{Context, Result};
use cstojs_core::{DEFAULT_DESCRIPTOR, starter_descriptor};
use std::fs;
use std::path::{Path, PathBuf};

/// Run the init command
pub async fn run(config_path: &str, folder: &str) -> Result<()> {
    let descriptor = descriptor_path(config_path);

    if descriptor.exists() {
        anyhow::bail!("{} already exists", descriptor.display());
    }

    let base = descriptor
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    tracing::info!("Creating output folder: '{}'", folder);
    fs::create_dir_all(base.join(folder))
        .with_context(|| format!("Failed to create output folder '{}'", folder))?;

    tracing::info!("Creating '{}'", descriptor.display());
    fs::write(&descriptor, starter_descriptor(folder))
        .with_context(|| format!("Failed to write {}", descriptor.display()))?;

    tracing::info!("Setup ended! Add your sources, then run 'cstojs translate'");
    Ok(())
}

fn descriptor_path(config_path: &str) -> PathBuf {
    let path = Path::new(config_path);
    if path.is_dir() {
        path.join(DEFAULT_DESCRIPTOR)
    } else {
        path.to_path_buf()
    }
}
