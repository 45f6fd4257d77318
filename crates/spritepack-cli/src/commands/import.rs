//! Import command implementation
//!
//! Populates an indexed store with pictures, spritesheet cell sizes and
//! texture bindings.

use anyhow::{Context, Result};
use colored::Colorize;
use spritepack_pipeline::ImportConfig;
use spritepack_store::StoreOptions;
use std::path::Path;
use std::process::ExitCode;

/// Run the import command
///
/// At least one input must be given.
pub fn run(
    pictures: Option<&Path>,
    spritesheets_meta: Option<&Path>,
    textures_meta: Option<&Path>,
    out: &Path,
    store: StoreOptions,
) -> Result<ExitCode> {
    if pictures.is_none() && spritesheets_meta.is_none() && textures_meta.is_none() {
        anyhow::bail!(
            "nothing to import (expected --pictures, --spritesheets-meta or --textures-meta)"
        );
    }

    println!("{} {}", "Importing into:".cyan().bold(), out.display());

    let mut config = ImportConfig::new(out);
    config.store = store;
    if let Some(dir) = pictures {
        println!("{} {}", "Pictures:".dimmed(), dir.display());
        config = config.with_pictures(dir);
    }
    if let Some(path) = spritesheets_meta {
        println!("{} {}", "Spritesheets:".dimmed(), path.display());
        config = config.with_spritesheets(path);
    }
    if let Some(path) = textures_meta {
        println!("{} {}", "Textures:".dimmed(), path.display());
        config = config.with_textures(path);
    }

    let summary = spritepack_pipeline::import(&config)
        .with_context(|| format!("Failed to import into {}", out.display()))?;

    println!("  {} {} picture(s)", "+".green(), summary.pictures);
    println!("  {} {} spritesheet(s)", "+".green(), summary.spritesheets);
    println!("  {} {} texture(s)", "+".green(), summary.textures);
    println!("{} {}", "Wrote".green().bold(), summary.out.display());

    Ok(ExitCode::SUCCESS)
}
