//! Pack command implementation
//!
//! Imports a directory of spritesheet images and builds the animations that
//! reference them, using the embedded store layout.

use anyhow::{Context, Result};
use colored::Colorize;
use spritepack_pipeline::BuildConfig;
use spritepack_store::StoreOptions;
use std::path::Path;
use std::process::ExitCode;

use super::reporting;

/// Run the pack command
///
/// # Arguments
/// * `spritesheets` - Directory of spritesheet images, keyed by file stem
/// * `animations_meta` - Animation descriptor file
/// * `spritesheets_meta` - Spritesheet cell-size metadata file
/// * `out` - Resource store to write
/// * `skip_import` - Reuse pictures already in the store instead of importing
/// * `store` - Store open options
pub fn run(
    spritesheets: &Path,
    animations_meta: &Path,
    spritesheets_meta: &Path,
    out: &Path,
    skip_import: bool,
    store: StoreOptions,
) -> Result<ExitCode> {
    println!("{} {}", "Packing:".cyan().bold(), animations_meta.display());
    if skip_import {
        println!("{} pictures already in {}", "Reusing:".dimmed(), out.display());
    } else {
        println!("{} {}", "Pictures:".dimmed(), spritesheets.display());
    }

    let pictures_dir = (!skip_import).then(|| spritesheets.to_path_buf());
    let config = BuildConfig::embedded(pictures_dir, animations_meta, spritesheets_meta, out)
        .with_store_options(store);

    let summary = spritepack_pipeline::run(&config)
        .with_context(|| format!("Failed to pack {}", out.display()))?;
    reporting::print_build_summary(&summary);

    Ok(ExitCode::SUCCESS)
}
