//! Project command implementation
//!
//! Builds animations against an indexed store, reading descriptors either from
//! one file or from every matching file under a project root.

use anyhow::{Context, Result};
use colored::Colorize;
use spritepack_pipeline::{BuildConfig, DescriptorSource};
use spritepack_store::StoreOptions;
use std::path::Path;
use std::process::ExitCode;

use super::reporting;

/// Run the project command
///
/// # Arguments
/// * `root` - Project root scanned breadth-first for descriptor files
/// * `suffix` - File name suffix of descriptor files
/// * `animations_meta` - Single descriptor file, replacing the scan
/// * `out` - Resource store to write
/// * `store` - Store open options
pub fn run(
    root: &Path,
    suffix: &str,
    animations_meta: Option<&Path>,
    out: &Path,
    store: StoreOptions,
) -> Result<ExitCode> {
    let source = match animations_meta {
        Some(file) => {
            println!("{} {}", "Building:".cyan().bold(), file.display());
            DescriptorSource::File(file.to_path_buf())
        }
        None => {
            println!(
                "{} {} {}",
                "Scanning:".cyan().bold(),
                root.display(),
                format!("(*{})", suffix).dimmed()
            );
            DescriptorSource::Project {
                root: root.to_path_buf(),
                suffix: suffix.to_string(),
            }
        }
    };

    let config = BuildConfig::project(root, out)
        .with_descriptors(source)
        .with_store_options(store);

    let summary = spritepack_pipeline::run(&config)
        .with_context(|| format!("Failed to build {}", out.display()))?;
    reporting::print_build_summary(&summary);

    Ok(ExitCode::SUCCESS)
}
