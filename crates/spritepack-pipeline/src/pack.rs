//! The build entry point.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use spritepack_store::{Bucket, ResourceStore};

use crate::assemble::assemble;
use crate::config::{BuildConfig, Strategy};
use crate::error::BuildError;
use crate::import::import_pictures;
use crate::loader::{load, load_spritesheet_catalog};
use crate::resolve::{ResolveMode, Resolver};
use crate::tags::index_tags;
use crate::writer::{write_animation, write_tags};

/// What a successful build wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Resource store written.
    pub out: PathBuf,
    /// Resolution strategy used.
    pub strategy: &'static str,
    /// Pictures imported during this build.
    pub pictures: usize,
    /// Animation records written.
    pub animations: usize,
    /// Tag entries written.
    pub tags: usize,
    /// Distinct spritesheet grids sliced.
    pub grids: usize,
    /// Animation names that appeared more than once; the last one was kept.
    pub duplicates: Vec<String>,
    /// BLAKE3 digest of every bucket after the commit.
    pub digests: BTreeMap<Bucket, String>,
}

/// Runs one build.
///
/// Descriptors and metadata are parsed before the store is touched. All
/// writes then happen in a single transaction: either every picture,
/// animation and tag of the run is committed, or the store is left as it was.
pub fn run(config: &BuildConfig) -> Result<BuildSummary, BuildError> {
    let descriptors = load(&config.descriptors)?;
    tracing::info!("Loaded {} animation descriptor(s)", descriptors.len());

    let catalog = match &config.strategy {
        Strategy::Embedded {
            spritesheets_meta, ..
        } => Some(load_spritesheet_catalog(spritesheets_meta)?),
        Strategy::Indexed => None,
    };

    let store = ResourceStore::open_with(&config.out, &config.store)?;
    let mut txn = store.write()?;

    let pictures = match &config.strategy {
        Strategy::Embedded {
            pictures_dir: Some(dir),
            ..
        } => import_pictures(&mut txn, dir, Bucket::Spritesheets)?,
        _ => 0,
    };

    let mode = match &catalog {
        Some(catalog) => ResolveMode::Embedded(catalog),
        None => ResolveMode::Indexed,
    };
    let mut resolver = Resolver::new(mode);
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    tracing::info!(
        "Building {} animation(s) ({} layout)",
        descriptors.len(),
        config.strategy.as_str()
    );
    txn.create_bucket(Bucket::Animations)?;
    for descriptor in &descriptors {
        let grid = resolver.resolve(&txn, descriptor)?;
        let record = assemble(descriptor, grid)?;

        if !seen.insert(descriptor.name.as_str()) {
            tracing::warn!(
                "Animation '{}' is defined more than once, the last definition wins",
                descriptor.name
            );
            duplicates.push(descriptor.name.clone());
        }
        write_animation(&mut txn, &descriptor.name, &record)?;
    }

    let index = index_tags(&descriptors);
    let tags = write_tags(&mut txn, &index)?;

    txn.commit()?;
    let digests = store.digests()?;
    tracing::info!(
        "Wrote {} animation(s) and {} tag(s) to {}",
        seen.len(),
        tags,
        store.path().display()
    );

    Ok(BuildSummary {
        out: store.path().to_path_buf(),
        strategy: config.strategy.as_str(),
        pictures,
        animations: seen.len(),
        tags,
        grids: resolver.cached(),
        duplicates,
        digests,
    })
}
