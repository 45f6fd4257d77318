//! Descriptor loading and project discovery.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use spritepack_spec::{
    parse_animations, parse_spritesheets, parse_textures, AnimationDescriptor, SpecError,
    SpritesheetCatalog, TextureCatalog,
};

use crate::config::DescriptorSource;
use crate::error::BuildError;

/// Loads every animation descriptor named by `source`, in order.
pub fn load(source: &DescriptorSource) -> Result<Vec<AnimationDescriptor>, BuildError> {
    match source {
        DescriptorSource::File(path) => load_file(path),
        DescriptorSource::Project { root, suffix } => scan_project(root, suffix),
    }
}

/// Parses one animation descriptor file.
pub fn load_file(path: &Path) -> Result<Vec<AnimationDescriptor>, BuildError> {
    read_document(path, parse_animations)
}

/// Parses a spritesheet metadata file.
pub fn load_spritesheet_catalog(path: &Path) -> Result<SpritesheetCatalog, BuildError> {
    read_document(path, parse_spritesheets)
}

/// Parses a texture metadata file.
pub fn load_texture_catalog(path: &Path) -> Result<TextureCatalog, BuildError> {
    read_document(path, parse_textures)
}

fn read_document<T>(
    path: &Path,
    parse: impl FnOnce(&str) -> Result<T, SpecError>,
) -> Result<T, BuildError> {
    let source = fs::read_to_string(path).map_err(BuildError::io(path))?;
    parse(&source).map_err(|source| BuildError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the descriptors of every matching file under `root`.
///
/// Descriptors are appended in discovery order; the first unreadable
/// directory or malformed file aborts the scan.
pub fn scan_project(root: &Path, suffix: &str) -> Result<Vec<AnimationDescriptor>, BuildError> {
    let files = discover(root, suffix)?;
    tracing::info!(
        "Found {} descriptor file(s) under {}",
        files.len(),
        root.display()
    );

    let mut descriptors = Vec::new();
    for file in &files {
        let loaded = load_file(file)?;
        tracing::debug!("{}: {} animation(s)", file.display(), loaded.len());
        descriptors.extend(loaded);
    }
    Ok(descriptors)
}

/// Finds every file under `root` whose name ends with `suffix`.
///
/// Breadth-first: all entries of a directory are visited before any entry of
/// its subdirectories. Entries of one directory are visited in file-name
/// order. Symbolic links are not followed.
pub fn discover(root: &Path, suffix: &str) -> Result<Vec<PathBuf>, BuildError> {
    let mut queue: VecDeque<(PathBuf, usize)> = VecDeque::new();
    enqueue_children(&mut queue, root, 1)?;

    let mut found = Vec::new();
    while let Some((path, depth)) = queue.pop_front() {
        let file_type = fs::symlink_metadata(&path)
            .map_err(BuildError::io(&path))?
            .file_type();

        if file_type.is_dir() {
            enqueue_children(&mut queue, &path, depth + 1)?;
        } else if file_type.is_file() && has_suffix(&path, suffix) {
            tracing::trace!("Descriptor at depth {}: {}", depth, path.display());
            found.push(path);
        }
    }
    Ok(found)
}

fn enqueue_children(
    queue: &mut VecDeque<(PathBuf, usize)>,
    dir: &Path,
    depth: usize,
) -> Result<(), BuildError> {
    let mut children = fs::read_dir(dir)
        .and_then(|entries| {
            entries
                .map(|entry| entry.map(|e| e.path()))
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(BuildError::io(dir))?;
    children.sort();
    queue.extend(children.into_iter().map(|path| (path, depth)));
    Ok(())
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(suffix))
}
