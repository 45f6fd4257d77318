//! Picture and metadata import.
//!
//! Pictures must be in the store before animations can be resolved. The
//! embedded layout imports a spritesheets directory as part of every build;
//! the indexed layout imports pictures, spritesheets and textures in a
//! separate step.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use spritepack_picture::Picture;
use spritepack_spec::{SpritesheetRecord, TextureRecord};
use spritepack_store::{Bucket, BucketRead, ResourceStore, StoreError, WriteTxn};
use walkdir::WalkDir;

use crate::config::ImportConfig;
use crate::error::BuildError;
use crate::loader::{load_spritesheet_catalog, load_texture_catalog};
use crate::writer::{write_picture, write_spritesheet, write_texture};

/// Counts of what an import stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Resource store written.
    pub out: PathBuf,
    /// Pictures decoded and stored.
    pub pictures: usize,
    /// Spritesheet records stored.
    pub spritesheets: usize,
    /// Texture records stored.
    pub textures: usize,
}

/// Decodes every image directly inside `dir` into `bucket[file stem]`.
///
/// Files are processed in file-name order and hidden files are skipped. A
/// subdirectory is a structural error. Returns the number of pictures stored.
pub fn import_pictures(
    txn: &mut WriteTxn<'_>,
    dir: &Path,
    bucket: Bucket,
) -> Result<usize, BuildError> {
    tracing::info!("Importing pictures from {} into '{}'", dir.display(), bucket);
    let mut seen = HashSet::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| {
            let path = err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dir.to_path_buf());
            BuildError::Io {
                path,
                source: err.into(),
            }
        })?;

        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') {
            tracing::trace!("Skipping hidden file {}", entry.path().display());
            continue;
        }
        if entry.file_type().is_dir() {
            return Err(BuildError::Structural {
                path: entry.path().to_path_buf(),
            });
        }

        let path = entry.path();
        let key = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.into_owned());
        let picture = Picture::load(path).map_err(|source| BuildError::Image {
            path: path.to_path_buf(),
            source,
        })?;

        if !seen.insert(key.clone()) {
            tracing::warn!(
                "Picture '{}' imported twice, keeping {}",
                key,
                path.display()
            );
        }
        write_picture(txn, bucket, &key, &picture.compress())?;
    }

    tracing::info!("Imported {} picture(s)", seen.len());
    Ok(seen.len())
}

/// Populates an indexed store from a pictures directory and metadata files.
///
/// Everything is written in one transaction that is only committed once every
/// texture's picture is present.
pub fn import(config: &ImportConfig) -> Result<ImportSummary, BuildError> {
    let spritesheets = config
        .spritesheets_meta
        .as_deref()
        .map(load_spritesheet_catalog)
        .transpose()?
        .unwrap_or_default();
    let textures = config
        .textures_meta
        .as_deref()
        .map(load_texture_catalog)
        .transpose()?
        .unwrap_or_default();

    let store = ResourceStore::open_with(&config.out, &config.store)?;
    let mut txn = store.write()?;
    let mut summary = ImportSummary {
        out: store.path().to_path_buf(),
        ..ImportSummary::default()
    };

    if let Some(dir) = &config.pictures_dir {
        summary.pictures = import_pictures(&mut txn, dir, Bucket::Pictures)?;
    }

    for (id, sheet) in &spritesheets {
        let record = SpritesheetRecord {
            width: sheet.width,
            height: sheet.height,
        };
        write_spritesheet(&mut txn, id, &record)?;
    }
    summary.spritesheets = spritesheets.len();

    for (id, texture) in &textures {
        let record = TextureRecord {
            picture: texture.picture_id.clone(),
        };
        write_texture(&mut txn, id, &record)?;
    }
    summary.textures = textures.len();

    for (id, texture) in &textures {
        let present = match txn.try_get(Bucket::Pictures, &texture.picture_id) {
            Ok(value) => value.is_some(),
            Err(StoreError::MissingBucket(_)) => false,
            Err(err) => return Err(err.into()),
        };
        if !present {
            return Err(BuildError::NotFound {
                entity: "picture",
                id: texture.picture_id.clone(),
                referrer: format!("texture '{}'", id),
            });
        }
    }

    txn.commit()?;
    tracing::info!(
        "Imported {} picture(s), {} spritesheet(s), {} texture(s) into {}",
        summary.pictures,
        summary.spritesheets,
        summary.textures,
        summary.out.display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use spritepack_picture::CompressedPicture;
    use std::fs;

    fn save_png(path: &Path, picture: &Picture) {
        picture.to_image().save(path).unwrap();
    }

    #[test]
    fn test_import_pictures_keys_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        let pictures = dir.path().join("spritesheets");
        fs::create_dir(&pictures).unwrap();
        save_png(&pictures.join("hero.png"), &Picture::filled(4, 4, [1, 1, 1, 255]));
        save_png(&pictures.join("slime.png"), &Picture::filled(2, 2, [2, 2, 2, 255]));
        fs::write(pictures.join(".DS_Store"), b"junk").unwrap();

        let store = ResourceStore::open(dir.path().join("stage.res")).unwrap();
        let mut txn = store.write().unwrap();
        let count = import_pictures(&mut txn, &pictures, Bucket::Spritesheets).unwrap();
        txn.commit().unwrap();

        assert_eq!(count, 2);
        let txn = store.read().unwrap();
        assert_eq!(txn.keys(Bucket::Spritesheets).unwrap(), vec!["hero", "slime"]);
        let hero: CompressedPicture = txn.get_record(Bucket::Spritesheets, "hero").unwrap();
        assert_eq!(
            hero.decompress().unwrap(),
            Picture::filled(4, 4, [1, 1, 1, 255])
        );
    }

    #[test]
    fn test_import_pictures_rejects_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let pictures = dir.path().join("spritesheets");
        fs::create_dir_all(pictures.join("old")).unwrap();

        let store = ResourceStore::open(dir.path().join("stage.res")).unwrap();
        let mut txn = store.write().unwrap();
        let err = import_pictures(&mut txn, &pictures, Bucket::Spritesheets).unwrap_err();
        assert!(matches!(err, BuildError::Structural { .. }));
        assert_eq!(err.kind(), spritepack_spec::ErrorKind::Structural);
    }

    #[test]
    fn test_import_pictures_rejects_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let pictures = dir.path().join("spritesheets");
        fs::create_dir(&pictures).unwrap();
        fs::write(pictures.join("readme.txt"), b"not an image").unwrap();

        let store = ResourceStore::open(dir.path().join("stage.res")).unwrap();
        let mut txn = store.write().unwrap();
        let err = import_pictures(&mut txn, &pictures, Bucket::Spritesheets).unwrap_err();
        assert_eq!(err.kind(), spritepack_spec::ErrorKind::Parse);
    }

    #[test]
    fn test_import_checks_texture_pictures() {
        let dir = tempfile::tempdir().unwrap();
        let pictures = dir.path().join("pictures");
        fs::create_dir(&pictures).unwrap();
        save_png(&pictures.join("hero.png"), &Picture::filled(4, 4, [0, 0, 0, 255]));

        let sheets = dir.path().join("spritesheets-meta.yml");
        let textures = dir.path().join("textures-meta.yml");
        fs::write(&sheets, "hero: {width: 2, height: 2}\n").unwrap();
        fs::write(&textures, "hero_tex: {pictureID: hero}\nlost_tex: {pictureID: lost}\n")
            .unwrap();

        let out = dir.path().join("stage.res");
        let config = ImportConfig::new(&out)
            .with_pictures(&pictures)
            .with_spritesheets(&sheets)
            .with_textures(&textures);
        let err = import(&config).unwrap_err();
        match err {
            BuildError::NotFound { entity, id, referrer } => {
                assert_eq!(entity, "picture");
                assert_eq!(id, "lost");
                assert_eq!(referrer, "texture 'lost_tex'");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }

        // Nothing from the failed import was committed.
        let store = ResourceStore::open(&out).unwrap();
        let txn = store.read().unwrap();
        assert!(!txn.has_bucket(Bucket::Pictures).unwrap());
    }

    #[test]
    fn test_import_indexed_store() {
        let dir = tempfile::tempdir().unwrap();
        let pictures = dir.path().join("pictures");
        fs::create_dir(&pictures).unwrap();
        save_png(&pictures.join("hero.png"), &Picture::filled(4, 4, [0, 0, 0, 255]));

        let sheets = dir.path().join("spritesheets-meta.yml");
        let textures = dir.path().join("textures-meta.yml");
        fs::write(&sheets, "hero: {width: 2, height: 2}\n").unwrap();
        fs::write(&textures, "hero_tex: {picture: hero}\n").unwrap();

        let config = ImportConfig::new(dir.path().join("stage.res"))
            .with_pictures(&pictures)
            .with_spritesheets(&sheets)
            .with_textures(&textures);
        let summary = import(&config).unwrap();
        assert_eq!(
            (summary.pictures, summary.spritesheets, summary.textures),
            (1, 1, 1)
        );

        let store = ResourceStore::open(&config.out).unwrap();
        let txn = store.read().unwrap();
        let sheet: SpritesheetRecord = txn.get_record(Bucket::Spritesheets, "hero").unwrap();
        assert_eq!(sheet, SpritesheetRecord { width: 2, height: 2 });
        let texture: TextureRecord = txn.get_record(Bucket::Textures, "hero_tex").unwrap();
        assert_eq!(texture.picture, "hero");
    }
}
