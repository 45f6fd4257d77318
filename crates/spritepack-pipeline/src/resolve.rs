//! Reference resolution: descriptor -> picture -> frame grid.

use std::collections::HashMap;

use spritepack_picture::{CompressedPicture, FrameGrid};
use spritepack_spec::{AnimationDescriptor, SpritesheetCatalog, SpritesheetRecord, TextureRecord};
use spritepack_store::{codec, Bucket, BucketRead, StoreError};

use crate::error::BuildError;

/// How spritesheet IDs are turned into pictures and cell sizes.
#[derive(Debug, Clone, Copy)]
pub enum ResolveMode<'a> {
    /// Picture in `spritesheets`, cell size from the metadata catalog.
    Embedded(&'a SpritesheetCatalog),
    /// `spritesheets` -> `textures` -> `pictures`.
    Indexed,
}

/// Resolves descriptors to frame grids, memoizing one grid per
/// (spritesheet, texture) pair.
pub struct Resolver<'a> {
    mode: ResolveMode<'a>,
    grids: HashMap<(String, Option<String>), FrameGrid>,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver with an empty grid cache.
    pub fn new(mode: ResolveMode<'a>) -> Self {
        Self {
            mode,
            grids: HashMap::new(),
        }
    }

    /// Number of distinct grids built so far.
    pub fn cached(&self) -> usize {
        self.grids.len()
    }

    /// Frame grid of the spritesheet `descriptor` refers to.
    ///
    /// Every lookup goes through `txn`, so pictures written earlier in the
    /// same transaction are visible.
    pub fn resolve<T: BucketRead>(
        &mut self,
        txn: &T,
        descriptor: &AnimationDescriptor,
    ) -> Result<&FrameGrid, BuildError> {
        let key = (
            descriptor.spritesheet_id.clone(),
            descriptor.texture_id.clone(),
        );
        if !self.grids.contains_key(&key) {
            let grid = match self.mode {
                ResolveMode::Embedded(catalog) => resolve_embedded(txn, catalog, descriptor)?,
                ResolveMode::Indexed => resolve_indexed(txn, descriptor)?,
            };
            tracing::debug!(
                "Spritesheet '{}' sliced into {} cells",
                descriptor.spritesheet_id,
                grid.len()
            );
            self.grids.insert(key.clone(), grid);
        }
        Ok(&self.grids[&key])
    }
}

fn resolve_embedded<T: BucketRead>(
    txn: &T,
    catalog: &SpritesheetCatalog,
    descriptor: &AnimationDescriptor,
) -> Result<FrameGrid, BuildError> {
    let sheet_id = &descriptor.spritesheet_id;
    let referrer = animation_ref(descriptor);

    let bytes = fetch(txn, Bucket::Spritesheets, sheet_id, "spritesheet", &referrer)?;
    let cell = catalog.get(sheet_id).ok_or_else(|| BuildError::NotFound {
        entity: "spritesheet metadata",
        id: sheet_id.clone(),
        referrer,
    })?;

    slice(Bucket::Spritesheets, sheet_id, &bytes, sheet_id, cell.width, cell.height)
}

fn resolve_indexed<T: BucketRead>(
    txn: &T,
    descriptor: &AnimationDescriptor,
) -> Result<FrameGrid, BuildError> {
    let sheet_id = &descriptor.spritesheet_id;
    let referrer = animation_ref(descriptor);

    let sheet: SpritesheetRecord = codec::decode(&fetch(
        txn,
        Bucket::Spritesheets,
        sheet_id,
        "spritesheet",
        &referrer,
    )?)?;

    let texture_id = descriptor
        .texture_id
        .as_deref()
        .ok_or_else(|| BuildError::MissingTexture {
            animation: descriptor.name.clone(),
        })?;
    let texture: TextureRecord =
        codec::decode(&fetch(txn, Bucket::Textures, texture_id, "texture", &referrer)?)?;

    let bytes = fetch(
        txn,
        Bucket::Pictures,
        &texture.picture,
        "picture",
        &format!("texture '{}'", texture_id),
    )?;

    slice(
        Bucket::Pictures,
        &texture.picture,
        &bytes,
        sheet_id,
        sheet.width,
        sheet.height,
    )
}

fn animation_ref(descriptor: &AnimationDescriptor) -> String {
    format!("animation '{}'", descriptor.name)
}

/// Raw value of `bucket[key]`, with absence reported as a missing reference.
fn fetch<T: BucketRead>(
    txn: &T,
    bucket: Bucket,
    key: &str,
    entity: &'static str,
    referrer: &str,
) -> Result<Vec<u8>, BuildError> {
    match txn.try_get(bucket, key) {
        Ok(Some(bytes)) => Ok(bytes),
        Ok(None) => Err(BuildError::NotFound {
            entity,
            id: key.to_string(),
            referrer: referrer.to_string(),
        }),
        Err(StoreError::MissingBucket(bucket)) => Err(BuildError::MissingBucket(bucket)),
        Err(err) => Err(err.into()),
    }
}

fn slice(
    bucket: Bucket,
    key: &str,
    bytes: &[u8],
    spritesheet: &str,
    cell_width: u32,
    cell_height: u32,
) -> Result<FrameGrid, BuildError> {
    let compressed: CompressedPicture = codec::decode(bytes)?;
    let picture = compressed
        .decompress()
        .map_err(|source| BuildError::StoredPicture {
            bucket,
            key: key.to_string(),
            source,
        })?;
    picture
        .frame_grid(cell_width, cell_height)
        .map_err(|source| BuildError::Grid {
            spritesheet: spritesheet.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use spritepack_picture::Picture;
    use spritepack_spec::{FrameRect, SpritesheetDescriptor};
    use spritepack_store::ResourceStore;

    fn temp_store() -> (tempfile::TempDir, ResourceStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ResourceStore::open(dir.path().join("stage.res")).unwrap();
        (dir, store)
    }

    fn walk() -> AnimationDescriptor {
        AnimationDescriptor::new("walk", "hero")
            .with_texture("hero_tex")
            .with_frame(0, 100)
    }

    #[test]
    fn test_embedded_resolution() {
        let (_dir, store) = temp_store();
        let mut txn = store.write().unwrap();
        txn.put_record(
            Bucket::Spritesheets,
            "hero",
            &Picture::filled(64, 64, [0, 0, 0, 0]).compress(),
        )
        .unwrap();

        let mut catalog = SpritesheetCatalog::new();
        catalog.insert("hero".to_string(), SpritesheetDescriptor::new(32, 32));

        let mut resolver = Resolver::new(ResolveMode::Embedded(&catalog));
        let grid = resolver.resolve(&txn, &walk()).unwrap();
        assert_eq!(grid.len(), 4);
        assert_eq!(grid[2], FrameRect::new(0, 32, 32, 32));
        assert_eq!(resolver.cached(), 1);
    }

    #[test]
    fn test_embedded_missing_metadata() {
        let (_dir, store) = temp_store();
        let mut txn = store.write().unwrap();
        txn.put_record(
            Bucket::Spritesheets,
            "hero",
            &Picture::filled(8, 8, [0, 0, 0, 0]).compress(),
        )
        .unwrap();

        let catalog = SpritesheetCatalog::new();
        let mut resolver = Resolver::new(ResolveMode::Embedded(&catalog));
        let err = resolver.resolve(&txn, &walk()).unwrap_err();
        assert!(matches!(
            err,
            BuildError::NotFound { entity: "spritesheet metadata", .. }
        ));
    }

    #[test]
    fn test_indexed_chain() {
        let (_dir, store) = temp_store();
        let mut txn = store.write().unwrap();
        txn.put_record(
            Bucket::Spritesheets,
            "hero",
            &SpritesheetRecord { width: 16, height: 8 },
        )
        .unwrap();
        txn.put_record(
            Bucket::Textures,
            "hero_tex",
            &TextureRecord {
                picture: "hero_png".to_string(),
            },
        )
        .unwrap();
        txn.put_record(
            Bucket::Pictures,
            "hero_png",
            &Picture::filled(48, 20, [1, 2, 3, 4]).compress(),
        )
        .unwrap();

        let mut resolver = Resolver::new(ResolveMode::Indexed);
        let grid = resolver.resolve(&txn, &walk()).unwrap();
        assert_eq!(grid.len(), 3 * 2);
        assert_eq!(grid[4], FrameRect::new(16, 8, 16, 8));
    }

    #[test]
    fn test_indexed_missing_links() {
        let (_dir, store) = temp_store();
        let mut txn = store.write().unwrap();
        let mut resolver = Resolver::new(ResolveMode::Indexed);

        // No buckets at all.
        let err = resolver.resolve(&txn, &walk()).unwrap_err();
        assert!(matches!(err, BuildError::MissingBucket(Bucket::Spritesheets)));

        txn.put_record(
            Bucket::Spritesheets,
            "hero",
            &SpritesheetRecord { width: 8, height: 8 },
        )
        .unwrap();
        txn.create_bucket(Bucket::Textures).unwrap();

        let untextured = AnimationDescriptor::new("idle", "hero").with_frame(0, 1);
        let err = resolver.resolve(&txn, &untextured).unwrap_err();
        assert!(matches!(err, BuildError::MissingTexture { .. }));

        let err = resolver.resolve(&txn, &walk()).unwrap_err();
        match err {
            BuildError::NotFound { entity, id, referrer } => {
                assert_eq!(entity, "texture");
                assert_eq!(id, "hero_tex");
                assert_eq!(referrer, "animation 'walk'");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }

        txn.put_record(
            Bucket::Textures,
            "hero_tex",
            &TextureRecord {
                picture: "gone".to_string(),
            },
        )
        .unwrap();
        txn.create_bucket(Bucket::Pictures).unwrap();
        let err = resolver.resolve(&txn, &walk()).unwrap_err();
        assert!(matches!(
            err,
            BuildError::NotFound { entity: "picture", .. }
        ));
        assert_eq!(resolver.cached(), 0);
    }

    #[test]
    fn test_indexed_rejects_embedded_spritesheet_entry() {
        let (_dir, store) = temp_store();
        let mut txn = store.write().unwrap();
        txn.put_record(
            Bucket::Spritesheets,
            "hero",
            &Picture::filled(64, 64, [0, 0, 0, 0]).compress(),
        )
        .unwrap();

        let mut resolver = Resolver::new(ResolveMode::Indexed);
        let err = resolver.resolve(&txn, &walk()).unwrap_err();
        assert!(matches!(err, BuildError::Store(StoreError::Codec(_))));
        assert_eq!(err.kind(), spritepack_spec::ErrorKind::Io);
    }

    #[test]
    fn test_corrupt_stored_picture() {
        let (_dir, store) = temp_store();
        let mut txn = store.write().unwrap();
        let broken = CompressedPicture {
            width: 4,
            height: 4,
            runs: vec![],
        };
        txn.put_record(Bucket::Spritesheets, "hero", &broken).unwrap();

        let mut catalog = SpritesheetCatalog::new();
        catalog.insert("hero".to_string(), SpritesheetDescriptor::new(2, 2));
        let mut resolver = Resolver::new(ResolveMode::Embedded(&catalog));

        let err = resolver.resolve(&txn, &walk()).unwrap_err();
        assert!(matches!(err, BuildError::StoredPicture { .. }));
        assert_eq!(err.kind(), spritepack_spec::ErrorKind::Io);
    }
}
