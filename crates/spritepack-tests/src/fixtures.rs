//! Test fixture utilities for creating synthetic art projects.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use spritepack_picture::Picture;
use spritepack_pipeline::BuildConfig;
use spritepack_spec::{AnimationRecord, TagRecord};
use spritepack_store::{Bucket, BucketRead, ResourceStore};
use tempfile::TempDir;

/// A scratch project directory with the default embedded layout:
///
/// ```text
/// <root>/spritesheets/        images
/// <root>/animations-meta.yml
/// <root>/spritesheets-meta.yml
/// <root>/stage.res
/// ```
pub struct ProjectFixture {
    pub root: TempDir,
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectFixture {
    /// Create a new empty project fixture.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        Self { root }
    }

    /// Get the project root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path of the resource store.
    pub fn out(&self) -> PathBuf {
        self.path().join("stage.res")
    }

    /// Directory holding spritesheet images.
    pub fn spritesheets_dir(&self) -> PathBuf {
        self.path().join("spritesheets")
    }

    /// Write a text file relative to the root, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    /// Save a picture as PNG relative to the root, creating parent directories.
    pub fn add_picture(&self, relative: &str, picture: &Picture) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        picture
            .to_image()
            .save(&path)
            .expect("Failed to write PNG fixture");
        path
    }

    /// Add a spritesheet image to the embedded layout.
    pub fn add_spritesheet(&self, id: &str, picture: &Picture) -> PathBuf {
        self.add_picture(&format!("spritesheets/{}.png", id), picture)
    }

    /// Write `animations-meta.yml`.
    pub fn set_animations(&self, yaml: &str) -> PathBuf {
        self.write("animations-meta.yml", yaml)
    }

    /// Write `spritesheets-meta.yml`.
    pub fn set_spritesheets_meta(&self, yaml: &str) -> PathBuf {
        self.write("spritesheets-meta.yml", yaml)
    }

    /// Build configuration for the embedded layout rooted at this fixture.
    pub fn embedded_config(&self) -> BuildConfig {
        BuildConfig::embedded(
            Some(self.spritesheets_dir()),
            self.path().join("animations-meta.yml"),
            self.path().join("spritesheets-meta.yml"),
            self.out(),
        )
    }
}

/// Distinct opaque color of grid cell `index`.
pub fn cell_color(index: u32) -> [u8; 4] {
    [
        (index * 40 % 256) as u8,
        (255 - index * 20 % 256) as u8,
        (index * 7 + 1) as u8,
        255,
    ]
}

/// A spritesheet of `columns` x `rows` cells, each filled with [`cell_color`]
/// of its row-major index counted from the top-left.
pub fn reference_sheet(columns: u32, rows: u32, cell_width: u32, cell_height: u32) -> Picture {
    let mut picture = Picture::filled(columns * cell_width, rows * cell_height, [0, 0, 0, 0]);
    for row in 0..rows {
        for column in 0..columns {
            let color = cell_color(row * columns + column);
            for y in row * cell_height..(row + 1) * cell_height {
                for x in column * cell_width..(column + 1) * cell_width {
                    picture.set_pixel(x, y, color);
                }
            }
        }
    }
    picture
}

/// Decoded animation record from a store.
pub fn read_animation(out: &Path, name: &str) -> AnimationRecord {
    let store = ResourceStore::open(out).expect("Failed to open store");
    let txn = store.read().expect("Failed to begin read");
    txn.get_record(Bucket::Animations, name)
        .expect("Failed to read animation")
}

/// Decoded tag entry from a store.
pub fn read_tag(out: &Path, tag: &str) -> TagRecord {
    let store = ResourceStore::open(out).expect("Failed to open store");
    let txn = store.read().expect("Failed to begin read");
    txn.get_record(Bucket::Tags, tag).expect("Failed to read tag")
}

/// Every bucket's raw entries, for before/after comparisons.
pub type StoreSnapshot = BTreeMap<Bucket, Vec<(String, Vec<u8>)>>;

/// Raw contents of every existing bucket.
pub fn snapshot(out: &Path) -> StoreSnapshot {
    let store = ResourceStore::open(out).expect("Failed to open store");
    let txn = store.read().expect("Failed to begin read");
    let mut buckets = StoreSnapshot::new();
    for bucket in Bucket::ALL {
        if txn.has_bucket(bucket).expect("Failed to probe bucket") {
            buckets.insert(bucket, txn.entries(bucket).expect("Failed to read bucket"));
        }
    }
    buckets
}
