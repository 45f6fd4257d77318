//! Build configuration.
//!
//! A build is fully described by one immutable [`BuildConfig`] (or
//! [`ImportConfig`] for the import stage) handed to the entry point.

use std::path::PathBuf;

use spritepack_store::StoreOptions;

/// Default directory holding spritesheet images.
pub const DEFAULT_SPRITESHEETS_DIR: &str = "./spritesheets";
/// Default animation descriptor file.
pub const DEFAULT_ANIMATIONS_META: &str = "./animations-meta.yml";
/// Default spritesheet metadata file.
pub const DEFAULT_SPRITESHEETS_META: &str = "./spritesheets-meta.yml";
/// Default resource store path.
pub const DEFAULT_OUT: &str = "./stage.res";
/// Default suffix of animation descriptor files in a project scan.
pub const DEFAULT_DESCRIPTOR_SUFFIX: &str = ".anim.yml";

/// Where animation descriptors come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorSource {
    /// A single descriptor file.
    File(PathBuf),
    /// Every file under `root` whose name ends with `suffix`, breadth-first.
    Project { root: PathBuf, suffix: String },
}

/// How spritesheet references are resolved to pictures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Pictures live directly in the `spritesheets` bucket, cell sizes come
    /// from a metadata file.
    Embedded {
        /// Spritesheet metadata file (`id: {width, height}`).
        spritesheets_meta: PathBuf,
        /// Directory of images imported into the `spritesheets` bucket before
        /// animations are built. `None` reuses pictures already in the store.
        pictures_dir: Option<PathBuf>,
    },
    /// Spritesheet -> texture -> picture chain through the store buckets.
    Indexed,
}

impl Strategy {
    /// Short name for logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Embedded { .. } => "embedded",
            Strategy::Indexed => "indexed",
        }
    }
}

/// Everything an animation build needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Animation descriptor input.
    pub descriptors: DescriptorSource,
    /// Reference resolution strategy.
    pub strategy: Strategy,
    /// Resource store to write.
    pub out: PathBuf,
    /// Store open options.
    pub store: StoreOptions,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            descriptors: DescriptorSource::File(PathBuf::from(DEFAULT_ANIMATIONS_META)),
            strategy: Strategy::Embedded {
                spritesheets_meta: PathBuf::from(DEFAULT_SPRITESHEETS_META),
                pictures_dir: Some(PathBuf::from(DEFAULT_SPRITESHEETS_DIR)),
            },
            out: PathBuf::from(DEFAULT_OUT),
            store: StoreOptions::default(),
        }
    }
}

impl BuildConfig {
    /// Embedded build: images directory + animation file + spritesheet metadata.
    pub fn embedded(
        pictures_dir: Option<PathBuf>,
        animations_meta: impl Into<PathBuf>,
        spritesheets_meta: impl Into<PathBuf>,
        out: impl Into<PathBuf>,
    ) -> Self {
        Self {
            descriptors: DescriptorSource::File(animations_meta.into()),
            strategy: Strategy::Embedded {
                spritesheets_meta: spritesheets_meta.into(),
                pictures_dir,
            },
            out: out.into(),
            store: StoreOptions::default(),
        }
    }

    /// Indexed build over every descriptor file in a project tree.
    pub fn project(root: impl Into<PathBuf>, out: impl Into<PathBuf>) -> Self {
        Self {
            descriptors: DescriptorSource::Project {
                root: root.into(),
                suffix: DEFAULT_DESCRIPTOR_SUFFIX.to_string(),
            },
            strategy: Strategy::Indexed,
            out: out.into(),
            store: StoreOptions::default(),
        }
    }

    /// Replaces the descriptor source.
    pub fn with_descriptors(mut self, descriptors: DescriptorSource) -> Self {
        self.descriptors = descriptors;
        self
    }

    /// Replaces the store options.
    pub fn with_store_options(mut self, store: StoreOptions) -> Self {
        self.store = store;
        self
    }
}

/// Everything the import stage needs to pre-populate an indexed store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Images imported into the `pictures` bucket.
    pub pictures_dir: Option<PathBuf>,
    /// Spritesheet metadata imported into the `spritesheets` bucket.
    pub spritesheets_meta: Option<PathBuf>,
    /// Texture metadata imported into the `textures` bucket.
    pub textures_meta: Option<PathBuf>,
    /// Resource store to write.
    pub out: PathBuf,
    /// Store open options.
    pub store: StoreOptions,
}

impl ImportConfig {
    /// An import that writes nothing yet; fill in the inputs.
    pub fn new(out: impl Into<PathBuf>) -> Self {
        Self {
            pictures_dir: None,
            spritesheets_meta: None,
            textures_meta: None,
            out: out.into(),
            store: StoreOptions::default(),
        }
    }

    /// Sets the pictures directory.
    pub fn with_pictures(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pictures_dir = Some(dir.into());
        self
    }

    /// Sets the spritesheet metadata file.
    pub fn with_spritesheets(mut self, path: impl Into<PathBuf>) -> Self {
        self.spritesheets_meta = Some(path.into());
        self
    }

    /// Sets the texture metadata file.
    pub fn with_textures(mut self, path: impl Into<PathBuf>) -> Self {
        self.textures_meta = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_legacy_layout() {
        let config = BuildConfig::default();
        assert_eq!(
            config.descriptors,
            DescriptorSource::File(PathBuf::from("./animations-meta.yml"))
        );
        assert_eq!(
            config.strategy,
            Strategy::Embedded {
                spritesheets_meta: PathBuf::from("./spritesheets-meta.yml"),
                pictures_dir: Some(PathBuf::from("./spritesheets")),
            }
        );
        assert_eq!(config.out, PathBuf::from("./stage.res"));
        assert_eq!(config.strategy.as_str(), "embedded");
    }

    #[test]
    fn test_project_config() {
        let config = BuildConfig::project("game", "game.res");
        assert_eq!(
            config.descriptors,
            DescriptorSource::Project {
                root: PathBuf::from("game"),
                suffix: ".anim.yml".to_string(),
            }
        );
        assert_eq!(config.strategy, Strategy::Indexed);
    }
}
