//! Build errors.

use std::path::PathBuf;

use spritepack_picture::PictureError;
use spritepack_spec::{ErrorKind, SpecError};
use spritepack_store::{Bucket, StoreError};
use thiserror::Error;

/// Errors that abort a build.
///
/// Every variant names the offending file or identifier. Use
/// [`BuildError::kind`] to classify.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A descriptor or metadata document is malformed.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: SpecError,
    },

    /// An animation resolved through the texture chain has no texture.
    #[error("animation '{animation}' has no textureID (required to resolve its picture)")]
    MissingTexture { animation: String },

    /// An image file could not be decoded.
    #[error("failed to decode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: PictureError,
    },

    /// A spritesheet's cell size cannot tile its picture.
    #[error("spritesheet '{spritesheet}' cannot be sliced: {source}")]
    Grid {
        spritesheet: String,
        #[source]
        source: PictureError,
    },

    /// A referenced record does not exist.
    #[error("{entity} '{id}' not found (referenced by {referrer})")]
    NotFound {
        entity: &'static str,
        id: String,
        referrer: String,
    },

    /// A bucket the build reads from does not exist.
    #[error("bucket '{0}' not found in resource store")]
    MissingBucket(Bucket),

    /// A frame index addresses a cell past the end of the frame grid.
    #[error(
        "animation '{animation}' frame #{position} uses cell {index}, but spritesheet '{spritesheet}' has {grid_len} cells"
    )]
    IndexOutOfRange {
        animation: String,
        spritesheet: String,
        position: usize,
        index: u32,
        grid_len: usize,
    },

    /// Filesystem failure.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored picture is corrupt.
    #[error("stored picture '{key}' in bucket '{bucket}' is corrupt: {source}")]
    StoredPicture {
        bucket: Bucket,
        key: String,
        #[source]
        source: PictureError,
    },

    /// A directory was found where only files are allowed.
    #[error("unexpected directory {}: only image files are allowed here", path.display())]
    Structural { path: PathBuf },

    /// Store open, transaction, or codec failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BuildError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::Parse { .. }
            | BuildError::MissingTexture { .. }
            | BuildError::Image { .. }
            | BuildError::Grid { .. } => ErrorKind::Parse,
            BuildError::NotFound { .. } | BuildError::MissingBucket(_) => ErrorKind::NotFound,
            BuildError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            BuildError::Io { .. } | BuildError::StoredPicture { .. } => ErrorKind::Io,
            BuildError::Structural { .. } => ErrorKind::Structural,
            BuildError::Store(err) if err.is_not_found() => ErrorKind::NotFound,
            BuildError::Store(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| BuildError::Io { path, source }
    }
}
