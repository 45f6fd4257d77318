use std::path::PathBuf;

use thiserror::Error;

use crate::bucket::Bucket;

/// Errors from the resource store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open resource store {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: heed::Error,
    },

    #[error("resource store path {} is a directory", .0.display())]
    NotAFile(PathBuf),

    #[error("storage error: {0}")]
    Heed(#[from] heed::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bucket '{0}' not found")]
    MissingBucket(Bucket),

    #[error("key '{key}' not found in bucket '{bucket}'")]
    MissingKey { bucket: Bucket, key: String },

    #[error("key {key:?} in bucket '{bucket}' contains a NUL character")]
    InvalidKey { bucket: Bucket, key: String },

    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),
}

impl StoreError {
    /// Whether the error is a missing bucket or key rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::MissingBucket(_) | StoreError::MissingKey { .. }
        )
    }
}
