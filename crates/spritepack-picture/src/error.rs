use thiserror::Error;

/// Errors from picture operations.
#[derive(Debug, Error)]
pub enum PictureError {
    #[error("image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("corrupt compressed picture: {0}")]
    Corrupt(String),

    #[error("invalid cell size {width}x{height}: both dimensions must be positive")]
    InvalidCell { width: u32, height: u32 },
}
