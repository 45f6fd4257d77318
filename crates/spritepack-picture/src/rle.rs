//! Lossless run-length compression of pictures.
//!
//! Pixels are scanned in row-major order and consecutive identical RGBA values
//! are collapsed into runs. Spritesheets are mostly transparent background, so
//! this is small on disk and trivially cheap to expand at load time.

use serde::{Deserialize, Serialize};

use crate::error::PictureError;
use crate::picture::{pixel_count, Picture};

/// A run of identical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Number of pixels in the run, never zero.
    pub len: u32,
    /// Pixel value.
    pub rgba: [u8; 4],
}

/// A run-length compressed picture, the form pictures are stored in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedPicture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel runs in row-major order.
    pub runs: Vec<Run>,
}

impl CompressedPicture {
    /// Compresses a picture.
    pub fn from_picture(picture: &Picture) -> Self {
        let mut runs: Vec<Run> = Vec::new();
        for px in picture.as_rgba8().chunks_exact(4) {
            let rgba = [px[0], px[1], px[2], px[3]];
            match runs.last_mut() {
                Some(run) if run.rgba == rgba && run.len < u32::MAX => run.len += 1,
                _ => runs.push(Run { len: 1, rgba }),
            }
        }
        Self {
            width: picture.width(),
            height: picture.height(),
            runs,
        }
    }

    /// Expands back into a picture.
    ///
    /// Fails if the runs do not cover exactly `width * height` pixels.
    pub fn decompress(&self) -> Result<Picture, PictureError> {
        let expected = pixel_count(self.width, self.height);
        let mut covered = 0usize;
        for run in &self.runs {
            if run.len == 0 {
                return Err(PictureError::Corrupt("zero-length run".to_string()));
            }
            covered += run.len as usize;
            if covered > expected {
                break;
            }
        }
        if covered != expected {
            return Err(PictureError::Corrupt(format!(
                "runs cover {} pixels, {}x{} picture has {}",
                covered, self.width, self.height, expected
            )));
        }

        let mut data = Vec::with_capacity(expected * 4);
        for run in &self.runs {
            for _ in 0..run.len {
                data.extend_from_slice(&run.rgba);
            }
        }
        Picture::from_rgba8(self.width, self.height, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn striped(width: u32, height: u32) -> Picture {
        let mut picture = Picture::filled(width, height, [0, 0, 0, 0]);
        for y in 0..height {
            for x in 0..width {
                if (x / 3 + y) % 2 == 0 {
                    picture.set_pixel(x, y, [x as u8, y as u8, 200, 255]);
                }
            }
        }
        picture
    }

    #[test]
    fn test_roundtrip_is_exact() {
        for (w, h) in [(1, 1), (7, 5), (64, 64), (33, 17)] {
            let picture = striped(w, h);
            let restored = picture.compress().decompress().unwrap();
            assert_eq!(restored, picture, "{}x{}", w, h);
        }
    }

    #[test]
    fn test_roundtrip_empty_picture() {
        let picture = Picture::filled(0, 0, [0, 0, 0, 0]);
        let compressed = picture.compress();
        assert!(compressed.runs.is_empty());
        assert_eq!(compressed.decompress().unwrap(), picture);
    }

    #[test]
    fn test_uniform_picture_is_one_run() {
        let picture = Picture::filled(16, 16, [1, 2, 3, 4]);
        let compressed = picture.compress();
        assert_eq!(
            compressed.runs,
            vec![Run {
                len: 256,
                rgba: [1, 2, 3, 4]
            }]
        );
    }

    #[test]
    fn test_decompress_is_idempotent() {
        let compressed = striped(9, 9).compress();
        let first = compressed.decompress().unwrap();
        let second = compressed.decompress().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.compress(), compressed);
    }

    #[test]
    fn test_short_runs_are_corrupt() {
        let compressed = CompressedPicture {
            width: 2,
            height: 2,
            runs: vec![Run {
                len: 3,
                rgba: [0; 4],
            }],
        };
        assert!(matches!(
            compressed.decompress().unwrap_err(),
            PictureError::Corrupt(_)
        ));
    }

    #[test]
    fn test_long_runs_are_corrupt() {
        let compressed = CompressedPicture {
            width: 1,
            height: 1,
            runs: vec![Run {
                len: 2,
                rgba: [0; 4],
            }],
        };
        assert!(compressed.decompress().is_err());
    }

    #[test]
    fn test_zero_length_run_is_corrupt() {
        let compressed = CompressedPicture {
            width: 1,
            height: 1,
            runs: vec![
                Run {
                    len: 0,
                    rgba: [0; 4],
                },
                Run {
                    len: 1,
                    rgba: [0; 4],
                },
            ],
        };
        assert!(compressed.decompress().is_err());
    }
}
