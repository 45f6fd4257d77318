//! In-memory RGBA pictures.

use std::path::Path;

use spritepack_spec::FrameRect;

use crate::error::PictureError;
use crate::rle::CompressedPicture;

/// An 8-bit RGBA picture, row-major, origin at the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    width: u32,
    height: u32,
    /// RGBA bytes, 4 per pixel.
    data: Vec<u8>,
}

impl Picture {
    /// Creates a picture from raw RGBA bytes.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PictureError> {
        let expected = pixel_count(width, height) * 4;
        if data.len() != expected {
            return Err(PictureError::InvalidDimensions(format!(
                "{}x{} RGBA picture needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a picture filled with a single color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let data = rgba.repeat(pixel_count(width, height));
        Self {
            width,
            height,
            data,
        }
    }

    /// Decodes an image file. The format is detected from the file contents.
    pub fn load(path: &Path) -> Result<Self, PictureError> {
        let image = image::ImageReader::open(path)
            .map_err(image::ImageError::IoError)?
            .with_guessed_format()
            .map_err(image::ImageError::IoError)?
            .decode()?;
        Ok(Self::from_image(image))
    }

    fn from_image(image: image::DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            data: rgba.into_raw(),
        }
    }

    /// Converts into an `image` buffer, e.g. for saving.
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn as_rgba8(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the picture.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Sets the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Copies the pixels under `rect` into a new picture.
    pub fn crop(&self, rect: FrameRect) -> Result<Self, PictureError> {
        if rect.right() > self.width || rect.bottom() > self.height {
            return Err(PictureError::InvalidDimensions(format!(
                "crop {} exceeds {}x{} picture",
                rect, self.width, self.height
            )));
        }
        let row_bytes = rect.w as usize * 4;
        let mut data = Vec::with_capacity(row_bytes * rect.h as usize);
        for y in rect.y..rect.bottom() {
            let start = (y as usize * self.width as usize + rect.x as usize) * 4;
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        Ok(Self {
            width: rect.w,
            height: rect.h,
            data,
        })
    }

    /// Run-length compresses the picture for storage.
    pub fn compress(&self) -> CompressedPicture {
        CompressedPicture::from_picture(self)
    }
}

pub(crate) fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}
