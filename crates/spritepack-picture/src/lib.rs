//! SpritePack picture component.
//!
//! Decodes raster images into RGBA pictures, compresses them losslessly for
//! storage, and slices spritesheet pictures into frame grids.
//!
//! Coordinates follow the `image` crate: origin at the top-left corner, `y`
//! growing downwards.

mod error;
pub mod grid;
mod picture;
pub mod rle;

pub use error::PictureError;
pub use grid::{frame_grid, FrameGrid};
pub use picture::Picture;
pub use rle::{CompressedPicture, Run};
