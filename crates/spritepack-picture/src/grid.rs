//! Frame-grid slicing.
//!
//! A spritesheet is cut into fixed-size cells. Cell 0 is the top-left cell;
//! indices advance left-to-right, then top-to-bottom. A trailing partial
//! column or row is dropped.

use spritepack_spec::FrameRect;

use crate::error::PictureError;
use crate::picture::Picture;

/// Row-major cell rectangles of one spritesheet.
pub type FrameGrid = Vec<FrameRect>;

/// Tiles a `picture_width` x `picture_height` picture into `cell_width` x
/// `cell_height` cells.
///
/// Produces `floor(pw / cw) * floor(ph / ch)` rectangles.
pub fn frame_grid(
    picture_width: u32,
    picture_height: u32,
    cell_width: u32,
    cell_height: u32,
) -> Result<FrameGrid, PictureError> {
    if cell_width == 0 || cell_height == 0 {
        return Err(PictureError::InvalidCell {
            width: cell_width,
            height: cell_height,
        });
    }

    let columns = picture_width / cell_width;
    let rows = picture_height / cell_height;

    let mut grid = Vec::with_capacity(columns as usize * rows as usize);
    for row in 0..rows {
        for column in 0..columns {
            grid.push(FrameRect::new(
                column * cell_width,
                row * cell_height,
                cell_width,
                cell_height,
            ));
        }
    }
    Ok(grid)
}

impl Picture {
    /// Tiles this picture into a frame grid.
    pub fn frame_grid(&self, cell_width: u32, cell_height: u32) -> Result<FrameGrid, PictureError> {
        frame_grid(self.width(), self.height(), cell_width, cell_height)
    }
}
