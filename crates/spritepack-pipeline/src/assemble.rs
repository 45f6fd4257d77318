//! Animation assembly.

use spritepack_picture::FrameGrid;
use spritepack_spec::{AnimationDescriptor, AnimationRecord};

use crate::error::BuildError;

/// Builds the persisted record for `descriptor` from its spritesheet's grid.
///
/// Frames keep descriptor order; a cell may be referenced any number of times.
pub fn assemble(
    descriptor: &AnimationDescriptor,
    grid: &FrameGrid,
) -> Result<AnimationRecord, BuildError> {
    let mut record = AnimationRecord::new(
        descriptor.spritesheet_id.clone(),
        descriptor.texture_id.clone(),
    );
    for (position, frame) in descriptor.frames.iter().enumerate() {
        let rect = grid
            .get(frame.index as usize)
            .ok_or_else(|| BuildError::IndexOutOfRange {
                animation: descriptor.name.clone(),
                spritesheet: descriptor.spritesheet_id.clone(),
                position,
                index: frame.index,
                grid_len: grid.len(),
            })?;
        record.push(*rect, frame.duration);
    }
    Ok(record)
}
