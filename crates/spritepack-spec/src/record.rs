//! Records persisted into the resource store.
//!
//! These are the normalized shapes the runtime reads back. Byte layout is the
//! store codec's concern; this module only fixes the fields.

use serde::{Deserialize, Serialize};

/// A pixel rectangle inside a picture. Origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl FrameRect {
    /// Creates a rectangle.
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }
}

impl std::fmt::Display for FrameRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}x{})", self.x, self.y, self.w, self.h)
    }
}

/// A normalized animation: frame rectangles with index-aligned durations.
///
/// Frames and durations can only be appended together, so both sequences
/// always have the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationRecord {
    /// Spritesheet the rectangles refer to.
    pub spritesheet: String,
    /// Texture the spritesheet was resolved through, if any.
    pub texture: Option<String>,
    frames: Vec<FrameRect>,
    durations: Vec<u32>,
}

impl AnimationRecord {
    /// Creates an empty record for the given spritesheet.
    pub fn new(spritesheet: impl Into<String>, texture: Option<String>) -> Self {
        Self {
            spritesheet: spritesheet.into(),
            texture,
            frames: Vec::new(),
            durations: Vec::new(),
        }
    }

    /// Appends a frame and its duration.
    pub fn push(&mut self, frame: FrameRect, duration: u32) {
        self.frames.push(frame);
        self.durations.push(duration);
    }

    /// Frame rectangles in playback order.
    pub fn frames(&self) -> &[FrameRect] {
        &self.frames
    }

    /// Durations in ticks, `durations()[i]` applies to `frames()[i]`.
    pub fn durations(&self) -> &[u32] {
        &self.durations
    }

    /// Iterates over `(frame, duration)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&FrameRect, u32)> + '_ {
        self.frames.iter().zip(self.durations.iter().copied())
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the record has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Whether frames and durations line up.
    ///
    /// Always true for records built with [`AnimationRecord::push`]; decoded
    /// records are checked with this before use.
    pub fn is_consistent(&self) -> bool {
        self.frames.len() == self.durations.len()
    }

    /// Sum of all durations in ticks.
    pub fn total_duration(&self) -> u64 {
        self.durations.iter().map(|&d| u64::from(d)).sum()
    }
}

/// Cell size of a spritesheet stored in an indexed store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpritesheetRecord {
    /// Cell width in pixels.
    pub width: u32,
    /// Cell height in pixels.
    pub height: u32,
}

/// A texture stored in an indexed store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureRecord {
    /// Key of the picture in the `pictures` bucket.
    pub picture: String,
}

/// Animation names grouped under one tag, in build order.
pub type TagRecord = Vec<String>;
