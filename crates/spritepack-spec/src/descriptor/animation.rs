//! Animation descriptors.
//!
//! An animation names a spritesheet and lists the cells it plays, each with a
//! duration in engine ticks.

use serde::{Deserialize, Serialize};

use super::parse_document;
use crate::error::SpecError;

/// An animation as authored in a descriptor file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationDescriptor {
    /// Animation name, used as the storage key.
    pub name: String,

    /// Grouping tag. The empty tag is a valid group.
    #[serde(default)]
    pub tag: String,

    /// Spritesheet the frames are cut from.
    #[serde(rename = "spritesheetID", alias = "spritesheet")]
    pub spritesheet_id: String,

    /// Texture binding the spritesheet to a picture (indexed stores only).
    #[serde(
        rename = "textureID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub texture_id: Option<String>,

    /// Ordered `[frameIndex, durationTicks]` pairs.
    pub frames: Vec<FrameRef>,
}

/// A reference to one cell of a spritesheet's frame grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct FrameRef {
    /// Row-major cell index.
    pub index: u32,
    /// Display duration in ticks.
    pub duration: u32,
}

impl FrameRef {
    /// Creates a frame reference.
    pub fn new(index: u32, duration: u32) -> Self {
        Self { index, duration }
    }
}

impl From<[u32; 2]> for FrameRef {
    fn from([index, duration]: [u32; 2]) -> Self {
        Self { index, duration }
    }
}

impl From<FrameRef> for [u32; 2] {
    fn from(frame: FrameRef) -> Self {
        [frame.index, frame.duration]
    }
}

impl AnimationDescriptor {
    /// Creates a descriptor with no frames and an empty tag.
    pub fn new(name: impl Into<String>, spritesheet_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: String::new(),
            spritesheet_id: spritesheet_id.into(),
            texture_id: None,
            frames: Vec::new(),
        }
    }

    /// Sets the tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Sets the texture id.
    pub fn with_texture(mut self, texture_id: impl Into<String>) -> Self {
        self.texture_id = Some(texture_id.into());
        self
    }

    /// Appends a frame.
    pub fn with_frame(mut self, index: u32, duration: u32) -> Self {
        self.frames.push(FrameRef::new(index, duration));
        self
    }

    /// Checks the invariants that do not depend on the store.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.name.trim().is_empty() {
            return Err(SpecError::invalid("animation", "name must not be empty"));
        }
        let context = format!("animation '{}'", self.name);
        if self.spritesheet_id.is_empty() {
            return Err(SpecError::invalid(context, "spritesheetID must not be empty"));
        }
        if matches!(&self.texture_id, Some(id) if id.is_empty()) {
            return Err(SpecError::invalid(context, "textureID must not be empty"));
        }
        if self.frames.is_empty() {
            return Err(SpecError::invalid(context, "frames must not be empty"));
        }
        Ok(())
    }
}

/// Parses a YAML list of animation descriptors and validates each entry.
///
/// An empty document yields an empty list.
pub fn parse_animations(source: &str) -> Result<Vec<AnimationDescriptor>, SpecError> {
    let animations: Vec<AnimationDescriptor> = parse_document(source)?.unwrap_or_default();
    for animation in &animations {
        animation.validate()?;
    }
    Ok(animations)
}
