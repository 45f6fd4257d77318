//! Spritesheet metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::parse_document;
use crate::error::SpecError;

/// Cell size used to tile a spritesheet picture into frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpritesheetDescriptor {
    /// Cell width in pixels.
    pub width: u32,
    /// Cell height in pixels.
    pub height: u32,
}

/// Spritesheet id -> cell size, ordered by id.
pub type SpritesheetCatalog = BTreeMap<String, SpritesheetDescriptor>;

impl SpritesheetDescriptor {
    /// Creates a descriptor for `width` x `height` cells.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Checks that both cell dimensions are positive.
    pub fn validate(&self, id: &str) -> Result<(), SpecError> {
        if self.width == 0 || self.height == 0 {
            return Err(SpecError::invalid(
                format!("spritesheet '{}'", id),
                format!(
                    "cell size must be positive, got {}x{}",
                    self.width, self.height
                ),
            ));
        }
        Ok(())
    }
}

/// Parses a spritesheet metadata document (`id: {width, height}` mapping).
pub fn parse_spritesheets(source: &str) -> Result<SpritesheetCatalog, SpecError> {
    let catalog: SpritesheetCatalog = parse_document(source)?.unwrap_or_default();
    for (id, sheet) in &catalog {
        sheet.validate(id)?;
    }
    Ok(catalog)
}
