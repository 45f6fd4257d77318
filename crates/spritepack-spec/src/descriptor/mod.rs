//! Source descriptor types.
//!
//! Descriptors are YAML documents written next to the art:
//! - animation lists (`animations-meta.yml`, `*.anim.yml`) naming frames of a spritesheet
//! - spritesheet metadata mapping a spritesheet id to its cell size
//! - texture metadata mapping a texture id to the picture it samples

mod animation;
mod spritesheet;
mod texture;

pub use animation::*;
pub use spritesheet::*;
pub use texture::*;

use serde::de::DeserializeOwned;

use crate::error::SpecError;

/// Parses a YAML document, treating an empty, comment-only or null document as `None`.
fn parse_document<T: DeserializeOwned>(source: &str) -> Result<Option<T>, SpecError> {
    if is_blank_document(source) {
        return Ok(None);
    }
    Ok(serde_yaml::from_str::<Option<T>>(source)?)
}

fn is_blank_document(source: &str) -> bool {
    source.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}
