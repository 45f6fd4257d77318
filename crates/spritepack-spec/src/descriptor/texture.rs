//! Texture metadata for indexed stores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::parse_document;
use crate::error::SpecError;

/// Binds a texture id to the picture it samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextureDescriptor {
    /// Key of the picture in the `pictures` bucket.
    #[serde(rename = "pictureID", alias = "picture")]
    pub picture_id: String,
}

/// Texture id -> descriptor, ordered by id.
pub type TextureCatalog = BTreeMap<String, TextureDescriptor>;

/// Parses a texture metadata document (`id: {pictureID}` mapping).
pub fn parse_textures(source: &str) -> Result<TextureCatalog, SpecError> {
    let catalog: TextureCatalog = parse_document(source)?.unwrap_or_default();
    for (id, texture) in &catalog {
        if texture.picture_id.is_empty() {
            return Err(SpecError::invalid(
                format!("texture '{}'", id),
                "pictureID must not be empty",
            ));
        }
    }
    Ok(catalog)
}
