//! SpritePack Source Model
//!
//! This crate provides the typed model shared by every stage of the SpritePack
//! build: the YAML source descriptors authored alongside the art, the records
//! persisted into the resource store, and the error taxonomy used to classify
//! build failures.
//!
//! # Example
//!
//! ```
//! use spritepack_spec::descriptor::parse_animations;
//!
//! let yaml = r#"
//! - name: walk_left
//!   tag: walk
//!   spritesheet: hero
//!   frames: [[0, 100], [2, 150]]
//! "#;
//!
//! let animations = parse_animations(yaml).unwrap();
//! assert_eq!(animations[0].spritesheet_id, "hero");
//! assert_eq!(animations[0].frames[1].index, 2);
//! ```
//!
//! # Modules
//!
//! - [`descriptor`]: Source descriptors (animations, spritesheets, textures)
//! - [`record`]: Records written to the resource store
//! - [`error`]: Parse errors and the build error taxonomy

pub mod descriptor;
pub mod error;
pub mod record;

pub use descriptor::{
    parse_animations, parse_spritesheets, parse_textures, AnimationDescriptor, FrameRef,
    SpritesheetCatalog, SpritesheetDescriptor, TextureCatalog, TextureDescriptor,
};
pub use error::{ErrorKind, SpecError};
pub use record::{AnimationRecord, FrameRect, SpritesheetRecord, TagRecord, TextureRecord};
