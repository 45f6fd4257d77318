//! SpritePack End-to-End Test Infrastructure
//!
//! This crate provides integration tests for complete builds:
//!
//! - Embedded layout: spritesheets directory -> `pack` -> resource store
//! - Indexed layout: import -> project scan -> resource store
//! - Atomicity: failed builds leave the store byte-for-byte unchanged
//! - Determinism: rebuilding unchanged inputs yields identical bucket digests
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p spritepack-tests
//! ```

pub mod fixtures;

pub use fixtures::{
    cell_color, read_animation, read_tag, reference_sheet, snapshot, ProjectFixture,
    StoreSnapshot,
};
