//! SpritePack build pipeline.
//!
//! Turns animation descriptors and spritesheet pictures into animation
//! records and a tag index inside a resource store.
//!
//! A build runs these stages in order:
//!
//! 1. [`loader`]: read descriptor files, either one file or a breadth-first
//!    scan of a project tree
//! 2. [`import`]: decode pictures into the store (embedded layout)
//! 3. [`resolve`]: follow each descriptor's spritesheet to a frame grid
//! 4. [`assemble`]: turn frame indices into rectangles
//! 5. [`tags`]: group animation names by tag
//! 6. [`writer`]: persist records, then commit
//!
//! # Example
//!
//! ```no_run
//! use spritepack_pipeline::{run, BuildConfig};
//!
//! let summary = run(&BuildConfig::default())?;
//! println!("{} animations", summary.animations);
//! # Ok::<(), spritepack_pipeline::BuildError>(())
//! ```

pub mod assemble;
pub mod config;
mod error;
pub mod import;
pub mod loader;
mod pack;
pub mod resolve;
pub mod tags;
pub mod writer;

pub use config::{BuildConfig, DescriptorSource, ImportConfig, Strategy};
pub use error::BuildError;
pub use import::{import, ImportSummary};
pub use pack::{run, BuildSummary};
pub use tags::TagIndex;
