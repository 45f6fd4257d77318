//! CLI command implementations

pub mod import;
pub mod inspect;
pub mod pack;
pub mod project;

mod reporting;
