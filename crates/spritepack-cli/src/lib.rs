//! SpritePack CLI library.
//!
//! This crate provides the command implementations behind the `spritepack`
//! binary, plus logging setup and error classification.

pub mod commands;
pub mod logging;

use spritepack_pipeline::BuildError;
use spritepack_spec::ErrorKind;
use spritepack_store::StoreError;

/// Classifies an error returned by a command.
///
/// Walks the cause chain looking for a pipeline or store error; anything else
/// is reported as an IO failure.
pub fn error_kind(err: &anyhow::Error) -> ErrorKind {
    for cause in err.chain() {
        if let Some(build) = cause.downcast_ref::<BuildError>() {
            return build.kind();
        }
        if let Some(store) = cause.downcast_ref::<StoreError>() {
            return if store.is_not_found() {
                ErrorKind::NotFound
            } else {
                ErrorKind::Io
            };
        }
    }
    ErrorKind::Io
}
