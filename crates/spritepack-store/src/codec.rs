//! Record encoding.
//!
//! Records are stored as bincode. The encoding is deterministic for a given
//! value, which is what makes repeated builds byte-identical. Decoding must
//! consume every byte, so a value never decodes as a shorter record type.

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Encodes a record into its stored form.
pub fn encode<T: Serialize + ?Sized>(record: &T) -> Result<Vec<u8>, StoreError> {
    Ok(options().serialize(record)?)
}

/// Decodes a stored record.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    Ok(options().deserialize(bytes)?)
}
