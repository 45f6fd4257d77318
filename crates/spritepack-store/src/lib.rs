//! SpritePack resource store.
//!
//! A resource file is a single LMDB environment holding one named database per
//! [`Bucket`]. Keys are UTF-8 identifiers and values are records encoded with
//! the [`codec`].
//!
//! All access goes through scoped transactions:
//!
//! ```no_run
//! use spritepack_store::{Bucket, BucketRead, ResourceStore};
//!
//! # fn main() -> Result<(), spritepack_store::StoreError> {
//! let store = ResourceStore::open("stage.res")?;
//!
//! let mut txn = store.write()?;
//! txn.put(Bucket::Tags, "walk", b"...")?;
//! txn.commit()?;
//!
//! let txn = store.read()?;
//! assert!(txn.try_get(Bucket::Tags, "walk")?.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! A [`WriteTxn`] that is dropped without [`WriteTxn::commit`] is aborted, so
//! an early return via `?` never leaves partial writes behind.

mod bucket;
pub mod codec;
mod error;
mod store;

pub use bucket::Bucket;
pub use error::StoreError;
pub use store::{BucketRead, ReadTxn, ResourceStore, StoreOptions, WriteTxn};
