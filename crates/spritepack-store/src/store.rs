//! Single-file LMDB environment wrapper.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use heed::types::{Bytes, Str};
use heed::{Database, Env, EnvFlags, EnvOpenOptions, RoTxn, RwTxn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::bucket::Bucket;
use crate::codec;
use crate::error::StoreError;

type BucketDb = Database<Str, Bytes>;

/// Room for every [`Bucket`] plus a few spare slots.
const MAX_BUCKETS: u32 = 8;

/// LMDB rejects zero-length keys; the empty key is stored under this one.
/// Caller keys never contain NUL, so nothing else maps here.
const EMPTY_KEY: &str = "\u{0}";

fn is_storable(key: &str) -> bool {
    !key.contains('\0')
}

fn to_db_key(key: &str) -> &str {
    if key.is_empty() {
        EMPTY_KEY
    } else {
        key
    }
}

fn from_db_key(key: &str) -> &str {
    if key == EMPTY_KEY {
        ""
    } else {
        key
    }
}

/// Options used when opening a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Maximum size of the memory map in bytes, i.e. the largest the file can grow.
    pub map_size: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            map_size: 1024 * 1024 * 1024, // 1GB max
        }
    }
}

/// A resource file opened for reading and writing.
pub struct ResourceStore {
    env: Env,
    path: PathBuf,
}

impl ResourceStore {
    /// Open or create a resource store at the given file path with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with(path, &StoreOptions::default())
    }

    /// Open or create a resource store at the given file path.
    ///
    /// The store is a single file; LMDB keeps a `<path>-lock` file next to it.
    /// Missing parent directories are created.
    ///
    /// # Safety
    /// Uses unsafe to call heed's open method which requires ensuring
    /// the environment is not opened multiple times with different options.
    #[allow(unsafe_code)]
    pub fn open_with(path: impl AsRef<Path>, options: &StoreOptions) -> Result<Self, StoreError> {
        let path = std::path::absolute(path.as_ref())?;
        if path.is_dir() {
            return Err(StoreError::NotAFile(path));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut env_options = EnvOpenOptions::new();
        env_options.map_size(options.map_size).max_dbs(MAX_BUCKETS);
        // SAFETY: NO_SUB_DIR only changes how LMDB lays out its files on disk.
        unsafe {
            env_options.flags(EnvFlags::NO_SUB_DIR);
        }
        // SAFETY: the build opens each resource file once per process.
        let env = unsafe { env_options.open(&path) }.map_err(|source| StoreError::Open {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Opened resource store {}", path.display());
        Ok(Self { env, path })
    }

    /// Absolute path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Begins a read-only transaction.
    pub fn read(&self) -> Result<ReadTxn<'_>, StoreError> {
        Ok(ReadTxn {
            env: &self.env,
            txn: self.env.read_txn()?,
        })
    }

    /// Begins a write transaction. Only one can be active at a time.
    pub fn write(&self) -> Result<WriteTxn<'_>, StoreError> {
        Ok(WriteTxn {
            env: &self.env,
            txn: self.env.write_txn()?,
            opened: HashMap::new(),
            puts: 0,
        })
    }

    /// BLAKE3 digest of every bucket present in the store.
    pub fn digests(&self) -> Result<BTreeMap<Bucket, String>, StoreError> {
        let txn = self.read()?;
        let mut digests = BTreeMap::new();
        for bucket in Bucket::ALL {
            if txn.has_bucket(bucket)? {
                digests.insert(bucket, txn.digest(bucket)?);
            }
        }
        Ok(digests)
    }
}

/// Read access shared by read and write transactions.
pub trait BucketRead {
    /// Whether the bucket exists.
    fn has_bucket(&self, bucket: Bucket) -> Result<bool, StoreError>;

    /// Raw value stored under `key`, `None` if the key is absent.
    ///
    /// A missing bucket is an error.
    fn try_get(&self, bucket: Bucket, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// All `(key, value)` pairs of a bucket in key order.
    fn entries(&self, bucket: Bucket) -> Result<Vec<(String, Vec<u8>)>, StoreError>;

    /// Raw value stored under `key`; a missing key is an error.
    fn get(&self, bucket: Bucket, key: &str) -> Result<Vec<u8>, StoreError> {
        self.try_get(bucket, key)?
            .ok_or_else(|| StoreError::MissingKey {
                bucket,
                key: key.to_string(),
            })
    }

    /// Decoded record stored under `key`.
    fn get_record<T: DeserializeOwned>(&self, bucket: Bucket, key: &str) -> Result<T, StoreError>
    where
        Self: Sized,
    {
        codec::decode(&self.get(bucket, key)?)
    }

    /// Keys of a bucket in key order.
    fn keys(&self, bucket: Bucket) -> Result<Vec<String>, StoreError> {
        Ok(self
            .entries(bucket)?
            .into_iter()
            .map(|(key, _)| key)
            .collect())
    }

    /// BLAKE3 digest over a bucket's keys and values, in key order.
    fn digest(&self, bucket: Bucket) -> Result<String, StoreError> {
        let mut hasher = blake3::Hasher::new();
        for (key, value) in self.entries(bucket)? {
            hasher.update(&(key.len() as u64).to_le_bytes());
            hasher.update(key.as_bytes());
            hasher.update(&(value.len() as u64).to_le_bytes());
            hasher.update(&value);
        }
        Ok(hasher.finalize().to_hex().to_string())
    }
}

fn open_bucket(env: &Env, txn: &RoTxn<'_>, bucket: Bucket) -> Result<Option<BucketDb>, StoreError> {
    Ok(env.open_database::<Str, Bytes>(txn, Some(bucket.name()))?)
}

fn lookup(
    env: &Env,
    txn: &RoTxn<'_>,
    bucket: Bucket,
    key: &str,
) -> Result<Option<Vec<u8>>, StoreError> {
    let db = open_bucket(env, txn, bucket)?.ok_or(StoreError::MissingBucket(bucket))?;
    if !is_storable(key) {
        return Ok(None);
    }
    Ok(db.get(txn, to_db_key(key))?.map(<[u8]>::to_vec))
}

fn collect_entries(
    env: &Env,
    txn: &RoTxn<'_>,
    bucket: Bucket,
) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
    let db = open_bucket(env, txn, bucket)?.ok_or(StoreError::MissingBucket(bucket))?;
    let mut entries = Vec::new();
    for item in db.iter(txn)? {
        let (key, value) = item?;
        entries.push((from_db_key(key).to_string(), value.to_vec()));
    }
    Ok(entries)
}

/// A scoped read-only transaction.
pub struct ReadTxn<'env> {
    env: &'env Env,
    txn: RoTxn<'env>,
}

impl BucketRead for ReadTxn<'_> {
    fn has_bucket(&self, bucket: Bucket) -> Result<bool, StoreError> {
        Ok(open_bucket(self.env, &self.txn, bucket)?.is_some())
    }

    fn try_get(&self, bucket: Bucket, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        lookup(self.env, &self.txn, bucket, key)
    }

    fn entries(&self, bucket: Bucket) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
        collect_entries(self.env, &self.txn, bucket)
    }
}

/// A scoped write transaction.
///
/// Reads through a write transaction see its own uncommitted writes. Dropping
/// it without calling [`WriteTxn::commit`] discards every write.
pub struct WriteTxn<'env> {
    env: &'env Env,
    txn: RwTxn<'env>,
    opened: HashMap<Bucket, BucketDb>,
    puts: usize,
}

impl WriteTxn<'_> {
    /// Creates the bucket if it does not exist yet.
    pub fn create_bucket(&mut self, bucket: Bucket) -> Result<(), StoreError> {
        self.bucket_db(bucket).map(|_| ())
    }

    fn bucket_db(&mut self, bucket: Bucket) -> Result<BucketDb, StoreError> {
        if let Some(db) = self.opened.get(&bucket) {
            return Ok(*db);
        }
        let db = self
            .env
            .create_database::<Str, Bytes>(&mut self.txn, Some(bucket.name()))?;
        self.opened.insert(bucket, db);
        tracing::trace!("Bucket '{}' ready", bucket);
        Ok(db)
    }

    /// Stores `value` under `key`, creating the bucket on first use.
    ///
    /// An existing value is replaced. Keys containing NUL are rejected.
    pub fn put(&mut self, bucket: Bucket, key: &str, value: &[u8]) -> Result<(), StoreError> {
        if !is_storable(key) {
            return Err(StoreError::InvalidKey {
                bucket,
                key: key.to_string(),
            });
        }
        let db = self.bucket_db(bucket)?;
        db.put(&mut self.txn, to_db_key(key), value)?;
        self.puts += 1;
        tracing::trace!("Put {}/{} ({} bytes)", bucket, key, value.len());
        Ok(())
    }

    /// Encodes and stores a record.
    pub fn put_record<T: Serialize + ?Sized>(
        &mut self,
        bucket: Bucket,
        key: &str,
        record: &T,
    ) -> Result<(), StoreError> {
        let bytes = codec::encode(record)?;
        self.put(bucket, key, &bytes)
    }

    /// Number of puts issued in this transaction.
    pub fn puts(&self) -> usize {
        self.puts
    }

    /// Makes every write of this transaction durable and visible.
    pub fn commit(self) -> Result<(), StoreError> {
        let puts = self.puts;
        self.txn.commit()?;
        tracing::debug!("Committed {} writes", puts);
        Ok(())
    }

    /// Discards every write of this transaction.
    pub fn abort(self) {
        self.txn.abort();
        tracing::debug!("Aborted write transaction");
    }
}

impl BucketRead for WriteTxn<'_> {
    fn has_bucket(&self, bucket: Bucket) -> Result<bool, StoreError> {
        if self.opened.contains_key(&bucket) {
            return Ok(true);
        }
        Ok(open_bucket(self.env, &self.txn, bucket)?.is_some())
    }

    fn try_get(&self, bucket: Bucket, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(db) = self.opened.get(&bucket) {
            if !is_storable(key) {
                return Ok(None);
            }
            return Ok(db.get(&self.txn, to_db_key(key))?.map(<[u8]>::to_vec));
        }
        lookup(self.env, &self.txn, bucket, key)
    }

    fn entries(&self, bucket: Bucket) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
        collect_entries(self.env, &self.txn, bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_store() -> (tempfile::TempDir, ResourceStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ResourceStore::open(dir.path().join("stage.res")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_store_is_a_single_file() {
        let (_dir, store) = temp_store();
        assert!(store.path().is_absolute());
        assert!(store.path().is_file());
        assert!(store.path().ends_with("stage.res"));
    }

    #[test]
    fn test_put_and_get() {
        let (_dir, store) = temp_store();

        let mut txn = store.write().unwrap();
        txn.put(Bucket::Animations, "walk", b"frames").unwrap();
        txn.commit().unwrap();

        let txn = store.read().unwrap();
        assert!(txn.has_bucket(Bucket::Animations).unwrap());
        assert_eq!(txn.get(Bucket::Animations, "walk").unwrap(), b"frames");
        assert_eq!(txn.try_get(Bucket::Animations, "run").unwrap(), None);
    }

    #[test]
    fn test_missing_bucket_and_key() {
        let (_dir, store) = temp_store();
        let mut txn = store.write().unwrap();
        txn.create_bucket(Bucket::Tags).unwrap();
        txn.commit().unwrap();

        let txn = store.read().unwrap();
        let err = txn.get(Bucket::Pictures, "hero").unwrap_err();
        assert!(matches!(err, StoreError::MissingBucket(Bucket::Pictures)));
        assert!(err.is_not_found());

        let err = txn.get(Bucket::Tags, "walk").unwrap_err();
        assert_eq!(err.to_string(), "key 'walk' not found in bucket 'tags'");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_dropped_transaction_is_aborted() {
        let (_dir, store) = temp_store();
        {
            let mut txn = store.write().unwrap();
            txn.put(Bucket::Tags, "walk", b"a").unwrap();
        }
        let txn = store.read().unwrap();
        assert!(!txn.has_bucket(Bucket::Tags).unwrap());
    }

    #[test]
    fn test_explicit_abort() {
        let (_dir, store) = temp_store();
        let mut txn = store.write().unwrap();
        txn.put(Bucket::Tags, "walk", b"a").unwrap();
        txn.commit().unwrap();

        let mut txn = store.write().unwrap();
        txn.put(Bucket::Tags, "walk", b"b").unwrap();
        txn.put(Bucket::Tags, "run", b"c").unwrap();
        assert_eq!(txn.puts(), 2);
        txn.abort();

        let txn = store.read().unwrap();
        assert_eq!(txn.entries(Bucket::Tags).unwrap(), vec![("walk".to_string(), b"a".to_vec())]);
    }

    #[test]
    fn test_write_txn_reads_its_own_writes() {
        let (_dir, store) = temp_store();
        let mut txn = store.write().unwrap();
        txn.put_record(Bucket::Textures, "hero_tex", &"hero").unwrap();
        let picture: String = txn.get_record(Bucket::Textures, "hero_tex").unwrap();
        assert_eq!(picture, "hero");
        assert!(txn.has_bucket(Bucket::Textures).unwrap());
        assert!(!txn.has_bucket(Bucket::Pictures).unwrap());
    }

    #[test]
    fn test_put_overwrites() {
        let (_dir, store) = temp_store();
        let mut txn = store.write().unwrap();
        txn.put(Bucket::Animations, "walk", b"old").unwrap();
        txn.put(Bucket::Animations, "walk", b"new").unwrap();
        txn.commit().unwrap();

        let txn = store.read().unwrap();
        assert_eq!(txn.keys(Bucket::Animations).unwrap(), vec!["walk".to_string()]);
        assert_eq!(txn.get(Bucket::Animations, "walk").unwrap(), b"new");
    }

    #[test]
    fn test_empty_key() {
        let (_dir, store) = temp_store();
        let mut txn = store.write().unwrap();
        txn.put(Bucket::Tags, "", b"untagged").unwrap();
        txn.put(Bucket::Tags, "walk", b"walking").unwrap();
        assert_eq!(txn.get(Bucket::Tags, "").unwrap(), b"untagged");
        txn.commit().unwrap();

        let txn = store.read().unwrap();
        assert_eq!(txn.get(Bucket::Tags, "").unwrap(), b"untagged");
        assert_eq!(
            txn.keys(Bucket::Tags).unwrap(),
            vec!["".to_string(), "walk".to_string()]
        );
    }

    #[test]
    fn test_nul_key_cannot_shadow_empty_key() {
        let (_dir, store) = temp_store();
        let mut txn = store.write().unwrap();
        txn.put(Bucket::Tags, "", b"untagged").unwrap();
        let err = txn.put(Bucket::Tags, "\0", b"nul").unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey { bucket: Bucket::Tags, .. }));
        assert!(txn.put(Bucket::Tags, "wa\0lk", b"x").is_err());
        assert_eq!(txn.try_get(Bucket::Tags, "\0").unwrap(), None);
        txn.commit().unwrap();

        let txn = store.read().unwrap();
        assert_eq!(txn.try_get(Bucket::Tags, "\0").unwrap(), None);
        assert_eq!(
            txn.entries(Bucket::Tags).unwrap(),
            vec![("".to_string(), b"untagged".to_vec())]
        );
    }

    #[test]
    fn test_entries_are_key_ordered() {
        let (_dir, store) = temp_store();
        let mut txn = store.write().unwrap();
        for key in ["run", "attack", "walk"] {
            txn.put(Bucket::Tags, key, key.as_bytes()).unwrap();
        }
        txn.commit().unwrap();

        let txn = store.read().unwrap();
        assert_eq!(
            txn.keys(Bucket::Tags).unwrap(),
            vec!["attack".to_string(), "run".to_string(), "walk".to_string()]
        );
    }

    #[test]
    fn test_commits_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("stage.res");
        {
            let store = ResourceStore::open(&path).unwrap();
            let mut txn = store.write().unwrap();
            txn.put(Bucket::Pictures, "hero", b"pixels").unwrap();
            txn.commit().unwrap();
        }

        let store = ResourceStore::open(&path).unwrap();
        let txn = store.read().unwrap();
        assert_eq!(txn.get(Bucket::Pictures, "hero").unwrap(), b"pixels");
    }

    #[test]
    fn test_digests_track_contents() {
        let (_dir, store) = temp_store();
        let mut txn = store.write().unwrap();
        txn.put(Bucket::Tags, "walk", b"a").unwrap();
        txn.commit().unwrap();
        let first = store.digests().unwrap();
        assert_eq!(first.keys().copied().collect::<Vec<_>>(), vec![Bucket::Tags]);

        // Rewriting the same value leaves the digest unchanged.
        let mut txn = store.write().unwrap();
        txn.put(Bucket::Tags, "walk", b"a").unwrap();
        txn.commit().unwrap();
        assert_eq!(store.digests().unwrap(), first);

        let mut txn = store.write().unwrap();
        txn.put(Bucket::Tags, "walk", b"b").unwrap();
        txn.commit().unwrap();
        assert_ne!(store.digests().unwrap(), first);
    }

    #[test]
    fn test_directory_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ResourceStore::open(dir.path()),
            Err(StoreError::NotAFile(_))
        ));
    }
}
