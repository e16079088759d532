//! LMDB key-value backend using heed (memory-mapped B-tree).
//!
//! LMDB is an embedded key-value store, so a booking collection survives
//! process restarts without any external server. Reads and writes are
//! synchronous memory-mapped I/O, which matches [`KeyValueBackend`].
//!
//! # Databases (named LMDB sub-databases)
//!
//! - `kv`: string key to string value (the collection blob and preferences)
//!
//! # Feature flag
//!
//! Enable with `--features lmdb`. Requires the `heed` crate.

use crate::core::KeyValueBackend;
use crate::core::error::StorageError;
use heed::types::Str;
use heed::{Database, Env, EnvOpenOptions};
use std::path::Path;
use std::sync::Arc;

const NAME: &str = "lmdb";

/// LMDB-backed implementation of [`KeyValueBackend`].
///
/// The `Env` is wrapped in an `Arc` for cheap cloning.
///
/// # Example
///
/// ```rust,ignore
/// use event_booking::storage::LmdbBackend;
///
/// let backend = LmdbBackend::open("/var/lib/bookings")?;
/// let store = EventStore::with_demo_data(Arc::new(backend), StoreConfig::default());
/// ```
#[derive(Clone)]
pub struct LmdbBackend {
    env: Arc<Env>,
    db: Database<Str, Str>,
}

impl LmdbBackend {
    /// Open (or create) an LMDB environment at `path` and initialise the
    /// `kv` named database.
    ///
    /// The map size is 64 MB of virtual address space; a collection blob is
    /// a few hundred kilobytes at most.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        std::fs::create_dir_all(path).map_err(|e| StorageError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(64 * 1024 * 1024)
                .max_dbs(4)
                .open(path)
        }
        .map_err(unavailable)?;

        let mut wtxn = env.write_txn().map_err(unavailable)?;
        let db: Database<Str, Str> = env
            .create_database(&mut wtxn, Some("kv"))
            .map_err(unavailable)?;
        wtxn.commit().map_err(unavailable)?;

        tracing::info!(path = %path.display(), "lmdb backend opened");
        Ok(Self {
            env: Arc::new(env),
            db,
        })
    }
}

fn unavailable(err: heed::Error) -> StorageError {
    StorageError::Unavailable {
        backend: NAME.to_string(),
        message: err.to_string(),
    }
}

impl KeyValueBackend for LmdbBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let fail = |e: heed::Error| StorageError::operation(NAME, "get", key, e);

        let rtxn = self.env.read_txn().map_err(fail)?;
        let value = self.db.get(&rtxn, key).map_err(fail)?;
        Ok(value.map(str::to_owned))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let fail = |e: heed::Error| StorageError::operation(NAME, "set", key, e);

        let mut wtxn = self.env.write_txn().map_err(fail)?;
        self.db.put(&mut wtxn, key, value).map_err(fail)?;
        wtxn.commit().map_err(fail)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let fail = |e: heed::Error| StorageError::operation(NAME, "delete", key, e);

        let mut wtxn = self.env.write_txn().map_err(fail)?;
        self.db.delete(&mut wtxn, key).map_err(fail)?;
        wtxn.commit().map_err(fail)
    }
}

impl std::fmt::Debug for LmdbBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LmdbBackend")
            .field("path", &self.env.path())
            .finish()
    }
}
