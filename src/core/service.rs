//! Service traits for the persistence backend and the file channels
//!
//! The store is agnostic to where its blobs live: anything that can get, set
//! and delete strings by key will do. Export and import go through their own
//! traits, since the file a user downloads is not the durable slot the store
//! syncs to.

use crate::core::error::StorageError;
use async_trait::async_trait;

/// Durable key-value string storage
pub trait KeyValueBackend: Send + Sync {
    /// Short backend name for logs and errors
    fn name(&self) -> &'static str;

    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing a missing key is not an error
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Destination for exported backup files
pub trait ExportSink: Send + Sync {
    /// Write `contents` as a file called `file_name`
    fn write_file(&self, file_name: &str, contents: &str) -> Result<(), StorageError>;
}

/// User-supplied import file
///
/// Reading is asynchronous; the store does not touch its collection until
/// the read has completed.
#[async_trait]
pub trait ImportSource: Send + Sync {
    /// Read the whole file as text
    async fn read_text(&self) -> Result<String, StorageError>;
}
