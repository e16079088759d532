//! Shared test harness for store and backend testing
//!
//! Provides booking fixtures, a backend whose writes can be switched off,
//! an import source that never finishes, and the `store_contract_tests!`
//! suite that every [`KeyValueBackend`] must pass.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
mod store_contract_tests;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use event_booking::core::error::StorageError;
use event_booking::core::record::Record;
use event_booking::core::service::{ImportSource, KeyValueBackend};
use event_booking::storage::InMemoryBackend;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Noon on the given day of November 2024
pub fn november(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, day, 12, 0, 0).unwrap()
}

/// A valid booking by Maria created on `november(day)`
pub fn booking(id: &str, day: u32) -> Record {
    Record::with_id(id, "Maria", format!("Booking {}", id), november(day))
}

/// A booking the validator refuses (blank author)
pub fn invalid_booking(id: &str) -> Record {
    Record::with_id(id, "   ", "No author", november(1))
}

pub fn ids(records: &[Record]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

// ---------------------------------------------------------------------------
// Backends and sources with failure modes
// ---------------------------------------------------------------------------

/// In-memory backend whose writes start failing once `fail_writes` is set
#[derive(Clone, Default)]
pub struct FlakyBackend {
    inner: InMemoryBackend,
    fail_writes: Arc<AtomicBool>,
}

impl FlakyBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self, operation: &str, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::OperationFailed {
                backend: "flaky".to_string(),
                operation: operation.to_string(),
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            });
        }
        Ok(())
    }
}

impl KeyValueBackend for FlakyBackend {
    fn name(&self) -> &'static str {
        "flaky"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check("set", key)?;
        self.inner.set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.check("delete", key)?;
        self.inner.delete(key)
    }
}

/// Import source that takes far longer than any configured timeout
pub struct StalledSource;

#[async_trait]
impl ImportSource for StalledSource {
    async fn read_text(&self) -> Result<String, StorageError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(r#"{"records": []}"#.to_string())
    }
}

/// Import source whose read fails outright
pub struct BrokenSource;

#[async_trait]
impl ImportSource for BrokenSource {
    async fn read_text(&self) -> Result<String, StorageError> {
        Err(StorageError::Io {
            path: "upload.json".to_string(),
            message: "connection reset".to_string(),
        })
    }
}
