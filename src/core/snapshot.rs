//! Serialized form of a record collection
//!
//! ```json
//! {
//!   "records": [ { "id": "1", "createdAt": "2024-11-15T10:00:00Z", ... } ],
//!   "version": "1.0",
//!   "savedAt": "2024-11-30T09:12:44.120Z",
//!   "count": 1
//! }
//! ```
//!
//! Exports use the same shape with `exportedAt` instead of `savedAt`.
//! Older blobs keyed the array as `events`; it is still accepted on read.

use crate::core::error::StorageError;
use crate::core::record::Record;
use crate::core::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version tag written with every snapshot
pub const FORMAT_VERSION: &str = "1.0";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SavedCollection<'a> {
    records: &'a [Record],
    version: &'static str,
    #[serde(with = "timestamp::iso")]
    saved_at: DateTime<Utc>,
    count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportedCollection<'a> {
    records: &'a [Record],
    version: &'static str,
    #[serde(with = "timestamp::iso")]
    exported_at: DateTime<Utc>,
    count: usize,
}

/// Compact blob stored in the key-value backend
pub fn encode(records: &[Record], saved_at: DateTime<Utc>) -> Result<String, StorageError> {
    let blob = SavedCollection {
        records,
        version: FORMAT_VERSION,
        saved_at,
        count: records.len(),
    };
    Ok(serde_json::to_string(&blob)?)
}

/// Pretty-printed document written to an export file
pub fn encode_export(
    records: &[Record],
    exported_at: DateTime<Utc>,
) -> Result<String, StorageError> {
    let doc = ExportedCollection {
        records,
        version: FORMAT_VERSION,
        exported_at,
        count: records.len(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Split a snapshot into its raw record elements
///
/// Fails with a description when `text` is not JSON or has no `records`
/// array. Elements are not decoded here, so that one bad record does not
/// sink the rest.
pub fn parse(text: &str) -> Result<Vec<Value>, String> {
    let mut value: Value =
        serde_json::from_str(text).map_err(|e| format!("not valid JSON: {}", e))?;
    let key = if value.get("records").is_some() {
        "records"
    } else {
        "events"
    };
    match value.get_mut(key).map(Value::take) {
        Some(Value::Array(elements)) => Ok(elements),
        _ => Err("expected an object with a `records` array".to_string()),
    }
}

/// Decode one element, reconstituting its timestamps
///
/// The element is handed back untouched when it does not describe a record.
pub fn decode_record(value: Value) -> Result<Record, Value> {
    match Record::deserialize(&value) {
        Ok(record) => Ok(record),
        Err(error) => {
            tracing::debug!(%error, "element is not a record");
            Err(value)
        }
    }
}
