//! The validated, sorted and persisted record collection
//!
//! # Lifecycle
//!
//! ```text
//! EventStore::open(backend, config, seed)
//!     │  seed records are validated and sorted
//!     ▼
//! restore() ── key absent ──▶ save() seeds the backend
//!     │
//!     └─ key present ──▶ decode, validate, replace the collection
//!
//! add / edit / remove / add_all ──▶ sort ──▶ save()
//! clear() ──▶ backend.delete(key)
//! ```
//!
//! Mutations answer with `bool`. A failed save is logged and reported by
//! [`EventStore::save`], but never undoes the in-memory change that
//! triggered it: memory may run ahead of the backend until the next
//! successful save.

use crate::config::StoreConfig;
use crate::core::error::{ImportError, StorageError};
use crate::core::query::{self, EventFilter, PageRequest, PaginatedResponse, PaginationMeta};
use crate::core::record::{Record, RecordPatch};
use crate::core::service::{ExportSink, ImportSource, KeyValueBackend};
use crate::core::snapshot;
use crate::core::stats::Stats;
use crate::core::validation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;

/// Order in which the collection is kept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest first
    #[default]
    CreatedAtDesc,
    /// Lexicographic by id
    IdAsc,
}

impl SortOrder {
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortOrder::CreatedAtDesc => b.created_at.cmp(&a.created_at),
            SortOrder::IdAsc => a.id.cmp(&b.id),
        }
    }

    /// Stable sort of `records` in this order
    pub fn sort(&self, records: &mut [Record]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

/// Byte size of the serialized collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageSize {
    pub bytes: usize,
    pub records: usize,
}

impl StorageSize {
    pub fn kilobytes(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

/// Outcome of a completed import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Records added to the collection
    pub imported: usize,
    /// Raw elements that were not added, in file order: invalid records,
    /// duplicate ids and elements that do not describe a record at all
    pub rejected: Vec<Value>,
}

impl ImportReport {
    /// Whether every element of the file was imported
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Event record store
///
/// Construct it once and hand out references; it is the single owner of the
/// collection. Getters return copies, so records can only change through
/// [`add`](Self::add), [`edit`](Self::edit), [`remove`](Self::remove) and
/// [`clear`](Self::clear).
pub struct EventStore {
    records: Vec<Record>,
    backend: Arc<dyn KeyValueBackend>,
    config: StoreConfig,
}

impl EventStore {
    /// Build a store over `seed` and reconcile it with the backend
    ///
    /// Invalid or duplicate seed records are dropped. If the backend already
    /// holds a collection under the configured key it replaces the seed,
    /// otherwise the seed is written to the backend.
    pub fn open(
        backend: Arc<dyn KeyValueBackend>,
        config: StoreConfig,
        seed: Vec<Record>,
    ) -> Self {
        let mut store = Self {
            records: Vec::with_capacity(seed.len()),
            backend,
            config,
        };

        for record in seed {
            if validation::is_valid(&record) && !store.contains(&record.id) {
                store.records.push(record);
            } else {
                tracing::warn!(record_id = %record.id, "dropping unusable seed record");
            }
        }
        store.sort();
        store.restore();
        store
    }

    /// Empty store reconciled with the backend
    pub fn new(backend: Arc<dyn KeyValueBackend>, config: StoreConfig) -> Self {
        Self::open(backend, config, Vec::new())
    }

    /// Store seeded with the demonstration bookings
    pub fn with_demo_data(backend: Arc<dyn KeyValueBackend>, config: StoreConfig) -> Self {
        Self::open(backend, config, crate::core::seed::demo_records())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage_key(&self) -> &str {
        &self.config.storage_key
    }

    // === Persistence ===

    /// Write the whole collection to the backend
    pub fn save(&self) -> bool {
        let key = self.storage_key();
        let result = snapshot::encode(&self.records, Utc::now())
            .and_then(|blob| self.backend.set(key, &blob));

        match result {
            Ok(()) => {
                tracing::debug!(
                    backend = self.backend.name(),
                    key,
                    count = self.records.len(),
                    "collection saved"
                );
                true
            }
            Err(error) => {
                tracing::error!(
                    backend = self.backend.name(),
                    key,
                    %error,
                    "failed to save collection"
                );
                false
            }
        }
    }

    /// Replace the collection with the one stored in the backend
    ///
    /// Returns `false` when nothing was restored: the key is absent (the
    /// current collection is then written to seed it), or the blob could not
    /// be read. Stored records that fail validation, or repeat an id, are
    /// dropped and counted in the log.
    pub fn restore(&mut self) -> bool {
        let key = self.config.storage_key.clone();
        let blob = match self.backend.get(&key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                tracing::info!(key = %key, "no saved collection, seeding backend");
                self.save();
                return false;
            }
            Err(error) => {
                tracing::error!(key = %key, %error, "failed to load collection");
                return false;
            }
        };

        let elements = match snapshot::parse(&blob) {
            Ok(elements) => elements,
            Err(message) => {
                tracing::error!(key = %key, %message, "stored collection is unreadable");
                return false;
            }
        };

        let total = elements.len();
        let mut restored: Vec<Record> = Vec::with_capacity(total);
        for element in elements {
            let Ok(record) = snapshot::decode_record(element) else {
                continue;
            };
            if validation::is_valid(&record) && !restored.iter().any(|r| r.id == record.id) {
                restored.push(record);
            }
        }

        let dropped = total - restored.len();
        if dropped > 0 {
            tracing::warn!(key = %key, dropped, "stored records failed validation");
        }

        self.records = restored;
        self.sort();
        tracing::info!(key = %key, count = self.records.len(), "collection restored");
        true
    }

    /// Empty the collection and delete its backend key
    pub fn clear(&mut self) {
        tracing::info!(count = self.records.len(), "clearing collection");
        self.records.clear();

        if let Err(error) = self.backend.delete(self.storage_key()) {
            tracing::error!(
                key = self.storage_key(),
                %error,
                "failed to delete stored collection"
            );
        }
    }

    // === Mutations ===

    /// Insert a valid record with an unused id
    pub fn add(&mut self, record: Record) -> bool {
        if !validation::is_valid(&record) {
            tracing::warn!(record_id = %record.id, "rejected invalid record");
            return false;
        }
        if self.contains(&record.id) {
            tracing::warn!(record_id = %record.id, "rejected duplicate id");
            return false;
        }

        let id = record.id.clone();
        self.records.push(record);
        self.sort();
        self.save();

        tracing::info!(record_id = %id, "record added");
        true
    }

    /// Merge `patch` into the record `id`
    ///
    /// Write-once fields in the patch are ignored. Nothing changes if the
    /// merged record fails validation.
    pub fn edit(&mut self, id: &str, patch: &RecordPatch) -> bool {
        let Some(index) = self.position(id) else {
            tracing::debug!(record_id = id, "edit of unknown record");
            return false;
        };

        if patch.touches_write_once() {
            tracing::warn!(record_id = id, "ignoring write-once fields in update");
        }

        let candidate = patch.apply_to(&self.records[index]);
        if !validation::is_valid(&candidate) {
            tracing::warn!(record_id = id, "rejected update, merged record is invalid");
            return false;
        }

        self.records[index] = candidate;
        self.sort();
        self.save();

        tracing::info!(record_id = id, "record updated");
        true
    }

    /// Delete the record `id`
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            tracing::debug!(record_id = id, "remove of unknown record");
            return false;
        };

        self.records.remove(index);
        self.save();

        tracing::info!(record_id = id, "record removed");
        true
    }

    /// Add each record in turn, returning the ones that were refused
    pub fn add_all(&mut self, records: Vec<Record>) -> Vec<Record> {
        let total = records.len();
        let mut rejected = Vec::new();

        for record in records {
            if !self.add(record.clone()) {
                rejected.push(record);
            }
        }

        tracing::info!(
            added = total - rejected.len(),
            rejected = rejected.len(),
            "batch added"
        );
        rejected
    }

    // === Reads ===

    pub fn get(&self, id: &str) -> Option<Record> {
        self.records.iter().find(|r| r.id == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Every record, in collection order
    pub fn all(&self) -> Vec<Record> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Public access to the validator
    pub fn validate_record(&self, record: &Record) -> bool {
        validation::is_valid(record)
    }

    /// Filtered slice `[skip, skip + top)` of the collection
    ///
    /// Out-of-range offsets yield fewer (or no) records. A negative `skip`
    /// or a `top` below 1 is replaced by its default.
    pub fn query(&self, skip: i64, top: i64, filter: &EventFilter) -> Vec<Record> {
        self.query_page(PageRequest::new(skip, top), filter)
    }

    /// [`query`](Self::query) with an already normalized page request
    pub fn query_page(&self, request: PageRequest, filter: &EventFilter) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| filter.matches(r))
            .skip(request.skip)
            .take(request.top)
            .cloned()
            .collect()
    }

    /// 1-based page of filtered records with pager metadata
    ///
    /// A `per_page` of 0 uses the configured default page size.
    pub fn page(
        &self,
        page: usize,
        per_page: usize,
        filter: &EventFilter,
    ) -> PaginatedResponse<Record> {
        let per_page = if per_page == 0 {
            self.config.default_page_size
        } else {
            per_page
        };
        let matching: Vec<&Record> = self.records.iter().filter(|r| filter.matches(r)).collect();
        let pagination = PaginationMeta::new(page, per_page, matching.len());

        let data = matching
            .into_iter()
            .skip(pagination.skip())
            .take(pagination.limit)
            .cloned()
            .collect();

        PaginatedResponse { data, pagination }
    }

    /// Records whose title, description, author or hall contain `text`
    pub fn search(&self, text: &str) -> Vec<Record> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        self.records
            .iter()
            .filter(|r| {
                query::contains_ci(r.title.as_deref(), Some(text))
                    || query::contains_ci(Some(r.description.as_str()), Some(text))
                    || query::contains_ci(Some(r.author.as_str()), Some(text))
                    || query::contains_ci(r.hall.as_deref(), Some(text))
            })
            .cloned()
            .collect()
    }

    /// Aggregates over the collection, with `upcoming`/`past` relative to now
    pub fn stats(&self) -> Stats {
        self.stats_at(Utc::now())
    }

    /// Aggregates with `upcoming`/`past` relative to `now`
    pub fn stats_at(&self, now: DateTime<Utc>) -> Stats {
        Stats::compute(&self.records, now)
    }

    /// Size of the collection once serialized
    pub fn storage_size(&self) -> Result<StorageSize, StorageError> {
        let bytes = serde_json::to_string(&self.records)?.len();
        Ok(StorageSize {
            bytes,
            records: self.records.len(),
        })
    }

    // === Export / Import ===

    /// Write a pretty-printed backup through `sink`, returning its file name
    pub fn export_to(&self, sink: &dyn ExportSink) -> Result<String, StorageError> {
        let now = Utc::now();
        let file_name = self.config.export_file_name(&now);
        let contents = snapshot::encode_export(&self.records, now)?;

        sink.write_file(&file_name, &contents)?;
        tracing::info!(file = %file_name, count = self.records.len(), "collection exported");
        Ok(file_name)
    }

    /// Read a backup from `source` and add its records in file order
    ///
    /// The collection is untouched until the read completes. A payload that
    /// is not JSON or has no `records` array fails with
    /// [`ImportError::Format`] before anything is written.
    pub async fn import_from(
        &mut self,
        source: &dyn ImportSource,
    ) -> Result<ImportReport, ImportError> {
        let text = match self.config.import_timeout() {
            Some(limit) => tokio::time::timeout(limit, source.read_text())
                .await
                .map_err(|_| ImportError::Timeout {
                    seconds: limit.as_secs(),
                })??,
            None => source.read_text().await?,
        };

        let elements =
            snapshot::parse(&text).map_err(|message| ImportError::Format { message })?;

        let mut report = ImportReport::default();
        for element in elements {
            let added = match snapshot::decode_record(element.clone()) {
                Ok(record) => self.add(record),
                Err(_) => false,
            };
            if added {
                report.imported += 1;
            } else {
                report.rejected.push(element);
            }
        }

        if report.is_clean() {
            tracing::info!(imported = report.imported, "import complete");
        } else {
            tracing::warn!(
                imported = report.imported,
                rejected = report.rejected.len(),
                "import complete with rejected records"
            );
        }
        Ok(report)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    fn sort(&mut self) {
        self.config.sort_order.sort(&mut self.records);
    }
}

impl std::fmt::Debug for EventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStore")
            .field("backend", &self.backend.name())
            .field("storage_key", &self.config.storage_key)
            .field("records", &self.records.len())
            .finish()
    }
}
