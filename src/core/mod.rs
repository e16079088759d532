//! Core module containing the record model, the store and its service traits

pub mod error;
pub mod preferences;
pub mod query;
pub mod record;
pub mod seed;
pub mod service;
pub mod snapshot;
pub mod stats;
pub mod store;
pub mod timestamp;
pub mod validation;

pub use error::{BookingError, ConfigError, ImportError, StorageError, ValidationError};
pub use preferences::{Preferences, SessionState};
pub use query::{EventFilter, PageRequest, PaginatedResponse, PaginationMeta};
pub use record::{LineItem, Record, RecordPatch};
pub use service::{ExportSink, ImportSource, KeyValueBackend};
pub use stats::Stats;
pub use store::{EventStore, ImportReport, SortOrder, StorageSize};
