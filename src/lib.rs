//! # Event Booking
//!
//! The record store behind an event-booking page: a validated, sorted
//! collection of bookings kept in sync with a key-value backend.
//!
//! ## Features
//!
//! - **Validation**: every record entering the collection passes the same rules
//! - **Write-once fields**: `id`, `author` and `createdAt` survive every edit
//! - **Querying**: case-insensitive filters, offset paging and free-text search
//! - **Statistics**: counts per type, status and author, upcoming/past, average guests
//! - **Persistence**: one JSON blob per collection in any
//!   [`KeyValueBackend`](core::KeyValueBackend)
//! - **Backups**: pretty-printed export files and validated imports
//! - **Configuration-Based**: storage key, sort order and limits via YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use event_booking::prelude::*;
//!
//! let backend = Arc::new(InMemoryBackend::new());
//! let mut store = EventStore::with_demo_data(backend, StoreConfig::default());
//!
//! let booking = Record::new("Maria", "Ceremony and banquet")
//!     .event_type("wedding")
//!     .guests(120);
//! assert!(store.add(booking));
//!
//! let weddings = store.query(0, 10, &EventFilter::new().event_type("wedding"));
//! let stats = store.stats();
//! ```

pub mod config;
pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        error::{BookingError, ConfigError, ImportError, StorageError, ValidationError},
        preferences::{Preferences, SessionState},
        query::{EventFilter, PageRequest, PaginatedResponse, PaginationMeta},
        record::{ADMIN_USER, LineItem, Record, RecordPatch, status},
        service::{ExportSink, ImportSource, KeyValueBackend},
        stats::Stats,
        store::{EventStore, ImportReport, SortOrder, StorageSize},
    };

    // === Storage ===
    #[cfg(feature = "lmdb")]
    pub use crate::storage::LmdbBackend;
    pub use crate::storage::{DirectorySink, FileSource, InMemoryBackend, TextSource};

    // === Config ===
    pub use crate::config::StoreConfig;

    // === External dependencies ===
    pub use chrono::{DateTime, Utc};
    pub use std::sync::Arc;
}
