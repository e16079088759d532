//! Macro-generated test suite for `EventStore` over a `KeyValueBackend`.
//!
//! The `store_contract_tests!` macro generates a test module that runs the
//! store's observable contract against any backend: mutations, querying,
//! persistence round trips, export and import.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use event_booking::storage::InMemoryBackend;
//!
//! store_contract_tests!(InMemoryBackend::new());
//! ```
//!
//! # Generated Tests
//!
//! ## Mutations
//! - `test_add_distinct_records`: both adds succeed and read back equal
//! - `test_add_duplicate_id`: second add refused, collection unchanged
//! - `test_edit_keeps_write_once_fields`: id/author/createdAt survive a patch
//! - `test_edit_rejects_invalid_merge`: nothing changes on a bad patch
//! - `test_description_length_boundary`: 200 chars accepted, 201 refused
//! - `test_remove`: known id removed, unknown id reported
//! - `test_add_all_reports_rejects`: only the invalid record comes back
//!
//! ## Queries
//! - `test_query_filters_then_pages`: filter applies before skip/top
//! - `test_page_far_past_the_end`: huge page numbers give an empty page
//! - `test_stats_on_empty_store`: zeroed aggregates
//! - `test_stats_with_huge_guest_counts`: the average does not overflow
//!
//! ## Persistence
//! - `test_new_store_seeds_backend`: absent key gets the seed written
//! - `test_restore_round_trip`: a fresh store on the same backend sees the same records
//! - `test_restore_drops_invalid_and_duplicates`: stored garbage is filtered
//! - `test_restore_accepts_legacy_events_key`: old blobs still load
//! - `test_corrupt_blob_keeps_seed`: unreadable blob leaves the seed in place
//! - `test_clear_twice`: idempotent, backend key removed
//!
//! ## Export / Import
//! - `test_export_then_import`: backup file restores into an empty store
//! - `test_import_format_error`: non-JSON payload leaves the store untouched
//! - `test_import_partial`: invalid, duplicate and malformed elements come back raw
//! - `test_import_prefers_records_over_events`: both keys present is not an error

/// Generate the `EventStore` conformance suite for a backend.
///
/// `$factory` must be an expression that evaluates to a fresh backend
/// implementing `KeyValueBackend + 'static`. It is re-evaluated for each test
/// to ensure isolation.
#[macro_export]
macro_rules! store_contract_tests {
    ($factory:expr) => {
        mod store_contract_tests {
            use super::*;
            use event_booking::prelude::*;
            use serde_json::json;

            fn fresh() -> (Arc<dyn KeyValueBackend>, EventStore) {
                let backend: Arc<dyn KeyValueBackend> = Arc::new($factory);
                let store = EventStore::new(backend.clone(), StoreConfig::default());
                (backend, store)
            }

            // ==================================================================
            // Mutations
            // ==================================================================

            #[test]
            fn test_add_distinct_records() {
                let (_, mut store) = fresh();
                let first = booking("1", 1).event_type("wedding");
                let second = booking("2", 2).guests(40);

                assert!(store.add(first.clone()));
                assert!(store.add(second.clone()));
                assert_eq!(store.len(), 2);
                assert_eq!(store.get("1"), Some(first));
                assert_eq!(store.get("2"), Some(second));
            }

            #[test]
            fn test_add_duplicate_id() {
                let (_, mut store) = fresh();
                assert!(store.add(booking("1", 1)));

                let clash = Record::with_id("1", "Petr", "Another booking", november(5));
                assert!(!store.add(clash));
                assert_eq!(store.len(), 1);
                assert_eq!(store.get("1").unwrap().author, "Maria");
            }

            #[test]
            fn test_edit_keeps_write_once_fields() {
                let (_, mut store) = fresh();
                store.add(booking("1", 1));

                let patch = RecordPatch {
                    id: Some("hijacked".to_string()),
                    author: Some("Mallory".to_string()),
                    created_at: Some(november(30)),
                    ..RecordPatch::new().title("Renamed").guests(12)
                };
                assert!(store.edit("1", &patch));

                let edited = store.get("1").unwrap();
                assert_eq!(edited.id, "1");
                assert_eq!(edited.author, "Maria");
                assert_eq!(edited.created_at, november(1));
                assert_eq!(edited.title.as_deref(), Some("Renamed"));
                assert_eq!(edited.guests_count, Some(12));
                assert!(store.get("hijacked").is_none());
            }

            #[test]
            fn test_edit_rejects_invalid_merge() {
                let (_, mut store) = fresh();
                store.add(booking("1", 1));
                let before = store.get("1");

                assert!(!store.edit("1", &RecordPatch::new().guests(-3)));
                assert!(!store.edit("1", &RecordPatch::new().description("")));
                assert!(!store.edit("unknown", &RecordPatch::new().title("x")));
                assert_eq!(store.get("1"), before);
            }

            #[test]
            fn test_description_length_boundary() {
                let (_, mut store) = fresh();
                let at_limit = Record::with_id("200", "Maria", "a".repeat(200), november(1));
                let over_limit = Record::with_id("201", "Maria", "a".repeat(201), november(1));

                assert!(store.add(at_limit));
                assert!(!store.add(over_limit));
                assert!(store.contains("200"));
                assert!(!store.contains("201"));
            }

            #[test]
            fn test_remove() {
                let (_, mut store) = fresh();
                store.add(booking("1", 1));
                store.add(booking("2", 2));

                assert!(store.remove("1"));
                assert!(!store.remove("1"));
                assert!(!store.remove("unknown"));
                assert_eq!(ids(&store.all()), vec!["2"]);
            }

            #[test]
            fn test_add_all_reports_rejects() {
                let (_, mut store) = fresh();
                let rejected = store.add_all(vec![
                    booking("1", 1),
                    invalid_booking("2"),
                    booking("3", 3),
                ]);

                assert_eq!(ids(&rejected), vec!["2"]);
                assert_eq!(store.len(), 2);
                assert!(store.contains("1") && store.contains("3"));
            }

            // ==================================================================
            // Queries
            // ==================================================================

            #[test]
            fn test_query_filters_then_pages() {
                let (_, mut store) = fresh();
                store.add(booking("w1", 1).event_type("wedding"));
                store.add(booking("c1", 2).event_type("corporate"));
                store.add(booking("w2", 3).event_type("wedding"));
                store.add(booking("w3", 4).event_type("wedding"));

                let weddings = EventFilter::new().event_type("wedding");
                let first = store.query(0, 2, &weddings);
                assert_eq!(ids(&first), vec!["w3", "w2"]);

                let second = store.query(2, 2, &weddings);
                assert_eq!(ids(&second), vec!["w1"]);

                assert!(store.query(10, 2, &weddings).is_empty());
                assert_eq!(store.query(-1, 0, &EventFilter::new()).len(), 4);
            }

            #[test]
            fn test_page_far_past_the_end() {
                let (_, mut store) = fresh();
                store.add(booking("1", 1));
                store.add(booking("2", 2));

                let page = store.page(usize::MAX, 10, &EventFilter::new());
                assert!(page.data.is_empty());
                assert_eq!(page.pagination.total, 2);
                assert_eq!(page.pagination.total_pages, 1);
                assert!(!page.pagination.has_next);

                assert!(store.query(i64::MAX, i64::MAX, &EventFilter::new()).is_empty());
            }

            #[test]
            fn test_stats_on_empty_store() {
                let (_, store) = fresh();
                let stats = store.stats();

                assert_eq!(stats.total, 0);
                assert_eq!(stats.average_guests, 0);
                assert_eq!(stats.upcoming, 0);
                assert_eq!(stats.past, 0);
                assert!(stats.by_event_type.is_empty());
                assert!(stats.by_status.is_empty());
            }

            #[test]
            fn test_stats_with_huge_guest_counts() {
                let (_, mut store) = fresh();
                assert!(store.add(booking("1", 1).guests(i64::MAX)));
                assert!(store.add(booking("2", 2).guests(i64::MAX)));

                let stats = store.stats();
                assert_eq!(stats.total, 2);
                assert_eq!(stats.average_guests, i64::MAX);
            }

            // ==================================================================
            // Persistence
            // ==================================================================

            #[test]
            fn test_new_store_seeds_backend() {
                let backend: Arc<dyn KeyValueBackend> = Arc::new($factory);
                let store = EventStore::with_demo_data(backend.clone(), StoreConfig::default());
                assert_eq!(store.len(), 10);

                let blob = backend.get("eventCollection").unwrap().unwrap();
                let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
                assert_eq!(value["count"], json!(10));
                assert_eq!(value["version"], json!("1.0"));
            }

            #[test]
            fn test_restore_round_trip() {
                let (backend, mut store) = fresh();
                store.add(booking("1", 1).date(november(20)).guests(80).hall("Grand Hall"));
                store.add(booking("2", 2).event_type("kids").status(status::CONFIRMED));

                let reopened = EventStore::new(backend, StoreConfig::default());
                assert_eq!(reopened.all(), store.all());
            }

            #[test]
            fn test_restore_drops_invalid_and_duplicates() {
                let backend: Arc<dyn KeyValueBackend> = Arc::new($factory);
                let blob = json!({
                    "records": [
                        {"id": "1", "description": "kept", "author": "Maria",
                         "createdAt": "2024-11-01T12:00:00Z"},
                        {"id": "1", "description": "repeat", "author": "Petr",
                         "createdAt": "2024-11-02T12:00:00Z"},
                        {"id": "2", "description": "", "author": "Petr",
                         "createdAt": "2024-11-03T12:00:00Z"},
                        {"id": 3}
                    ],
                    "version": "1.0"
                });
                backend.set("eventCollection", &blob.to_string()).unwrap();

                let store = EventStore::new(backend, StoreConfig::default());
                assert_eq!(ids(&store.all()), vec!["1"]);
                assert_eq!(store.get("1").unwrap().description, "kept");
            }

            #[test]
            fn test_restore_accepts_legacy_events_key() {
                let backend: Arc<dyn KeyValueBackend> = Arc::new($factory);
                let blob = r#"{"events": [{"id": "7", "description": "legacy",
                    "author": "Olga", "createdAt": "2024-11-20"}]}"#;
                backend.set("eventCollection", blob).unwrap();

                let store = EventStore::new(backend, StoreConfig::default());
                let record = store.get("7").unwrap();
                assert_eq!(record.created_at, november(20) - chrono::Duration::hours(12));
            }

            #[test]
            fn test_corrupt_blob_keeps_seed() {
                let backend: Arc<dyn KeyValueBackend> = Arc::new($factory);
                backend.set("eventCollection", "{not json").unwrap();

                let mut store = EventStore::with_demo_data(backend.clone(), StoreConfig::default());
                assert_eq!(store.len(), 10);
                assert!(!store.restore());
                assert_eq!(store.len(), 10);
            }

            #[test]
            fn test_clear_twice() {
                let (backend, mut store) = fresh();
                store.add(booking("1", 1));
                assert!(backend.get("eventCollection").unwrap().is_some());

                store.clear();
                store.clear();
                assert!(store.is_empty());
                assert!(backend.get("eventCollection").unwrap().is_none());
            }

            // ==================================================================
            // Export / Import
            // ==================================================================

            #[tokio::test]
            async fn test_export_then_import() {
                let dir = tempfile::TempDir::new().unwrap();
                let (_, mut source_store) = fresh();
                source_store.add(booking("1", 1).event_type("wedding"));
                source_store.add(booking("2", 2).guests(25));

                let sink = DirectorySink::new(dir.path());
                let file_name = source_store.export_to(&sink).unwrap();
                assert!(file_name.starts_with("events-backup-"));
                assert!(file_name.ends_with(".json"));

                let (_, mut target) = fresh();
                let report = target
                    .import_from(&FileSource::new(dir.path().join(&file_name)))
                    .await
                    .unwrap();

                assert_eq!(report.imported, 2);
                assert!(report.is_clean());
                assert_eq!(target.all(), source_store.all());
            }

            #[tokio::test]
            async fn test_import_format_error() {
                let (_, mut store) = fresh();
                store.add(booking("1", 1));

                for payload in ["not json", r#"{"items": []}"#, "[]"] {
                    let err = store.import_from(&TextSource::new(payload)).await.unwrap_err();
                    assert!(matches!(err, ImportError::Format { .. }), "{payload}");
                }
                assert_eq!(ids(&store.all()), vec!["1"]);
            }

            #[tokio::test]
            async fn test_import_partial() {
                let (_, mut store) = fresh();
                store.add(booking("1", 1));

                let payload = json!({
                    "records": [
                        {"id": "2", "description": "new", "author": "Petr",
                         "createdAt": "2024-11-02T12:00:00Z"},
                        {"id": "1", "description": "clash", "author": "Petr",
                         "createdAt": "2024-11-03T12:00:00Z"},
                        {"id": "3", "description": "x".repeat(201), "author": "Petr",
                         "createdAt": "2024-11-04T12:00:00Z"},
                        "not a record"
                    ]
                });

                let report = store
                    .import_from(&TextSource::new(payload.to_string()))
                    .await
                    .unwrap();

                assert_eq!(report.imported, 1);
                assert_eq!(report.rejected.len(), 3);
                assert_eq!(report.rejected[0]["description"], json!("clash"));
                assert_eq!(report.rejected[1]["id"], json!("3"));
                assert_eq!(report.rejected[2], json!("not a record"));
                assert_eq!(store.len(), 2);
                assert_eq!(store.get("1").unwrap().description, "Booking 1");
            }

            #[tokio::test]
            async fn test_import_prefers_records_over_events() {
                let (_, mut store) = fresh();
                let payload = json!({
                    "records": [
                        {"id": "2", "description": "new", "author": "Petr",
                         "createdAt": "2024-11-02T12:00:00Z"}
                    ],
                    "events": []
                });

                let report = store
                    .import_from(&TextSource::new(payload.to_string()))
                    .await
                    .unwrap();

                assert_eq!(report.imported, 1);
                assert!(report.is_clean());
                assert!(store.contains("2"));
            }
        }
    };
}
