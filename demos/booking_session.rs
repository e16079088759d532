//! Walk through a booking session against an in-memory backend
//!
//! This example demonstrates:
//! - Loading a `StoreConfig` from YAML (first argument, optional)
//! - Seeding a store with the demonstration bookings
//! - Adding, editing and removing records
//! - Filtered paging, search and statistics
//! - Exporting a backup and importing it into a fresh store
//!
//! ```sh
//! RUST_LOG=event_booking=debug cargo run --example booking_session
//! ```

use event_booking::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => StoreConfig::from_yaml_file(&path)?,
        None => StoreConfig::default(),
    };

    let backend = Arc::new(InMemoryBackend::new());
    let mut store = EventStore::with_demo_data(backend.clone(), config.clone());
    println!("📚 {} bookings loaded", store.len());

    // Create
    let booking = Record::new("Maria Ivanova", "Silver anniversary dinner")
        .title("Silver anniversary")
        .event_type("anniversary")
        .hall("VIP Room")
        .guests(30)
        .date(Utc::now() + chrono::Duration::days(45))
        .menu(vec![
            LineItem::new("Tasting menu", 30, 45.0),
            LineItem::new("Champagne", 6, 80.0),
        ]);
    let id = booking.id.clone();
    println!("➕ added: {}", store.add(booking));
    if let Some(added) = store.get(&id) {
        println!("   menu total: {:.2}", added.menu_total());
    }

    // Update
    let patch = RecordPatch::new().status(status::CONFIRMED).guests(32);
    println!("✏️  confirmed: {}", store.edit(&id, &patch));

    // Query
    let page = store.page(1, 3, &EventFilter::new().hall("Grand Hall"));
    println!(
        "🔎 Grand Hall page {}/{}: {:?}",
        page.pagination.page,
        page.pagination.total_pages,
        page.data.iter().map(|r| r.title.as_deref().unwrap_or("-")).collect::<Vec<_>>()
    );
    println!("🔎 search 'party': {} matches", store.search("party").len());

    let stats = store.stats();
    println!(
        "📊 total {} | upcoming {} | past {} | avg guests {}",
        stats.total, stats.upcoming, stats.past, stats.average_guests
    );
    println!("💾 {:.1} KB in storage", store.storage_size()?.kilobytes());

    // Preferences
    let prefs = Preferences::new(backend, &config);
    prefs.save_sort_preference("date");
    prefs.save_session(page.pagination.page);

    // Export, then import into an empty store
    let dir = std::env::temp_dir().join("event-booking-demo");
    let file_name = store.export_to(&DirectorySink::new(&dir))?;
    println!("📤 exported to {}", dir.join(&file_name).display());

    let mut restored = EventStore::new(Arc::new(InMemoryBackend::new()), config);
    let report = restored
        .import_from(&FileSource::new(dir.join(&file_name)))
        .await?;
    println!(
        "📥 imported {} records ({} rejected)",
        report.imported,
        report.rejected.len()
    );

    // Delete
    println!("🗑️  removed: {}", store.remove(&id));
    store.clear();
    println!("🧹 cleared, {} left", store.len());

    Ok(())
}
