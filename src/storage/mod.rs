//! Storage implementations for different backends

pub mod files;
pub mod in_memory;

#[cfg(feature = "lmdb")]
pub mod lmdb;

pub use files::{DirectorySink, FileSource, TextSource};
pub use in_memory::InMemoryBackend;

#[cfg(feature = "lmdb")]
pub use lmdb::LmdbBackend;
