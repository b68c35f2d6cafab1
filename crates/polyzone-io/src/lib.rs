//! # Polyzone I/O
//!
//! Persistence for the polygon board and view transform on top of a small
//! key-value store abstraction (in-memory or one JSON file per key), plus
//! the JSON settings file.

pub mod error;
pub mod store;
pub mod persist;
pub mod settings;

pub use error::{SettingsError, StoreError};
pub use persist::PersistedState;
pub use settings::ZoneSettings;
pub use store::{FileStore, KeyValueStore, MemoryStore};
