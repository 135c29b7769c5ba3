#![forbid(unsafe_code)]

pub mod file;
pub mod repository;
pub mod snapshot;

pub use file::FileStore;
pub use repository::{InMemoryStore, SnapshotStore, StorageError};
pub use snapshot::{SNAPSHOT_KEY, SessionSnapshot, SessionStore};
