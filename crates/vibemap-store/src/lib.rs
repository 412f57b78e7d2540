//! Persistence and data-source collaborators for vibemap.
//!
//! `vibemap-core` stays pure; everything that touches the filesystem lives
//! here behind narrow traits so the CLI and tests can swap backends.

pub mod json_file;
pub mod kv;
pub mod session;
pub mod venues;

pub use json_file::JsonFileStore;
pub use kv::{KvStore, MemoryStore, StoreError};
pub use session::{GridSession, SessionError, GRID_STATE_KEY};
pub use venues::{FileVenueSource, VenueSource, VenueSourceError};
