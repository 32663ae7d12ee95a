//! One-shot mirror of the external catalog into the local store.
//!
//! - [`store`] -- the [`store::SyncStore`] seam and its PostgreSQL impl.
//! - [`synchronizer`] -- the paginated fetch / filter / bulk-write run.

pub mod store;
pub mod synchronizer;

pub use store::SyncStore;
pub use synchronizer::{SyncError, SyncReport, Synchronizer, DEFAULT_PAGE_LIMIT};
