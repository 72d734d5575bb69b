//! File-backed object store
//!
//! Each value is stored as a tagged record in its own file under the
//! storage root.

mod file_store;
mod record;

pub use file_store::ObjectStore;
pub use record::Record;
