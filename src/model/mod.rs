//! Core data model types for serializable_db

mod key;
mod storable;

pub use key::Key;
pub use storable::Storable;
