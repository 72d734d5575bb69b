//! # serializable_db
//!
//! A naive persistent object store: save any storable value under a key and
//! load it back later.
//!
//! Every record is a single file at `<root>/<key>` holding the value's
//! bincode encoding together with a type tag, so loading with the wrong type
//! is an error rather than a silent reinterpretation.
//!
//! ## Example
//!
//! ```ignore
//! use serializable_db::ObjectStore;
//!
//! let store = ObjectStore::new("data");
//! let key = store.save(&vec!["a".to_string(), "b".to_string()])?;
//! let loaded: Vec<String> = store.load(&key)?;
//! let missing: i32 = store.load_or("missing-key", 0)?;
//! ```

pub mod config;
pub mod model;
pub mod store;

mod error;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use model::{Key, Storable};
pub use store::{ObjectStore, Record};
