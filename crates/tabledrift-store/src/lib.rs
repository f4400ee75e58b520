//! External collaborator contracts
//!
//! The reference DDL lives in an object store and the current DDL comes from
//! a live table catalog. This crate defines those two boundaries plus an
//! in-memory double for tests.

pub mod mock;
pub mod path;
pub mod store;

pub use mock::MemoryStore;
pub use path::{ObjectPath, PathError};
pub use store::{DdlStore, StoreError, TableCatalog};
