//! Collaborator contracts for fetching DDL text
//!
//! The drift core is pure parse-and-compare; these traits are the only
//! boundary it has to the outside world. Timeouts and retries belong to the
//! implementations, never to the core.

use crate::path::PathError;

/// Errors that can occur when fetching DDL text
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("invalid object path: {0}")]
    InvalidPath(#[from] PathError),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Blob/object store holding reference DDL files
#[async_trait::async_trait]
pub trait DdlStore: Send + Sync {
    /// Read the raw DDL text stored at `path`
    ///
    /// Returns [`StoreError::NotFound`] when nothing exists at the path.
    async fn read_ddl(&self, path: &str) -> Result<String, StoreError>;

    /// Whether any object exists at `path`
    async fn exists(&self, path: &str) -> Result<bool, StoreError>;
}

/// Live table catalog producing the current DDL for a table by name
#[async_trait::async_trait]
pub trait TableCatalog: Send + Sync {
    /// The `SHOW CREATE TABLE` text for `schema_name.table_name`
    async fn show_create_table(
        &self,
        schema_name: &str,
        table_name: &str,
    ) -> Result<String, StoreError>;
}
