//! In-memory store and catalog for tests and demos
//!
//! Implements both collaborator traits against plain hash maps, with
//! per-path error injection for simulating backend failures. No real
//! warehouse or object store is ever contacted.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::path::ObjectPath;
use crate::store::{DdlStore, StoreError, TableCatalog};

/// In-memory [`DdlStore`] and [`TableCatalog`] double
///
/// Clones share state, so a test can keep a handle for seeding while the
/// checker under test holds another.
pub struct MemoryStore {
    /// Object path -> stored DDL text
    objects: Arc<RwLock<HashMap<String, String>>>,

    /// `schema.table` -> live DDL text
    tables: Arc<RwLock<HashMap<String, String>>>,

    /// Errors to inject for specific object paths
    errors: Arc<RwLock<HashMap<String, StoreError>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
            tables: Arc::new(RwLock::new(HashMap::new())),
            errors: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed an object at an s3-style path
    pub async fn put_object(&self, path: impl Into<String>, text: impl Into<String>) {
        self.objects.write().await.insert(path.into(), text.into());
    }

    /// Seed the live DDL for a table
    pub async fn put_table(&self, schema_name: &str, table_name: &str, ddl: impl Into<String>) {
        self.tables
            .write()
            .await
            .insert(format!("{schema_name}.{table_name}"), ddl.into());
    }

    /// Inject an error for a specific object path
    pub async fn fail_path(&self, path: impl Into<String>, error: StoreError) {
        self.errors.write().await.insert(path.into(), error);
    }

    /// Number of seeded objects
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            objects: Arc::clone(&self.objects),
            tables: Arc::clone(&self.tables),
            errors: Arc::clone(&self.errors),
        }
    }
}

#[async_trait::async_trait]
impl DdlStore for MemoryStore {
    async fn read_ddl(&self, path: &str) -> Result<String, StoreError> {
        // Validate the path shape the way a real backend would
        ObjectPath::parse(path)?;

        if let Some(error) = self.errors.read().await.get(path) {
            return Err(error.clone());
        }

        self.objects
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    async fn exists(&self, path: &str) -> Result<bool, StoreError> {
        ObjectPath::parse(path)?;
        Ok(self.objects.read().await.contains_key(path))
    }
}

#[async_trait::async_trait]
impl TableCatalog for MemoryStore {
    async fn show_create_table(
        &self,
        schema_name: &str,
        table_name: &str,
    ) -> Result<String, StoreError> {
        let key = format!("{schema_name}.{table_name}");
        self.tables
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or(StoreError::NotFound(key))
    }
}
