//! Per-table drift check orchestration
//!
//! Fetches the reference DDL from the object store and the current DDL from
//! the live catalog, parses both, compares, and always returns a
//! [`CheckRecord`]: fetch failures, parse failures, and drift all fold into
//! a `Failed` record so every run yields one uniform result shape.

use std::sync::Arc;

use tabledrift_core::{CheckRecord, Config, DriftReport};
use tabledrift_ddl::ParseError;
use tabledrift_store::{DdlStore, StoreError, TableCatalog};
use tracing::{error, info};

use crate::differ::compare;

/// A failure somewhere between fetch and compare
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("failed to fetch DDL: {0}")]
    Fetch(#[from] StoreError),

    #[error("failed to parse {side} DDL: {source}")]
    Parse {
        side: &'static str,
        source: ParseError,
    },
}

/// Runs drift checks for (schema, table) pairs
///
/// Invocations are independent; a caller fanning out over many tables can
/// run one task per table without any coordination here.
pub struct DriftChecker {
    store: Arc<dyn DdlStore>,
    catalog: Arc<dyn TableCatalog>,
    config: Config,
}

impl DriftChecker {
    /// Create a checker over the given collaborators
    pub fn new(store: Arc<dyn DdlStore>, catalog: Arc<dyn TableCatalog>, config: Config) -> Self {
        Self {
            store,
            catalog,
            config,
        }
    }

    /// Check one table and return the uniform result record
    ///
    /// Never panics and never surfaces an error: failures become `Failed`
    /// records carrying the error text.
    pub async fn check_table(&self, schema_name: &str, table_name: &str) -> CheckRecord {
        let check_name = format!("compare_ddl for {schema_name}.{table_name}");

        match self.run(schema_name, table_name).await {
            Ok(report) if report.passed() => {
                info!(schema = schema_name, table = table_name, "schemas matched");
                CheckRecord::passed(check_name, "all fields matched")
            }
            Ok(report) => {
                let fields: Vec<&str> = report
                    .diverged_fields()
                    .iter()
                    .map(|f| f.as_str())
                    .collect();
                error!(
                    schema = schema_name,
                    table = table_name,
                    diverged = fields.join(", "),
                    "schema drift detected"
                );
                CheckRecord::failed(
                    check_name,
                    format!("schema drift in: {}", fields.join(", ")),
                )
            }
            Err(e) => {
                error!(schema = schema_name, table = table_name, error = %e, "check failed");
                CheckRecord::failed(check_name, e.to_string())
            }
        }
    }

    /// Fetch, parse, and compare; typed errors for every failure site
    pub async fn run(
        &self,
        schema_name: &str,
        table_name: &str,
    ) -> Result<DriftReport, CheckError> {
        let path = self.config.reference_path_for(schema_name, table_name);
        let reference_ddl = self.store.read_ddl(&path).await?;
        let current_ddl = self
            .catalog
            .show_create_table(schema_name, table_name)
            .await?;

        let reference = tabledrift_ddl::parse(&reference_ddl).map_err(|source| {
            CheckError::Parse {
                side: "reference",
                source,
            }
        })?;
        let current = tabledrift_ddl::parse(&current_ddl).map_err(|source| CheckError::Parse {
            side: "current",
            source,
        })?;

        Ok(compare(&reference, &current))
    }
}
