//! tabledrift core
//!
//! Domain model with stable output shapes: the parsed table schema
//! descriptor, the drift report, and the uniform per-table check record.

pub mod config;
pub mod report;
pub mod schema;

pub use config::{Config, ConfigError};
pub use report::{
    CheckRecord, CheckStatus, Divergence, DriftReport, FieldCheck, FieldOutcome, SchemaField,
};
pub use schema::{ColumnDef, TableKind, TableSchema};
