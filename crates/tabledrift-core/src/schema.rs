//! Table schema descriptor types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a table's storage lifecycle is managed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// Storage lives outside the warehouse; dropping the table keeps the data
    External,

    /// Warehouse-managed storage, dropped together with the table
    Managed,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::External => write!(f, "external"),
            Self::Managed => write!(f, "managed"),
        }
    }
}

/// A single column declaration: name plus data type as written
///
/// Both halves are stored lower-cased (the parser folds the whole statement
/// before scanning), so comparisons on these values are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name, backtick quoting stripped
    pub name: String,

    /// Data type token(s), e.g. `string` or `decimal(10,2)`
    pub data_type: String,
}

impl ColumnDef {
    /// Create a new column definition
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }

    /// View as a borrowed (name, type) pair
    pub fn as_pair(&self) -> (&str, &str) {
        (self.name.as_str(), self.data_type.as_str())
    }
}

impl std::fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)
    }
}

/// Parsed descriptor of a single table definition
///
/// Built once by the parser and never mutated afterwards. A successfully
/// parsed schema always has at least one column and all of `table_kind`,
/// `input_format`, `output_format`, and `location` populated;
/// `partition_columns` may legitimately be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// External vs managed storage
    pub table_kind: TableKind,

    /// Columns in declaration order
    ///
    /// Order is meaningful for display only; equality between schemas is
    /// set-based on (name, type) pairs.
    pub columns: Vec<ColumnDef>,

    /// Partition column name -> data type
    pub partition_columns: BTreeMap<String, String>,

    /// Storage input handler class name, opaque exact-match token
    pub input_format: String,

    /// Storage output handler class name, opaque exact-match token
    pub output_format: String,

    /// Storage URI, opaque exact-match token
    pub location: String,
}

impl TableSchema {
    /// Find a column by name
    pub fn find_column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names in declaration order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Whether the table declares any partition columns
    pub fn is_partitioned(&self) -> bool {
        !self.partition_columns.is_empty()
    }
}
