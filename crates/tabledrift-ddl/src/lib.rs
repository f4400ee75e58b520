//! DDL schema extraction
//!
//! Parses a `CREATE [EXTERNAL] TABLE ...` statement into the
//! [`TableSchema`](tabledrift_core::TableSchema) descriptor consumed by the
//! drift engine.

pub mod parser;

pub use parser::{parse, Clause, ParseError};
