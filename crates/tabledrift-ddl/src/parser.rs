//! DDL clause scanner
//!
//! Extracts a [`TableSchema`] from a `CREATE [EXTERNAL] TABLE ...` statement.
//! The scanner walks the statement left to right through a fixed sequence of
//! clause states (table kind, column list, optional partitions, inputformat,
//! outputformat, location) and fails with a [`ParseError`] naming the clause
//! it could not locate. No partially populated schema is ever returned.
//!
//! The whole statement is lower-cased before scanning, so keyword matching is
//! case-insensitive and identifiers, types, format class names, and locations
//! are all stored (and later compared) lower-cased.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tabledrift_core::{ColumnDef, TableKind, TableSchema};
use tracing::debug;

/// The clauses a statement is expected to carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clause {
    TableKind,
    Columns,
    Partitions,
    InputFormat,
    OutputFormat,
    Location,
}

impl Clause {
    /// Stable string identifier for the clause
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TableKind => "table_kind",
            Self::Columns => "columns",
            Self::Partitions => "partitions",
            Self::InputFormat => "inputformat",
            Self::OutputFormat => "outputformat",
            Self::Location => "location",
        }
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse failure, always naming the offending clause
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("could not locate {0} clause")]
    MissingClause(Clause),

    #[error("unterminated {0} list (no closing parenthesis)")]
    UnterminatedList(Clause),

    #[error("unterminated string literal after {0}")]
    UnterminatedLiteral(Clause),

    #[error("{clause} entry '{entry}' has no data type")]
    MissingDataType { clause: Clause, entry: String },

    #[error("column list is empty")]
    EmptyColumns,
}

impl ParseError {
    /// The clause this failure occurred in
    pub fn clause(&self) -> Clause {
        match self {
            Self::MissingClause(c) | Self::UnterminatedList(c) | Self::UnterminatedLiteral(c) => {
                *c
            }
            Self::MissingDataType { clause, .. } => *clause,
            Self::EmptyColumns => Clause::Columns,
        }
    }
}

/// Parse a table-definition statement into a [`TableSchema`]
///
/// Pure function over the input string; the only observable effect is a few
/// `tracing` debug events with the extracted fields.
pub fn parse(ddl_text: &str) -> Result<TableSchema, ParseError> {
    let ddl = ddl_text.to_lowercase();
    let mut scanner = Scanner::new(&ddl);

    let table_kind = scanner.table_kind()?;
    debug!(kind = %table_kind, "extracted table kind");

    let columns = scanner.column_list()?;
    debug!(count = columns.len(), "extracted columns");

    let partition_columns = scanner.partitions()?;
    debug!(count = partition_columns.len(), "extracted partitions");

    let input_format = scanner.quoted_value("inputformat", Clause::InputFormat)?;
    let output_format = scanner.quoted_value("outputformat", Clause::OutputFormat)?;
    let location = scanner.quoted_value("location", Clause::Location)?;
    debug!(%input_format, %output_format, %location, "extracted storage clauses");

    Ok(TableSchema {
        table_kind,
        columns,
        partition_columns,
        input_format,
        output_format,
        location,
    })
}

/// Cursor over the lower-cased statement
///
/// `pos` only moves forward, so each clause is searched for strictly after
/// the previous one; a `location` keyword buried inside the column list
/// cannot shadow the real clause.
struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Table kind from the second whitespace token: `create external table`
    /// is external, anything else is managed
    fn table_kind(&mut self) -> Result<TableKind, ParseError> {
        let mut tokens = self.text.split_whitespace();
        let _create = tokens
            .next()
            .ok_or(ParseError::MissingClause(Clause::TableKind))?;
        let second = tokens
            .next()
            .ok_or(ParseError::MissingClause(Clause::TableKind))?;

        Ok(if second == "external" {
            TableKind::External
        } else {
            TableKind::Managed
        })
    }

    /// The parenthesized column list following the table name
    fn column_list(&mut self) -> Result<Vec<ColumnDef>, ParseError> {
        let open = self.text[self.pos..]
            .find('(')
            .map(|i| self.pos + i)
            .ok_or(ParseError::MissingClause(Clause::Columns))?;
        let (start, end) = self
            .balanced_span(open)
            .ok_or(ParseError::UnterminatedList(Clause::Columns))?;
        self.pos = end + 1;

        let columns = parse_entries(&self.text[start..end], Clause::Columns)?;
        if columns.is_empty() {
            return Err(ParseError::EmptyColumns);
        }
        Ok(columns)
    }

    /// Optional `partitioned by (...)` clause; absent keyword means no
    /// partition columns
    fn partitions(&mut self) -> Result<BTreeMap<String, String>, ParseError> {
        const KEYWORD: &str = "partitioned by";

        let Some(rel) = self.text[self.pos..].find(KEYWORD) else {
            return Ok(BTreeMap::new());
        };
        let after = self.pos + rel + KEYWORD.len();

        let open = self.text[after..]
            .find('(')
            .map(|i| after + i)
            .ok_or(ParseError::MissingClause(Clause::Partitions))?;
        let (start, end) = self
            .balanced_span(open)
            .ok_or(ParseError::UnterminatedList(Clause::Partitions))?;
        self.pos = end + 1;

        let entries = parse_entries(&self.text[start..end], Clause::Partitions)?;
        Ok(entries
            .into_iter()
            .map(|c| (c.name, c.data_type))
            .collect())
    }

    /// The first single-quoted literal following `keyword`
    fn quoted_value(&mut self, keyword: &str, clause: Clause) -> Result<String, ParseError> {
        let rel = self.text[self.pos..]
            .find(keyword)
            .ok_or(ParseError::MissingClause(clause))?;
        let after = self.pos + rel + keyword.len();

        let open = self.text[after..]
            .find('\'')
            .map(|i| after + i + 1)
            .ok_or(ParseError::MissingClause(clause))?;
        let close = self.text[open..]
            .find('\'')
            .map(|i| open + i)
            .ok_or(ParseError::UnterminatedLiteral(clause))?;
        self.pos = close + 1;

        Ok(self.text[open..close].to_string())
    }

    /// Byte span of the body between a `(` at `open` and its depth-matched
    /// closing `)`, or None if the list never closes
    fn balanced_span(&self, open: usize) -> Option<(usize, usize)> {
        let mut depth = 0usize;
        for (i, c) in self.text[open..].char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some((open + 1, open + i));
                    }
                }
                _ => {}
            }
        }
        None
    }
}

/// Parse a comma-separated list body into column definitions
///
/// Commas are split at parenthesis depth zero so parameterized types like
/// `decimal(10,2)` stay intact. Each entry splits on the first whitespace run
/// into name and data type; backtick quoting is stripped from both halves.
fn parse_entries(body: &str, clause: Clause) -> Result<Vec<ColumnDef>, ParseError> {
    let mut columns = Vec::new();

    for entry in split_top_level(body) {
        let entry = entry.trim();
        if entry.is_empty() {
            // trailing comma
            continue;
        }

        let name_end =
            entry
                .find(char::is_whitespace)
                .ok_or_else(|| ParseError::MissingDataType {
                    clause,
                    entry: entry.to_string(),
                })?;
        let name = entry[..name_end].replace('`', "");
        let data_type = entry[name_end..].trim().replace('`', "");

        columns.push(ColumnDef::new(name, data_type));
    }

    Ok(columns)
}

/// Split on commas at parenthesis depth zero
fn split_top_level(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}
