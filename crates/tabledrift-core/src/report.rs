//! Drift report and check record types
//!
//! These are the stable output shapes consumed by downstream tooling.
//! Field names and the comparison order are part of the public contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::ColumnDef;

/// The fixed set of compared schema fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaField {
    Columns,
    Partitions,
    Location,
    InputFormat,
    OutputFormat,
    TableKind,
}

impl SchemaField {
    /// Comparison order, fixed so reports are reproducible across runs and
    /// independent of any map iteration order
    pub const ORDER: [SchemaField; 6] = [
        SchemaField::Columns,
        SchemaField::Partitions,
        SchemaField::Location,
        SchemaField::InputFormat,
        SchemaField::OutputFormat,
        SchemaField::TableKind,
    ];

    /// Stable string identifier for the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Columns => "columns",
            Self::Partitions => "partitions",
            Self::Location => "location",
            Self::InputFormat => "input_format",
            Self::OutputFormat => "output_format",
            Self::TableKind => "table_kind",
        }
    }
}

impl std::fmt::Display for SchemaField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Explanation payload for a diverged field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divergence {
    /// Reference-side value, rendered for display
    pub reference: String,

    /// Current-side value, rendered for display
    pub current: String,

    /// (name, type) pairs present in the current schema but absent from the
    /// reference, sorted by name
    ///
    /// Populated for columns and partitions only. The difference is
    /// asymmetric on purpose: pairs removed from current relative to the
    /// reference are not reported.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added_entries: Vec<ColumnDef>,
}

/// Outcome of comparing one schema field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum FieldOutcome {
    /// Reference and current agree on this field
    Matched,

    /// Reference and current disagree; payload explains how
    Diverged(Divergence),
}

/// One per-field entry in a drift report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCheck {
    /// Which field was compared
    pub field: SchemaField,

    /// What the comparison found
    #[serde(flatten)]
    pub outcome: FieldOutcome,
}

impl FieldCheck {
    /// Whether this field diverged
    pub fn is_diverged(&self) -> bool {
        matches!(self.outcome, FieldOutcome::Diverged(_))
    }
}

/// Overall status of a comparison run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Passed,
    Failed,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Result of comparing a reference schema against a current schema
///
/// Contains one entry per field of [`SchemaField::ORDER`], always in that
/// order, regardless of how many fields diverged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftReport {
    /// Per-field outcomes in the fixed comparison order
    pub field_results: Vec<FieldCheck>,

    /// Failed if any field diverged
    pub overall_status: CheckStatus,

    /// When the comparison ran
    pub checked_at: DateTime<Utc>,
}

impl DriftReport {
    /// Build a report from per-field results, deriving the overall status
    /// and stamping the current time
    pub fn from_field_results(field_results: Vec<FieldCheck>) -> Self {
        let overall_status = if field_results.iter().any(FieldCheck::is_diverged) {
            CheckStatus::Failed
        } else {
            CheckStatus::Passed
        };

        Self {
            field_results,
            overall_status,
            checked_at: Utc::now(),
        }
    }

    /// Whether every field matched
    pub fn passed(&self) -> bool {
        self.overall_status == CheckStatus::Passed
    }

    /// Fields that diverged, in comparison order
    pub fn diverged_fields(&self) -> Vec<SchemaField> {
        self.field_results
            .iter()
            .filter(|c| c.is_diverged())
            .map(|c| c.field)
            .collect()
    }

    /// Divergence payload for a field, if that field diverged
    pub fn divergence(&self, field: SchemaField) -> Option<&Divergence> {
        self.field_results
            .iter()
            .find(|c| c.field == field)
            .and_then(|c| match &c.outcome {
                FieldOutcome::Diverged(d) => Some(d),
                FieldOutcome::Matched => None,
            })
    }

    /// Pairs present only in the current schema for a diverged field
    ///
    /// Empty for matched fields and for scalar fields.
    pub fn diverged_entries(&self, field: SchemaField) -> &[ColumnDef] {
        self.divergence(field)
            .map_or(&[], |d| d.added_entries.as_slice())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Uniform result record for one checked table
///
/// Emitted by the orchestration layer for every run: fetch failures, parse
/// failures, and drift all fold into a `Failed` record so downstream tooling
/// sees one shape regardless of where a failure happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRecord {
    /// Human-readable check identifier, e.g. `compare_ddl for db.events`
    pub check_name: String,

    /// Passed or failed
    pub status: CheckStatus,

    /// Drift summary or error text
    pub message: String,

    /// When the check ran
    pub checked_at: DateTime<Utc>,
}

impl CheckRecord {
    /// Create a passed record
    pub fn passed(check_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check_name: check_name.into(),
            status: CheckStatus::Passed,
            message: message.into(),
            checked_at: Utc::now(),
        }
    }

    /// Create a failed record
    pub fn failed(check_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check_name: check_name.into(),
            status: CheckStatus::Failed,
            message: message.into(),
            checked_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(field: SchemaField) -> FieldCheck {
        FieldCheck {
            field,
            outcome: FieldOutcome::Matched,
        }
    }

    fn all_matched() -> Vec<FieldCheck> {
        SchemaField::ORDER.into_iter().map(matched).collect()
    }

    #[test]
    fn clean_report_passes() {
        let report = DriftReport::from_field_results(all_matched());
        assert!(report.passed());
        assert_eq!(report.overall_status, CheckStatus::Passed);
        assert!(report.diverged_fields().is_empty());
        assert!(report.diverged_entries(SchemaField::Columns).is_empty());
    }

    #[test]
    fn single_divergence_fails_overall() {
        let mut results = all_matched();
        results[0] = FieldCheck {
            field: SchemaField::Columns,
            outcome: FieldOutcome::Diverged(Divergence {
                reference: "id string".to_string(),
                current: "id string, region string".to_string(),
                added_entries: vec![ColumnDef::new("region", "string")],
            }),
        };

        let report = DriftReport::from_field_results(results);
        assert!(!report.passed());
        assert_eq!(report.diverged_fields(), vec![SchemaField::Columns]);
        assert_eq!(
            report.diverged_entries(SchemaField::Columns),
            &[ColumnDef::new("region", "string")]
        );
        assert!(report.divergence(SchemaField::Location).is_none());
    }

    #[test]
    fn field_order_is_fixed() {
        let names: Vec<&str> = SchemaField::ORDER.iter().map(|f| f.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "columns",
                "partitions",
                "location",
                "input_format",
                "output_format",
                "table_kind"
            ]
        );
    }

    #[test]
    fn report_serialization() {
        let report = DriftReport::from_field_results(all_matched());
        let json = report.to_json().unwrap();
        assert!(json.contains("\"overall_status\": \"passed\""));
        assert!(json.contains("\"field\": \"columns\""));
    }

    #[test]
    fn check_record_constructors() {
        let ok = CheckRecord::passed("compare_ddl for db.t", "all fields matched");
        assert_eq!(ok.status, CheckStatus::Passed);

        let bad = CheckRecord::failed("compare_ddl for db.t", "could not locate location clause");
        assert_eq!(bad.status, CheckStatus::Failed);
        assert!(bad.message.contains("location"));
    }
}
