//! Schema drift comparison
//!
//! Compares a reference [`TableSchema`] against a current one, field by
//! field, and produces a complete [`DriftReport`]. Every field is always
//! evaluated; any stop-on-first-failure policy belongs to the caller.

use std::collections::HashSet;

use tabledrift_core::{
    ColumnDef, Divergence, DriftReport, FieldCheck, FieldOutcome, SchemaField, TableSchema,
};
use tracing::{info, warn};

/// Compare two schemas and report per-field drift
///
/// Fields are evaluated in [`SchemaField::ORDER`]. Columns and partitions
/// compare as unordered sets of (name, type) pairs, so two schemas declaring
/// the same pairs in different order are equal. The scalar fields compare as
/// exact strings (case-insensitive in practice, since the parser lower-cases
/// the statement).
pub fn compare(reference: &TableSchema, current: &TableSchema) -> DriftReport {
    let mut field_results = Vec::with_capacity(SchemaField::ORDER.len());

    for field in SchemaField::ORDER {
        let outcome = match field {
            SchemaField::Columns => compare_pairs(
                reference.columns.iter().map(ColumnDef::as_pair),
                current.columns.iter().map(ColumnDef::as_pair),
            ),
            SchemaField::Partitions => compare_pairs(
                pair_view(&reference.partition_columns),
                pair_view(&current.partition_columns),
            ),
            SchemaField::Location => compare_scalar(&reference.location, &current.location),
            SchemaField::InputFormat => {
                compare_scalar(&reference.input_format, &current.input_format)
            }
            SchemaField::OutputFormat => {
                compare_scalar(&reference.output_format, &current.output_format)
            }
            SchemaField::TableKind => compare_scalar(
                &reference.table_kind.to_string(),
                &current.table_kind.to_string(),
            ),
        };

        match &outcome {
            FieldOutcome::Matched => info!(field = %field, "field matched"),
            FieldOutcome::Diverged(d) => warn!(
                field = %field,
                reference = %d.reference,
                current = %d.current,
                "field diverged"
            ),
        }

        field_results.push(FieldCheck { field, outcome });
    }

    DriftReport::from_field_results(field_results)
}

fn pair_view(map: &std::collections::BTreeMap<String, String>) -> impl Iterator<Item = (&str, &str)> + '_ {
    map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
}

/// Set comparison of (name, type) pairs
///
/// On divergence the payload carries the current-minus-reference difference
/// only. Pairs removed from current relative to the reference are left out
/// on purpose; the intended use case is catching newly introduced drift in
/// the observed schema.
fn compare_pairs<'a>(
    reference: impl Iterator<Item = (&'a str, &'a str)>,
    current: impl Iterator<Item = (&'a str, &'a str)>,
) -> FieldOutcome {
    let reference: HashSet<(&str, &str)> = reference.collect();
    let current: HashSet<(&str, &str)> = current.collect();

    if reference == current {
        return FieldOutcome::Matched;
    }

    let mut added_entries: Vec<ColumnDef> = current
        .difference(&reference)
        .map(|(name, data_type)| ColumnDef::new(*name, *data_type))
        .collect();
    added_entries.sort();

    FieldOutcome::Diverged(Divergence {
        reference: render_pairs(&reference),
        current: render_pairs(&current),
        added_entries,
    })
}

fn compare_scalar(reference: &str, current: &str) -> FieldOutcome {
    if reference == current {
        FieldOutcome::Matched
    } else {
        FieldOutcome::Diverged(Divergence {
            reference: reference.to_string(),
            current: current.to_string(),
            added_entries: Vec::new(),
        })
    }
}

/// Render a pair set sorted by name, for stable display strings
fn render_pairs(pairs: &HashSet<(&str, &str)>) -> String {
    let mut sorted: Vec<_> = pairs.iter().collect();
    sorted.sort();
    sorted
        .iter()
        .map(|(name, data_type)| format!("{name} {data_type}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use tabledrift_core::{CheckStatus, TableKind};

    fn schema(columns: Vec<ColumnDef>) -> TableSchema {
        TableSchema {
            table_kind: TableKind::External,
            columns,
            partition_columns: BTreeMap::from([("month_run".to_string(), "string".to_string())]),
            input_format: "org.apache.hadoop.mapred.textinputformat".to_string(),
            output_format: "org.apache.hadoop.hive.ql.io.hiveignorekeytextoutputformat"
                .to_string(),
            location: "s3://bucket/db/t".to_string(),
        }
    }

    fn base_columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("id", "string"),
            ColumnDef::new("country", "string"),
        ]
    }

    #[test]
    fn identical_schemas_pass() {
        let reference = schema(base_columns());
        let report = compare(&reference, &reference.clone());

        assert_eq!(report.overall_status, CheckStatus::Passed);
        assert_eq!(report.field_results.len(), 6);
        assert!(report.field_results.iter().all(|c| !c.is_diverged()));
    }

    #[test]
    fn column_order_does_not_matter() {
        let reference = schema(base_columns());
        let mut shuffled = base_columns();
        shuffled.reverse();
        let current = schema(shuffled);

        let report = compare(&reference, &current);
        assert!(report.passed());
    }

    #[test]
    fn added_column_reported_asymmetrically() {
        let reference = schema(base_columns());
        let mut with_extra = base_columns();
        with_extra.push(ColumnDef::new("region", "string"));
        let current = schema(with_extra);

        let report = compare(&reference, &current);
        assert_eq!(report.overall_status, CheckStatus::Failed);
        assert_eq!(report.diverged_fields(), vec![SchemaField::Columns]);
        assert_eq!(
            report.diverged_entries(SchemaField::Columns),
            &[ColumnDef::new("region", "string")]
        );

        // Swapped sides: the removed column exists only in the new current
        // side's reference, so nothing is "added" and the payload is empty.
        let swapped = compare(&current, &reference);
        assert_eq!(swapped.overall_status, CheckStatus::Failed);
        assert!(swapped.diverged_entries(SchemaField::Columns).is_empty());
    }

    #[test]
    fn type_change_shows_in_added_entries() {
        let reference = schema(base_columns());
        let current = schema(vec![
            ColumnDef::new("id", "bigint"),
            ColumnDef::new("country", "string"),
        ]);

        let report = compare(&reference, &current);
        assert_eq!(
            report.diverged_entries(SchemaField::Columns),
            &[ColumnDef::new("id", "bigint")]
        );
    }

    #[test]
    fn all_fields_evaluated_despite_early_divergence() {
        let reference = schema(base_columns());
        let mut current = schema(vec![ColumnDef::new("other", "int")]);
        current.location = "s3://bucket/db/elsewhere".to_string();
        current.table_kind = TableKind::Managed;

        let report = compare(&reference, &current);
        assert_eq!(report.field_results.len(), 6);
        assert_eq!(
            report.diverged_fields(),
            vec![
                SchemaField::Columns,
                SchemaField::Location,
                SchemaField::TableKind
            ]
        );
    }

    #[test]
    fn partition_drift_reported_independently() {
        let reference = schema(base_columns());
        let mut current = schema(base_columns());
        current
            .partition_columns
            .insert("day_run".to_string(), "string".to_string());

        let report = compare(&reference, &current);
        assert_eq!(report.diverged_fields(), vec![SchemaField::Partitions]);
        assert_eq!(
            report.diverged_entries(SchemaField::Partitions),
            &[ColumnDef::new("day_run", "string")]
        );
    }

    #[test]
    fn empty_partitions_match() {
        let mut reference = schema(base_columns());
        let mut current = schema(base_columns());
        reference.partition_columns.clear();
        current.partition_columns.clear();

        let report = compare(&reference, &current);
        assert!(report.passed());
    }

    #[test]
    fn scalar_divergence_has_no_entry_payload() {
        let reference = schema(base_columns());
        let mut current = schema(base_columns());
        current.input_format = "org.apache.hadoop.hive.ql.io.parquet.mapredparquet".to_string();

        let report = compare(&reference, &current);
        let divergence = report.divergence(SchemaField::InputFormat).unwrap();
        assert_eq!(divergence.reference, "org.apache.hadoop.mapred.textinputformat");
        assert!(divergence.added_entries.is_empty());
        assert!(report.diverged_entries(SchemaField::InputFormat).is_empty());
    }

    #[test]
    fn added_entries_sorted_by_name() {
        let reference = schema(vec![ColumnDef::new("id", "string")]);
        let current = schema(vec![
            ColumnDef::new("id", "string"),
            ColumnDef::new("zone", "string"),
            ColumnDef::new("area", "string"),
        ]);

        let report = compare(&reference, &current);
        assert_eq!(
            report.diverged_entries(SchemaField::Columns),
            &[
                ColumnDef::new("area", "string"),
                ColumnDef::new("zone", "string"),
            ]
        );
    }
}
