use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::analysis::{FilterSpec, GroupResult};

/// Printed instead of a chart when no group matched anything.
pub const NO_MATCHES_HINT: &str = "Still no matches found. Double-check your tag spelling!";

// ---------------------------------------------------------------------------
// Console table
// ---------------------------------------------------------------------------

/// Render results as an ASCII table, in the order given.
///
/// The hit-rate column only appears when at least one result carries one.
pub fn format_table(results: &[GroupResult]) -> Result<String> {
    let with_hit_rate = results.iter().any(|r| r.hit_rate.is_some());

    let mut fields = vec![
        Field::new("Group", DataType::Utf8, false),
        Field::new("Count", DataType::UInt64, false),
        Field::new("Median Reviews", DataType::Float64, false),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(
            results.iter().map(|r| r.name.as_str()),
        )),
        Arc::new(UInt64Array::from_iter_values(
            results.iter().map(|r| r.count as u64),
        )),
        Arc::new(Float64Array::from_iter_values(
            results.iter().map(|r| r.median_reviews),
        )),
    ];
    if with_hit_rate {
        fields.push(Field::new("Hit Rate %", DataType::Float64, false));
        columns.push(Arc::new(Float64Array::from_iter_values(
            results.iter().map(|r| r.hit_rate.unwrap_or(0.0)),
        )));
    }

    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .context("building results table")?;
    let table = pretty_format_batches(&[batch]).context("formatting results table")?;
    Ok(table.to_string())
}

/// Results as a pretty-printed JSON array.
pub fn to_json(results: &[GroupResult]) -> Result<String> {
    serde_json::to_string_pretty(results).context("serializing results")
}

/// Total number of matches across all groups.
pub fn total_matches(results: &[GroupResult]) -> usize {
    results.iter().map(|r| r.count).sum()
}

// ---------------------------------------------------------------------------
// Group definitions from the command line
// ---------------------------------------------------------------------------

/// Parse `NAME=tag1,tag2[!excl1,excl2]` into a named group.
pub fn parse_group_arg(arg: &str) -> Result<(String, FilterSpec), String> {
    let (name, rule) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=TAGS[!EXCLUDED], got '{arg}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("group name is empty in '{arg}'"));
    }

    let (required, excluded) = rule.split_once('!').unwrap_or((rule, ""));
    let split = |s: &str| -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    };

    Ok((
        name.to_string(),
        FilterSpec::new(split(required), split(excluded)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, count: usize, median: f64, hit_rate: Option<f64>) -> GroupResult {
        GroupResult {
            name: name.to_string(),
            count,
            median_reviews: median,
            hit_rate,
        }
    }

    #[test]
    fn test_format_table_rows_in_order() {
        let table = format_table(&[
            result("Horror", 12, 1500.0, None),
            result("Cozy Farm", 0, 0.0, None),
        ])
        .unwrap();

        assert!(table.contains("Group"));
        assert!(table.contains("Median Reviews"));
        assert!(!table.contains("Hit Rate %"));
        let horror = table.find("Horror").unwrap();
        let cozy = table.find("Cozy Farm").unwrap();
        assert!(horror < cozy);
    }

    #[test]
    fn test_format_table_hit_rate_column() {
        let table = format_table(&[result("RPG", 3, 1000.0, Some(66.67))]).unwrap();
        assert!(table.contains("Hit Rate %"));
        assert!(table.contains("66.67"));
    }

    #[test]
    fn test_to_json_skips_absent_hit_rate() {
        let json = to_json(&[result("Puzzle", 1, 100.0, None)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "Puzzle");
        assert_eq!(value[0]["count"], 1);
        assert_eq!(value[0]["median_reviews"], 100.0);
        assert!(value[0].get("hit_rate").is_none());
    }

    #[test]
    fn test_total_matches() {
        assert_eq!(total_matches(&[]), 0);
        assert_eq!(
            total_matches(&[result("a", 2, 0.0, None), result("b", 3, 0.0, None)]),
            5
        );
    }

    #[test]
    fn test_parse_group_arg() {
        let (name, spec) = parse_group_arg("Cozy Farm=Farming Sim, cozy!Horror").unwrap();
        assert_eq!(name, "Cozy Farm");
        assert_eq!(spec, FilterSpec::new(["farming sim", "cozy"], ["horror"]));

        let (_, spec) = parse_group_arg("RPG=rpg").unwrap();
        assert_eq!(spec, FilterSpec::requiring(["rpg"]));
    }

    #[test]
    fn test_parse_group_arg_errors() {
        assert!(parse_group_arg("no equals sign").is_err());
        assert!(parse_group_arg(" =puzzle").is_err());
    }
}
