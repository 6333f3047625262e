//! CSV loading for uploaded sensor exports
//!
//! The expected shape is a `timestamp` column plus one or more numeric
//! columns. A column counts as numeric when every non-empty cell parses as a
//! number and at least one cell is non-empty. Cells holding one of the
//! usual missing-value markers (`NA`, `NaN`, `null`, ...) count as empty.
//! Index columns left behind by spreadsheet/pandas exports (empty header or
//! `Unnamed: N`) are dropped. Header names must be unique.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{DataTable, NumericColumn, TIMESTAMP_COLUMN};

/// Cell contents read as a missing value, matching dataframe CSV readers
const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parse CSV data into a validated table
pub fn parse_csv<R: Read>(reader: R) -> Result<DataTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    if let Some(name) = duplicate_header(&headers) {
        return Err(Error::InvalidData(format!("duplicate column '{}'", name)));
    }
    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

    for result in rdr.records() {
        let record = result?;
        for (i, column) in cells.iter_mut().enumerate() {
            column.push(record.get(i).unwrap_or("").to_string());
        }
    }

    let mut column_names = Vec::new();
    let mut timestamps = None;
    let mut numeric = Vec::new();

    for (name, values) in headers.into_iter().zip(cells) {
        if is_index_artifact(&name) {
            debug!(column = %name, "Skipping index column");
            continue;
        }

        if name == TIMESTAMP_COLUMN {
            timestamps = Some(values);
        } else if let Some(parsed) = parse_numeric(&values) {
            numeric.push(NumericColumn::new(&name, parsed));
        } else {
            debug!(column = %name, "Column is not numeric, excluded from charts");
        }
        column_names.push(name);
    }

    let timestamps = timestamps.ok_or(Error::MissingTimestamp)?;
    let table = DataTable::new(column_names, timestamps, numeric)?;

    info!(
        rows = table.row_count(),
        numeric_columns = table.numeric_columns().len(),
        "Loaded CSV dataset"
    );

    Ok(table)
}

/// Load a CSV file from disk
pub fn load_csv(path: &Path) -> Result<DataTable> {
    let file = File::open(path)?;
    parse_csv(file)
}

/// Columns written by exporters that only carry a row index
fn is_index_artifact(name: &str) -> bool {
    name.is_empty() || name.starts_with("Unnamed")
}

/// First header name that appears more than once, ignoring index columns
fn duplicate_header(headers: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    headers
        .iter()
        .filter(|h| !is_index_artifact(h))
        .find(|h| !seen.insert(h.as_str()))
        .map(|h| h.as_str())
}

fn is_missing(value: &str) -> bool {
    MISSING_MARKERS.contains(&value)
}

/// Parse every cell as a number; `None` if any present cell isn't one or
/// the column has no present cells
fn parse_numeric(values: &[String]) -> Option<Vec<Option<f64>>> {
    let mut seen_value = false;
    let mut parsed = Vec::with_capacity(values.len());

    for value in values {
        if is_missing(value) {
            parsed.push(None);
            continue;
        }
        let number = value.parse::<f64>().ok()?;
        seen_value = true;
        parsed.push(Some(number));
    }

    seen_value.then_some(parsed)
}
