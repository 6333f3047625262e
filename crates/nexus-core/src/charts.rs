//! Chart payloads for the presentation layer
//!
//! Rendering is left to the frontend. This module only decides what gets
//! plotted: one time series per numeric column, and a correlation matrix when
//! there are at least two numeric columns.

use serde::Serialize;

use crate::digest::DataDigest;
use crate::models::{DataTable, SensorDomain};
use crate::stats::{pearson, ColumnSummary};

pub const CORRELATION_TITLE: &str = "Parameter Correlation Matrix";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub timestamp: String,
    pub value: f64,
}

/// Line series for one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

/// Square matrix of Pearson coefficients, rows and columns in `columns` order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    /// Render as a text grid with two decimals
    pub fn render(&self) -> String {
        let width = self
            .columns
            .iter()
            .map(|c| c.chars().count())
            .max()
            .unwrap_or(0)
            .max(5);

        let mut out = " ".repeat(width);
        for name in &self.columns {
            out.push_str(&format!("  {:>width$}", name, width = width));
        }
        for (name, row) in self.columns.iter().zip(&self.values) {
            out.push('\n');
            out.push_str(&format!("{:<width$}", name, width = width));
            for value in row {
                out.push_str(&format!("  {:>width$.2}", value, width = width));
            }
        }
        out
    }
}

/// One series per numeric column; missing cells are skipped
pub fn time_series(table: &DataTable) -> Vec<ChartSeries> {
    table
        .numeric_columns()
        .iter()
        .map(|column| ChartSeries {
            name: column.name.clone(),
            points: table
                .timestamps()
                .iter()
                .zip(&column.values)
                .filter_map(|(ts, value)| {
                    value.map(|v| ChartPoint {
                        timestamp: ts.clone(),
                        value: v,
                    })
                })
                .collect(),
        })
        .collect()
}

/// Correlation matrix over numeric columns, `None` with fewer than two
pub fn correlation_matrix(table: &DataTable) -> Option<CorrelationMatrix> {
    let columns = table.numeric_columns();
    if columns.len() < 2 {
        return None;
    }

    let values = columns
        .iter()
        .map(|a| columns.iter().map(|b| pearson(a, b)).collect())
        .collect();

    Some(CorrelationMatrix {
        columns: columns.iter().map(|c| c.name.clone()).collect(),
        values,
    })
}

/// Everything the analysis page shows for one dataset
#[derive(Debug, Clone, Serialize)]
pub struct DatasetView {
    /// "sample" or "upload"
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<SensorDomain>,
    pub columns: Vec<String>,
    pub rows: usize,
    pub time_range: (String, String),
    pub series: Vec<ChartSeries>,
    pub correlation: Option<CorrelationMatrix>,
    pub statistics: Vec<ColumnSummary>,
}

impl DatasetView {
    pub fn sample(domain: SensorDomain, table: &DataTable) -> Self {
        Self::build("sample", Some(domain), table)
    }

    pub fn upload(table: &DataTable) -> Self {
        Self::build("upload", None, table)
    }

    fn build(source: &'static str, domain: Option<SensorDomain>, table: &DataTable) -> Self {
        let digest = DataDigest::from_table(table);
        Self {
            source,
            domain,
            columns: digest.parameters,
            rows: table.row_count(),
            time_range: (digest.first_timestamp, digest.last_timestamp),
            series: time_series(table),
            correlation: correlation_matrix(table),
            statistics: digest.statistics,
        }
    }
}
