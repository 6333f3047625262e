//! Summary statistics over numeric columns
//!
//! Semantics follow the usual dataframe `describe()` conventions: missing
//! cells are ignored, standard deviation is the sample (n-1) estimate, and
//! quantiles use linear interpolation between closest ranks.

use serde::Serialize;

use crate::models::{DataTable, NumericColumn};

/// Row labels of the rendered statistics table, in order
const STAT_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Per-column summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    pub fn from_column(column: &NumericColumn) -> Self {
        let mut values: Vec<f64> = column.present().collect();
        values.sort_by(|a, b| a.total_cmp(b));

        let count = values.len();
        let mean = mean(&values);

        Self {
            name: column.name.clone(),
            count,
            mean,
            std: sample_std(&values, mean),
            min: values.first().copied().unwrap_or(f64::NAN),
            q25: quantile_sorted(&values, 0.25),
            median: quantile_sorted(&values, 0.5),
            q75: quantile_sorted(&values, 0.75),
            max: values.last().copied().unwrap_or(f64::NAN),
        }
    }

    /// Values in `STAT_LABELS` order
    fn row_values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Summaries for every numeric column of the table
pub fn describe(table: &DataTable) -> Vec<ColumnSummary> {
    table
        .numeric_columns()
        .iter()
        .map(ColumnSummary::from_column)
        .collect()
}

/// Render summaries as a text table, one column per variable and one row per
/// statistic
pub fn render_describe(summaries: &[ColumnSummary]) -> String {
    let label_width = STAT_LABELS.iter().map(|l| l.len()).max().unwrap_or(0);

    let cells: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| s.row_values().iter().map(|v| format!("{:.6}", v)).collect())
        .collect();

    let widths: Vec<usize> = summaries
        .iter()
        .zip(&cells)
        .map(|(s, col)| {
            col.iter()
                .map(String::len)
                .chain(std::iter::once(s.name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();

    out.push_str(&" ".repeat(label_width));
    for (summary, width) in summaries.iter().zip(&widths) {
        out.push_str(&format!("  {:>width$}", summary.name, width = width));
    }

    for (row, label) in STAT_LABELS.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("{:<width$}", label, width = label_width));
        for (col, width) in cells.iter().zip(&widths) {
            out.push_str(&format!("  {:>width$}", col[row], width = width));
        }
    }

    out
}

/// Pearson correlation between two columns using rows where both are present.
///
/// Returns NaN when fewer than two complete pairs exist or either side has
/// zero variance.
pub fn pearson(a: &NumericColumn, b: &NumericColumn) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .values
        .iter()
        .zip(&b.values)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Linear-interpolated quantile of already-sorted values
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
