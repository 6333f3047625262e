//! Textual dataset digest sent to the language model

use serde::Serialize;

use crate::models::DataTable;
use crate::stats::{describe, render_describe, ColumnSummary};

/// Time range, column list and per-column statistics of a dataset
#[derive(Debug, Clone, Serialize)]
pub struct DataDigest {
    pub first_timestamp: String,
    pub last_timestamp: String,
    pub parameters: Vec<String>,
    pub statistics: Vec<ColumnSummary>,
}

impl DataDigest {
    pub fn from_table(table: &DataTable) -> Self {
        let (first, last) = table.time_range();
        Self {
            first_timestamp: first.to_string(),
            last_timestamp: last.to_string(),
            parameters: table.column_names().to_vec(),
            statistics: describe(table),
        }
    }

    /// Render the digest as prompt input
    pub fn render(&self) -> String {
        format!(
            "Dataset Summary:\n\
             - Time range: {} to {}\n\
             - Parameters: {}\n\
             - Key statistics:\n\
             {}",
            self.first_timestamp,
            self.last_timestamp,
            self.parameters.join(", "),
            render_describe(&self.statistics)
        )
    }
}

impl std::fmt::Display for DataDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::parse_csv;

    #[test]
    fn test_digest_sections() {
        let csv = "timestamp,site,co2_level,pressure\n\
                   2025-03-14 00:00:00,ocean,400,1013\n\
                   2025-03-14 01:00:00,ocean,410,1012\n\
                   2025-03-14 02:00:00,ocean,420,1011\n";
        let table = parse_csv(csv.as_bytes()).unwrap();
        let digest = DataDigest::from_table(&table);

        assert_eq!(digest.first_timestamp, "2025-03-14 00:00:00");
        assert_eq!(digest.last_timestamp, "2025-03-14 02:00:00");
        assert_eq!(digest.statistics.len(), 2);

        let text = digest.render();
        assert!(text.starts_with("Dataset Summary:\n"));
        assert!(text.contains("- Time range: 2025-03-14 00:00:00 to 2025-03-14 02:00:00\n"));
        assert!(text.contains("- Parameters: timestamp, site, co2_level, pressure\n"));
        assert!(text.contains("- Key statistics:\n"));
        assert!(text.contains("410.000000"));
        assert_eq!(text, digest.to_string());
    }
}
