//! Domain models for Nexus

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the column every dataset must carry
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Format used when rendering generated timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sensor domains the digital twin can simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorDomain {
    Temperature,
    Co2,
    Radiation,
}

impl SensorDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Co2 => "co2",
            Self::Radiation => "radiation",
        }
    }

    /// Human-readable label shown next to the domain selector
    pub fn label(&self) -> &'static str {
        match self {
            Self::Temperature => "Temperature & Humidity",
            Self::Co2 => "CO₂ & Pressure",
            Self::Radiation => "Solar Radiation & PAR",
        }
    }

    /// Names of the (primary, secondary) columns produced for this domain
    pub fn columns(&self) -> (&'static str, &'static str) {
        match self {
            Self::Temperature => ("temperature", "humidity"),
            Self::Co2 => ("co2_level", "pressure"),
            Self::Radiation => ("solar_radiation", "par_level"),
        }
    }

    pub fn all() -> &'static [SensorDomain] {
        &[Self::Temperature, Self::Co2, Self::Radiation]
    }
}

impl std::str::FromStr for SensorDomain {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "temperature" | "temp" => Ok(Self::Temperature),
            "co2" | "co₂" => Ok(Self::Co2),
            "radiation" | "solar" => Ok(Self::Radiation),
            _ => Err(format!(
                "Unknown sensor domain: {} (expected temperature, co2 or radiation)",
                s
            )),
        }
    }
}

impl std::fmt::Display for SensorDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One hourly sample of a simulated sensor pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading {
    pub timestamp: NaiveDateTime,
    pub primary: f64,
    pub secondary: f64,
}

/// A generated time series for one domain
#[derive(Debug, Clone, Serialize)]
pub struct SensorSeries {
    pub domain: SensorDomain,
    pub readings: Vec<SensorReading>,
}

impl SensorSeries {
    /// Convert into the tabular form shared with uploaded data
    pub fn into_table(self) -> DataTable {
        let (primary_name, secondary_name) = self.domain.columns();
        let timestamps = self
            .readings
            .iter()
            .map(|r| r.timestamp.format(TIMESTAMP_FORMAT).to_string())
            .collect();
        let primary = NumericColumn::new(
            primary_name,
            self.readings.iter().map(|r| Some(r.primary)).collect(),
        );
        let secondary = NumericColumn::new(
            secondary_name,
            self.readings.iter().map(|r| Some(r.secondary)).collect(),
        );

        DataTable {
            column_names: vec![
                TIMESTAMP_COLUMN.to_string(),
                primary_name.to_string(),
                secondary_name.to_string(),
            ],
            timestamps,
            numeric: vec![primary, secondary],
        }
    }
}

/// A numeric column; `None` marks an empty cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl NumericColumn {
    pub fn new(name: &str, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.to_string(),
            values,
        }
    }

    /// Non-missing values in row order
    pub fn present(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|v| *v)
    }
}

/// Tabular sensor data: a `timestamp` column plus numeric columns.
///
/// Every chart, statistic and digest is computed from this type, so the
/// constructor is where the schema is enforced:
/// - a `timestamp` column must be present
/// - at least one numeric column must be present
/// - at least one row, and every numeric column has one value per row
///
/// Numeric columns are the plottable ones. Other columns are kept by name
/// only, in `column_names`, so they still show up in digests.
#[derive(Debug, Clone, Serialize)]
pub struct DataTable {
    column_names: Vec<String>,
    timestamps: Vec<String>,
    numeric: Vec<NumericColumn>,
}

impl DataTable {
    pub fn new(
        column_names: Vec<String>,
        timestamps: Vec<String>,
        numeric: Vec<NumericColumn>,
    ) -> Result<Self> {
        if !column_names.iter().any(|c| c == TIMESTAMP_COLUMN) {
            return Err(Error::MissingTimestamp);
        }
        if numeric.is_empty() {
            return Err(Error::NoNumericColumns);
        }
        if timestamps.is_empty() {
            return Err(Error::InvalidData("Dataset has no rows".into()));
        }
        if let Some(col) = numeric.iter().find(|c| c.values.len() != timestamps.len()) {
            return Err(Error::InvalidData(format!(
                "Column '{}' has {} values but the dataset has {} rows",
                col.name,
                col.values.len(),
                timestamps.len()
            )));
        }

        Ok(Self {
            column_names,
            timestamps,
            numeric,
        })
    }

    /// All column names in their original order
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn timestamps(&self) -> &[String] {
        &self.timestamps
    }

    pub fn numeric_columns(&self) -> &[NumericColumn] {
        &self.numeric
    }

    pub fn column(&self, name: &str) -> Option<&NumericColumn> {
        self.numeric.iter().find(|c| c.name == name)
    }

    pub fn row_count(&self) -> usize {
        self.timestamps.len()
    }

    /// First and last timestamp labels
    pub fn time_range(&self) -> (&str, &str) {
        // Construction guarantees at least one row
        let first = self.timestamps.first().map(String::as_str).unwrap_or("");
        let last = self.timestamps.last().map(String::as_str).unwrap_or("");
        (first, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, values: &[f64]) -> NumericColumn {
        NumericColumn::new(name, values.iter().map(|v| Some(*v)).collect())
    }

    #[test]
    fn test_domain_from_str() {
        assert_eq!(
            "temperature".parse::<SensorDomain>().unwrap(),
            SensorDomain::Temperature
        );
        assert_eq!("CO2".parse::<SensorDomain>().unwrap(), SensorDomain::Co2);
        assert_eq!(
            "Radiation".parse::<SensorDomain>().unwrap(),
            SensorDomain::Radiation
        );
        assert!("humidity".parse::<SensorDomain>().is_err());
    }

    #[test]
    fn test_domain_round_trips_through_display() {
        for domain in SensorDomain::all() {
            assert_eq!(domain.to_string().parse::<SensorDomain>().unwrap(), *domain);
        }
    }

    #[test]
    fn test_table_requires_timestamp() {
        let err = DataTable::new(
            vec!["temperature".into()],
            vec!["t0".into()],
            vec![column("temperature", &[1.0])],
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingTimestamp));
    }

    #[test]
    fn test_table_requires_numeric_column() {
        let err = DataTable::new(
            vec!["timestamp".into(), "site".into()],
            vec!["t0".into()],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, Error::NoNumericColumns));
    }

    #[test]
    fn test_table_rejects_ragged_columns() {
        let err = DataTable::new(
            vec!["timestamp".into(), "co2_level".into()],
            vec!["t0".into(), "t1".into()],
            vec![column("co2_level", &[400.0])],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_table_time_range() {
        let table = DataTable::new(
            vec!["timestamp".into(), "co2_level".into()],
            vec!["t0".into(), "t1".into(), "t2".into()],
            vec![column("co2_level", &[400.0, 401.0, 402.0])],
        )
        .unwrap();
        assert_eq!(table.time_range(), ("t0", "t2"));
        assert_eq!(table.row_count(), 3);
        assert!(table.column("co2_level").is_some());
        assert!(table.column("pressure").is_none());
    }
}
