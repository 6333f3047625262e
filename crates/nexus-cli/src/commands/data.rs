//! Sample generation and dataset description commands

use std::io::{self, Write};

use anyhow::Result;
use nexus_core::{
    charts::{correlation_matrix, CORRELATION_TITLE},
    generator::generate_now,
    models::TIMESTAMP_FORMAT,
    DataDigest, SensorDomain, SensorSeries,
};
use serde_json::{Map, Value};

use super::load_table;
use crate::cli::{DataSource, OutputFormat};

/// Generate and print a 24 hour sample
pub fn cmd_sample(domain: SensorDomain, format: OutputFormat) -> Result<()> {
    let series = generate_now(domain);
    let stdout = io::stdout();
    write_sample(&mut stdout.lock(), &series, format)
}

/// Write a generated series in the requested format
pub fn write_sample<W: Write>(out: &mut W, series: &SensorSeries, format: OutputFormat) -> Result<()> {
    let (primary, secondary) = series.domain.columns();

    match format {
        OutputFormat::Table => {
            writeln!(out, "{} Data (last 24 hours)\n", series.domain.label())?;
            writeln!(out, "{:<20} {:>16} {:>16}", "timestamp", primary, secondary)?;
            writeln!(out, "{}", "-".repeat(54))?;
            for reading in &series.readings {
                writeln!(
                    out,
                    "{:<20} {:>16.2} {:>16.2}",
                    reading.timestamp.format(TIMESTAMP_FORMAT),
                    reading.primary,
                    reading.secondary
                )?;
            }
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(["timestamp", primary, secondary])?;
            for reading in &series.readings {
                writer.write_record([
                    reading.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                    reading.primary.to_string(),
                    reading.secondary.to_string(),
                ])?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            let rows: Vec<Value> = series
                .readings
                .iter()
                .map(|reading| {
                    let mut row = Map::new();
                    row.insert(
                        "timestamp".into(),
                        reading.timestamp.format(TIMESTAMP_FORMAT).to_string().into(),
                    );
                    row.insert(primary.into(), reading.primary.into());
                    row.insert(secondary.into(), reading.secondary.into());
                    Value::Object(row)
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

/// Print the digest the model would see, plus correlations
pub fn cmd_describe(source: &DataSource) -> Result<()> {
    let table = load_table(source)?;
    let digest = DataDigest::from_table(&table);

    println!("📊 {}\n", digest);

    match correlation_matrix(&table) {
        Some(matrix) => {
            println!("{}:\n", CORRELATION_TITLE);
            println!("{}", matrix.render());
        }
        None => println!("(correlations need at least two numeric columns)"),
    }

    Ok(())
}
