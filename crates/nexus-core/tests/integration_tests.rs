//! Integration tests for nexus-core
//!
//! These tests exercise the full generate/load → digest → insight → history
//! workflow through the public API.

use std::io::Write;

use chrono::NaiveDate;
use nexus_core::{
    charts::correlation_matrix,
    generator::generate,
    import::{load_csv, parse_csv},
    stats::describe,
    Analyst, DataDigest, DatasetView, Error, InsightClient, InsightOutcome, InsightStatus,
    MockBackend, PromptLibrary, SensorDomain, SessionHistory,
};

fn greenhouse_csv() -> &'static str {
    "timestamp,temperature,humidity,zone\n\
     2025-03-14 00:00:00,24.1,64.0,rainforest\n\
     2025-03-14 01:00:00,24.8,,rainforest\n\
     2025-03-14 02:00:00,25.6,66.5,ocean\n\
     2025-03-14 03:00:00,26.2,67.1,ocean\n"
}

// =============================================================================
// Sample data
// =============================================================================

#[test]
fn test_generated_sample_digest() {
    let now = NaiveDate::from_ymd_opt(2025, 3, 14)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let table = generate(SensorDomain::Co2, now).into_table();

    let digest = DataDigest::from_table(&table);
    assert_eq!(digest.first_timestamp, "2025-03-13 12:00:00");
    assert_eq!(digest.last_timestamp, "2025-03-14 11:00:00");
    assert_eq!(digest.parameters, vec!["timestamp", "co2_level", "pressure"]);

    let text = digest.render();
    assert!(text.starts_with("Dataset Summary:\n- Time range: 2025-03-13 12:00:00 to 2025-03-14 11:00:00"));
    assert!(text.contains("co2_level"));
    assert!(text.contains("count"));
}

#[test]
fn test_every_domain_charts() {
    for domain in SensorDomain::all() {
        let table = generate(*domain, chrono::Local::now().naive_local()).into_table();
        let view = DatasetView::sample(*domain, &table);
        assert_eq!(view.rows, 24);
        assert_eq!(view.series.len(), 2);
        assert!(view.correlation.is_some());
    }
}

// =============================================================================
// Uploaded data
// =============================================================================

#[test]
fn test_uploaded_csv_statistics() {
    let table = parse_csv(greenhouse_csv().as_bytes()).unwrap();

    assert_eq!(
        table.column_names(),
        &["timestamp", "temperature", "humidity", "zone"]
    );
    let stats = describe(&table);
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].count, 4);
    assert_eq!(stats[1].count, 3);

    let matrix = correlation_matrix(&table).unwrap();
    assert_eq!(matrix.columns, vec!["temperature", "humidity"]);
}

#[test]
fn test_load_csv_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(greenhouse_csv().as_bytes()).unwrap();

    let table = load_csv(file.path()).unwrap();
    assert_eq!(table.row_count(), 4);
    assert_eq!(table.time_range(), ("2025-03-14 00:00:00", "2025-03-14 03:00:00"));
}

#[test]
fn test_schema_errors() {
    let no_timestamp = parse_csv("time,temperature\n1,2\n".as_bytes()).unwrap_err();
    assert!(matches!(no_timestamp, Error::MissingTimestamp));
    assert!(no_timestamp.is_schema_error());

    let no_numeric = parse_csv("timestamp,zone\nt0,ocean\n".as_bytes()).unwrap_err();
    assert!(matches!(no_numeric, Error::NoNumericColumns));
}

// =============================================================================
// Insight workflow
// =============================================================================

#[tokio::test]
async fn test_session_workflow_with_mock_backend() {
    let analyst = Analyst::new(InsightClient::mock(), PromptLibrary::embedded_only());
    let mut history = SessionHistory::new();

    let upload = parse_csv(greenhouse_csv().as_bytes()).unwrap();
    let record = analyst.analyze(&upload, &mut history).await.unwrap();
    assert_eq!(record.status, InsightStatus::Success);
    assert!(record
        .content
        .contains("timestamp, temperature, humidity, zone"));

    let sample = generate(SensorDomain::Radiation, chrono::Local::now().naive_local()).into_table();
    analyst.analyze(&sample, &mut history).await.unwrap();

    let ids: Vec<usize> = history.newest_first().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn test_empty_outcome_recorded_with_placeholder() {
    let analyst = Analyst::new(
        InsightClient::Mock(MockBackend::with_outcome(InsightOutcome::Empty)),
        PromptLibrary::embedded_only(),
    );
    let mut history = SessionHistory::new();
    let table = parse_csv(greenhouse_csv().as_bytes()).unwrap();

    let record = analyst.analyze(&table, &mut history).await.unwrap();
    assert_eq!(record.content, "⚠️ No summary generated.");
    assert_eq!(record.status, InsightStatus::Empty);
}
