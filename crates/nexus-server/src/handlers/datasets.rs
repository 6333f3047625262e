//! Sample and uploaded dataset views

use axum::{extract::Path, Json};
use tracing::info;

use crate::AppError;
use nexus_core::{generator::generate_now, import::parse_csv, DatasetView, SensorDomain};

/// GET /api/samples/:domain - Generate a fresh 24 hour sample
pub async fn get_sample(Path(domain): Path<String>) -> Result<Json<DatasetView>, AppError> {
    let domain: SensorDomain = domain.parse().map_err(|e: String| AppError::bad_request(&e))?;
    let table = generate_now(domain).into_table();
    Ok(Json(DatasetView::sample(domain, &table)))
}

/// POST /api/datasets - Summarize an uploaded CSV (raw body)
pub async fn upload_dataset(body: String) -> Result<Json<DatasetView>, AppError> {
    if body.trim().is_empty() {
        return Err(AppError::bad_request("Request body must contain CSV data"));
    }

    let table = parse_csv(body.as_bytes()).map_err(AppError::from_core)?;
    info!(rows = table.row_count(), "Dataset uploaded");

    Ok(Json(DatasetView::upload(&table)))
}
