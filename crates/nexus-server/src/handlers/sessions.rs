//! Session and analysis history handlers
//!
//! Every session owns its own history. The model call happens outside the
//! session lock so a slow model never blocks other sessions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::{AppError, AppState};
use nexus_core::{
    generator::generate_now, import::parse_csv, AnalysisRecord, InsightOutcome, SensorDomain,
    SessionHistory,
};

/// In-memory session histories keyed by session id
#[derive(Default)]
pub struct SessionStore {
    next_id: AtomicU64,
    sessions: RwLock<HashMap<u64, SessionHistory>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with an empty history and return its id
    pub async fn create(&self) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.sessions.write().await.insert(id, SessionHistory::new());
        id
    }

    pub async fn exists(&self, id: u64) -> bool {
        self.sessions.read().await.contains_key(&id)
    }

    /// Records newest first, `None` for an unknown session
    pub async fn records(&self, id: u64) -> Option<Vec<AnalysisRecord>> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .map(|history| history.newest_first().cloned().collect())
    }

    /// End a session and drop its history; `false` for an unknown session
    pub async fn remove(&self, id: u64) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn append(&self, id: u64, outcome: &InsightOutcome) -> Option<AnalysisRecord> {
        let mut sessions = self.sessions.write().await;
        sessions
            .get_mut(&id)
            .map(|history| history.append(outcome).clone())
    }
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub id: u64,
}

/// POST /api/sessions - Start a new session
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SessionCreated>) {
    let id = state.sessions.create().await;
    info!(session = id, "Session started");
    (StatusCode::CREATED, Json(SessionCreated { id }))
}

/// DELETE /api/sessions/:id - End a session and discard its history
pub async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(session_not_found(id));
    }
    info!(session = id, "Session ended");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/sessions/:id/analyses - History, newest first
pub async fn list_analyses(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<AnalysisRecord>>, AppError> {
    state
        .sessions
        .records(id)
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    /// Analyze a fresh sample of this domain instead of the request body
    pub domain: Option<String>,
}

/// POST /api/sessions/:id/analyses - Request an insight and record it
pub async fn create_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Query(params): Query<AnalysisQuery>,
    body: String,
) -> Result<Json<AnalysisRecord>, AppError> {
    if !state.sessions.exists(id).await {
        return Err(session_not_found(id));
    }

    let table = match params.domain.as_deref() {
        Some(domain) => {
            let domain: SensorDomain =
                domain.parse().map_err(|e: String| AppError::bad_request(&e))?;
            generate_now(domain).into_table()
        }
        None if body.trim().is_empty() => {
            return Err(AppError::bad_request(
                "Provide CSV data in the request body or a ?domain= sample",
            ))
        }
        None => parse_csv(body.as_bytes()).map_err(AppError::from_core)?,
    };

    let outcome = state
        .analyst
        .request_insight(&table)
        .await
        .map_err(AppError::from_core)?;

    let record = state
        .sessions
        .append(id, &outcome)
        .await
        .ok_or_else(|| session_not_found(id))?;

    info!(
        session = id,
        analysis = record.id,
        status = %record.status,
        "Analysis recorded"
    );

    Ok(Json(record))
}

fn session_not_found(id: u64) -> AppError {
    AppError::not_found(&format!("Session {} not found", id))
}
