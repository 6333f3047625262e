//! Nexus Web Server
//!
//! Axum-based JSON API for the Nexus digital twin dashboard.
//!
//! - Sample data and uploaded CSV views (series, correlations, statistics)
//! - Per-session insight history backed by a local Ollama model
//! - Restrictive CORS policy and upload size limits
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use nexus_core::{Analyst, InsightBackend, InsightClient, InsightConfig, PromptLibrary};

mod handlers;

pub use handlers::SessionStore;

/// Maximum CSV upload size (10 MB)
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// Model connection settings
    pub insight: InsightConfig,
}

/// Shared application state
pub struct AppState {
    pub analyst: Analyst,
    pub config: ServerConfig,
    pub sessions: SessionStore,
}

/// Create the application router
pub fn create_router(analyst: Analyst, static_dir: Option<&str>, config: ServerConfig) -> Router {
    info!(
        "AI backend configured: {} at {} (model: {})",
        analyst.client().backend_name(),
        analyst.client().host(),
        analyst.client().model()
    );

    let state = Arc::new(AppState {
        analyst,
        config: config.clone(),
        sessions: SessionStore::new(),
    });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/ollama/status", get(handlers::ollama_status))
        // Datasets
        .route("/samples/:domain", get(handlers::get_sample))
        .route("/datasets", post(handlers::upload_dataset))
        // Sessions
        .route("/sessions", post(handlers::create_session))
        .route("/sessions/:id", delete(handlers::end_session))
        .route(
            "/sessions/:id/analyses",
            get(handlers::list_analyses).post(handlers::create_analysis),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server with the default prompt library
pub async fn serve(
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let client = InsightClient::from_config(&config.insight)?;

    // Check Ollama connection
    check_ai_connection(&client).await;

    let analyst = Analyst::new(client, PromptLibrary::new());
    let app = create_router(analyst, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log AI backend connection status
async fn check_ai_connection(client: &InsightClient) {
    if client.health_check().await {
        info!(
            "✅ AI backend connected: {} (model: {})",
            client.host(),
            client.model()
        );
    } else {
        warn!(
            "⚠️  AI backend not responding: {} (start it with: ollama run {})",
            client.host(),
            client.model()
        );
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error: bad user data is a 400, the rest stays internal
    pub fn from_core(err: nexus_core::Error) -> Self {
        if err.is_schema_error() {
            Self::bad_request(&err.to_string())
        } else if let nexus_core::Error::NotFound(what) = &err {
            Self::not_found(what)
        } else {
            Self::from(err)
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
