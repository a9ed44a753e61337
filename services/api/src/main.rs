//! API Service - Media Intelligence Dashboard backend
//!
//! Holds one upload session and serves the cleaned data, chart tables and
//! insights to the dashboard frontend.
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /upload?file_name= - Upload a mentions CSV (raw body)
//! - DELETE /upload - Remove the current upload
//! - GET /records?limit= - Cleaned rows of the current upload
//! - GET /dashboard - All five charts with insights
//! - GET /charts/:category - One chart with insights
//! - GET /insights/:category - Insight statements only

use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use pipeline::{ChartCategory, CleaningSummary, MentionRecord, PipelineError, Session};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Upload body cap unless MAX_UPLOAD_BYTES says otherwise.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Clone)]
struct Config {
    bind: String,
    log_level: String,
    max_upload_bytes: usize,
}

impl Config {
    fn from_env() -> Self {
        Self {
            bind: std::env::var("API_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }
}

// ============================================================================
// State
// ============================================================================

struct AppState {
    session: RwLock<Session>,
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    version: &'static str,
}

#[derive(Serialize)]
struct UploadResponse {
    file_name: String,
    uploaded_at: DateTime<Utc>,
    summary: CleaningSummary,
}

#[derive(Serialize)]
struct RecordsResponse<'a> {
    file_name: Option<&'a str>,
    total: usize,
    records: &'a [MentionRecord],
}

#[derive(Serialize)]
struct InsightsResponse {
    category: ChartCategory,
    insights: Vec<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

const NO_UPLOAD_MESSAGE: &str = "Upload a CSV file to see the interactive dashboard.";

// ============================================================================
// Query params
// ============================================================================

#[derive(Deserialize)]
struct UploadQuery {
    file_name: Option<String>,
}

#[derive(Deserialize)]
struct RecordsQuery {
    limit: Option<usize>,
}

// ============================================================================
// Handlers
// ============================================================================

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn upload_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UploadQuery>,
    body: Bytes,
) -> impl IntoResponse {
    let file_name = params
        .file_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "upload.csv".to_string());

    let mut session = state.session.write().await;
    match session.ingest(&file_name, &body) {
        Ok(summary) => Json(UploadResponse {
            file_name,
            uploaded_at: Utc::now(),
            summary,
        })
        .into_response(),
        Err(e) => {
            let status = match e {
                PipelineError::MissingColumns(_) => StatusCode::UNPROCESSABLE_ENTITY,
                PipelineError::Csv(_) | PipelineError::RaggedRow { .. } | PipelineError::Empty => {
                    StatusCode::BAD_REQUEST
                }
            };
            error_response(status, e.to_string())
        }
    }
}

async fn remove_upload_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session.write().await.clear();
    tracing::info!("upload removed");
    StatusCode::NO_CONTENT
}

async fn records_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecordsQuery>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(100).min(1000);
    let session = state.session.read().await;
    let records = session.records().records();

    let response = Json(RecordsResponse {
        file_name: session.file_name(),
        total: records.len(),
        records: &records[..limit.min(records.len())],
    })
    .into_response();
    response
}

async fn dashboard_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let report = state.session.read().await.dashboard();
    match report {
        Some(report) => Json(report).into_response(),
        None => error_response(StatusCode::NOT_FOUND, NO_UPLOAD_MESSAGE),
    }
}

async fn chart_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> impl IntoResponse {
    let category: ChartCategory = match category.parse() {
        Ok(c) => c,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let chart = state.session.read().await.chart(category);
    match chart {
        Some(chart) => Json(chart).into_response(),
        None => error_response(StatusCode::NOT_FOUND, NO_UPLOAD_MESSAGE),
    }
}

async fn insights_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> impl IntoResponse {
    let category: ChartCategory = match category.parse() {
        Ok(c) => c,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let insights = state.session.read().await.insights(category);
    Json(InsightsResponse { category, insights }).into_response()
}

// ============================================================================
// Router
// ============================================================================

fn build_app(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    // CORS for web frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/upload",
            axum::routing::post(upload_handler).delete(remove_upload_handler),
        )
        .route("/records", get(records_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/charts/:category", get(chart_handler))
        .route("/insights/:category", get(insights_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let state = Arc::new(AppState {
        session: RwLock::new(Session::new()),
    });
    let app = build_app(state, config.max_upload_bytes);

    tracing::info!(
        bind = %config.bind,
        max_upload_bytes = config.max_upload_bytes,
        "media intelligence API starting"
    );

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
