//! HTTP request handlers for the analysis service.
//!
//! Implements the article analysis and health check endpoints using axum.

use crate::config::ServerConfig;
use crate::document::{extract_text, DocumentError, DocumentFormat};
use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use newsdesk_analyzer::{Analyzer, AnalyzerError};
use newsdesk_domain::{normalize, AnalysisResult, LlmProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

const MISSING_INPUT: &str = "Either file or text must be provided";
const UNSUPPORTED_FORMAT: &str = "Only .txt and .docx files are supported";
const PROCESSING_FAILED: &str = "An error occurred while processing the article";

/// Shared application state
pub struct AppState<L: LlmProvider> {
    /// Analysis pipeline shared by all requests
    pub analyzer: Arc<Analyzer<L>>,
}

impl<L: LlmProvider> AppState<L> {
    /// Wrap an analyzer for sharing across requests
    pub fn new(analyzer: Analyzer<L>) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

// Derived Clone would require L: Clone
impl<L: LlmProvider> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" while the process is serving
    pub status: String,
    /// Server version
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub detail: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// The request cannot be analyzed as sent
    BadRequest(String),
    /// Something failed on our side; the message is logged, not returned
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                error!("Error analyzing article: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, PROCESSING_FAILED.to_string())
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<AnalyzerError> for AppError {
    fn from(e: AnalyzerError) -> Self {
        match e {
            AnalyzerError::InvalidInput { minimum, .. } => AppError::BadRequest(format!(
                "Article text is too short (minimum {} characters required)",
                minimum
            )),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<DocumentError> for AppError {
    fn from(e: DocumentError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::BadRequest(e.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(e: MultipartRejection) -> Self {
        AppError::BadRequest(e.body_text())
    }
}

struct Upload {
    filename: String,
    bytes: Bytes,
}

#[derive(Default)]
struct Submission {
    file: Option<Upload>,
    text: Option<String>,
}

/// Collect the `file` and `text` parts; other parts are ignored
async fn read_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                // Browsers send an unnamed empty part for an untouched file input
                if !filename.is_empty() {
                    submission.file = Some(Upload { filename, bytes });
                }
            }
            Some("text") => {
                let text = field.text().await?;
                if !text.is_empty() {
                    submission.text = Some(text);
                }
            }
            _ => {}
        }
    }

    Ok(submission)
}

/// POST /analyze - Summarize an article and extract its entities
///
/// Accepts `multipart/form-data` with a `file` part (`.txt` or `.docx`) or
/// a `text` part. The file wins when both are sent.
async fn analyze_article<L>(
    State(state): State<AppState<L>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, AppError>
where
    L: LlmProvider + 'static,
{
    let request_id = Uuid::now_v7();
    let span = info_span!("analyze", %request_id);

    async move {
        let submission = read_submission(multipart?).await?;

        let article = match (submission.file, submission.text) {
            (Some(upload), _) => {
                info!("Processing uploaded file: {}", upload.filename);
                let format = DocumentFormat::from_filename(&upload.filename)
                    .ok_or_else(|| AppError::BadRequest(UNSUPPORTED_FORMAT.to_string()))?;

                let bytes = upload.bytes;
                tokio::task::spawn_blocking(move || extract_text(&bytes, format))
                    .await
                    .map_err(|e| AppError::Internal(format!("Document task failed: {}", e)))??
            }
            (None, Some(text)) => {
                info!("Processing text input");
                normalize(&text)
            }
            (None, None) => return Err(AppError::BadRequest(MISSING_INPUT.to_string())),
        };

        let result = state.analyzer.analyze(&article).await?;
        Ok::<_, AppError>(Json(result))
    }
    .instrument(span)
    .await
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// CORS for the configured origins, with credentials
///
/// A `*` entry echoes back whatever origin asks; a literal wildcard header
/// is not allowed alongside credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|origin| origin.trim() == "*") {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Create the axum router with all routes and middleware
pub fn create_router<L>(state: AppState<L>, config: &ServerConfig) -> Router
where
    L: LlmProvider + 'static,
{
    Router::new()
        .route("/analyze", post(analyze_article::<L>))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
