//! HTTP request handlers for the web service.
//!
//! Serves the upload form and runs the document pipeline over multipart
//! uploads using axum.

use crate::pipeline::{Pipeline, PipelineError, PipelineOutcome};
use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use glr_domain::CompletionProvider;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use tokio::task;

/// MIME type for DOCX downloads
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Fixed name and disposition offered for the filled document
const DOWNLOAD_DISPOSITION: &str = "attachment; filename=\"filled_report.docx\"";

/// Response header set when fallback data replaced extracted values
pub const FALLBACK_HEADER: &str = "x-fallback-data";

/// Uploads larger than this are rejected before the pipeline runs
const UPLOAD_LIMIT_BYTES: usize = 32 * 1024 * 1024;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>GLR Pipeline App</title>
</head>
<body>
    <h1>GLR Pipeline - Auto Fill Insurance Report</h1>
    <form action="/process" method="post" enctype="multipart/form-data">
        <p>
            <label for="template">Upload Template (.docx)</label><br>
            <input id="template" type="file" name="template" accept=".docx">
        </p>
        <p>
            <label for="reports">Upload Photo Reports (.pdf)</label><br>
            <input id="reports" type="file" name="reports" accept=".pdf" multiple>
        </p>
        <p><button type="submit">Process</button></p>
    </form>
</body>
</html>
"#;

/// Shared application state
pub struct AppState<P> {
    pipeline: Arc<Pipeline<P>>,
}

impl<P> AppState<P>
where
    P: CompletionProvider,
    P::Error: Display,
{
    /// Create application state around a completion provider.
    pub fn new(provider: P) -> Self {
        AppState {
            pipeline: Arc::new(Pipeline::new(provider)),
        }
    }
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        AppState {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall service status
    pub status: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Pipeline run failed
    Pipeline(PipelineError),
    /// The multipart upload could not be read
    Upload(String),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Pipeline(e @ PipelineError::MissingInput) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Pipeline(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            AppError::Upload(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        AppError::Pipeline(e)
    }
}

/// GET / - Upload form
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health - Service health
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
    })
}

/// POST /process - Run the pipeline over an uploaded template and reports
///
/// Responds with the filled document as a DOCX attachment. When fallback
/// data replaced extracted values the response carries an
/// `x-fallback-data: true` header.
async fn process_upload<P>(
    State(state): State<AppState<P>>,
    mut multipart: Multipart,
) -> Result<Response, AppError>
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: Display,
{
    let mut template: Option<Vec<u8>> = None;
    let mut reports: Vec<Vec<u8>> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        // A submitted form with no file chosen still sends an empty part.
        if data.is_empty() {
            continue;
        }

        match name.as_deref() {
            Some("template") => template = Some(data.to_vec()),
            Some("reports") => reports.push(data.to_vec()),
            _ => {}
        }
    }

    // The provider uses a blocking HTTP client, so the whole run moves off
    // the async runtime.
    let pipeline = Arc::clone(&state.pipeline);
    let outcome = task::spawn_blocking(move || pipeline.run(template, &reports))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    download_response(outcome)
}

/// Build the download response for a filled document.
fn download_response(outcome: PipelineOutcome) -> Result<Response, AppError> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, DOCX_MIME)
        .header(header::CONTENT_DISPOSITION, DOWNLOAD_DISPOSITION);

    if outcome.used_fallback {
        builder = builder.header(FALLBACK_HEADER, "true");
    }

    builder
        .body(Body::from(outcome.document))
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Create the axum router with all routes
pub fn create_router<P>(state: AppState<P>) -> AxumRouter
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: Display,
{
    AxumRouter::new()
        .route("/", get(index))
        .route("/process", post(process_upload::<P>))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES))
        .with_state(state)
}
