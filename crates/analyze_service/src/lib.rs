use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use domain::AnalysisReport;
use pipeline::{AnalyzeError, Analyzer, ErrorKind, PipelineError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

/// Request body for analysing a video's comments
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Failure of an analyze call as seen by HTTP clients
#[derive(Debug)]
pub enum ApiError {
    InvalidBody(JsonRejection),
    Pipeline(PipelineError),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidBody(_) => (StatusCode::BAD_REQUEST, "Invalid request body"),
            ApiError::Pipeline(err) => match (&err.error, err.kind()) {
                (AnalyzeError::MissingUrl, _) => (StatusCode::BAD_REQUEST, "URL is required"),
                (_, ErrorKind::Input) => (StatusCode::BAD_REQUEST, "Invalid YouTube URL"),
                (AnalyzeError::NoComments(_), _) => (StatusCode::NOT_FOUND, "No comments found"),
                (_, ErrorKind::NotFound) => (StatusCode::NOT_FOUND, "Video not found"),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to analyze comments",
                ),
            },
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        ApiError::Pipeline(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        match &self {
            ApiError::InvalidBody(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
            }
            ApiError::Pipeline(err) if status.is_server_error() => {
                error!(stage = %err.stage, kind = ?err.kind(), "Analysis error: {}", err);
            }
            ApiError::Pipeline(err) => {
                info!(stage = %err.stage, kind = ?err.kind(), "Analysis rejected: {}", err);
            }
        }

        let body = ErrorResponse {
            error: message.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handler for running the comment analysis pipeline
async fn analyze(
    State(analyzer): State<Arc<Analyzer>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let span = info_span!("analyze", request_id = %Uuid::new_v4());

    async move {
        let Json(request) = payload.map_err(ApiError::InvalidBody)?;
        info!("Analyze request received - url={:?}", request.url);

        let report = analyzer.analyze(request.url.as_deref()).await?;
        Ok::<_, ApiError>(Json(report))
    }
    .instrument(span)
    .await
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}

/// Create the router for the analysis API
pub fn create_router(analyzer: Arc<Analyzer>) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/health", get(health))
        .with_state(analyzer)
}
