use completion::CompletionError;
use provider::ProviderError;
use std::fmt;
use thiserror::Error;

/// Pipeline stage a failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolveId,
    FetchMetadata,
    CollectComments,
    BuildRequest,
    CallModel,
    ExtractValidate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ResolveId => "resolve_id",
            Stage::FetchMetadata => "fetch_metadata",
            Stage::CollectComments => "collect_comments",
            Stage::BuildRequest => "build_request",
            Stage::CallModel => "call_model",
            Stage::ExtractValidate => "extract_validate",
        };
        f.write_str(name)
    }
}

/// Coarse failure classes, one per caller-visible outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    NotFound,
    Upstream,
    Parse,
    Schema,
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("URL is required")]
    MissingUrl,
    #[error("no video identifier in {0:?}")]
    InvalidUrl(String),
    #[error("video {0} not found")]
    VideoNotFound(String),
    #[error("no comments found for video {0}")]
    NoComments(String),
    #[error("video provider: {0}")]
    Provider(#[from] ProviderError),
    #[error("completion service: {0}")]
    Completion(#[from] CompletionError),
    #[error("model reply is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("model reply does not match the analysis schema: {0}")]
    Schema(#[source] serde_json::Error),
}

impl AnalyzeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalyzeError::MissingUrl | AnalyzeError::InvalidUrl(_) => ErrorKind::Input,
            AnalyzeError::VideoNotFound(_) | AnalyzeError::NoComments(_) => ErrorKind::NotFound,
            AnalyzeError::Provider(_) | AnalyzeError::Completion(_) => ErrorKind::Upstream,
            AnalyzeError::Parse(_) => ErrorKind::Parse,
            AnalyzeError::Schema(_) => ErrorKind::Schema,
        }
    }
}

/// Terminal failure of a pipeline run
#[derive(Debug, Error)]
#[error("{stage} failed: {error}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub error: AnalyzeError,
}

impl PipelineError {
    pub fn new(stage: Stage, error: AnalyzeError) -> Self {
        Self { stage, error }
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

/// Tags a stage result with the stage it came from
pub(crate) trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, PipelineError>;
}

impl<T> AtStage<T> for Result<T, AnalyzeError> {
    fn at(self, stage: Stage) -> Result<T, PipelineError> {
        self.map_err(|error| PipelineError::new(stage, error))
    }
}
