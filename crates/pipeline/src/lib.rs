//! Turns a video URL into a content-strategy report.
//!
//! Stages run strictly in order: resolve the video id, fetch metadata,
//! collect a bounded sample of top-level comments, build the completion
//! request, call the model, then extract and validate its JSON reply.
//! The first failing stage ends the run.

pub mod collector;
pub mod error;
pub mod extract;
pub mod metadata;
pub mod orchestrator;
pub mod prompt;
pub mod resolver;

pub use error::{AnalyzeError, ErrorKind, PipelineError, Stage};
pub use orchestrator::{Analyzer, DEFAULT_MAX_COMMENTS};
pub use resolver::resolve_video_id;
