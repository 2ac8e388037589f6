use serde::{Deserialize, Serialize};

/// Identifies a video on the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoReference {
    pub id: String,
}

impl VideoReference {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Video snippet and statistics.
/// Counters stay decimal strings, as the provider sends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub published_at: String,
    pub view_count: String,
    pub like_count: String,
    pub comment_count: String,
}

/// A top-level comment on a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub author_name: String,
    pub published_at: String,
    pub like_count: u64,
    pub reply_count: u64,
}

/// Overall tone of the comment section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AverageSentiment {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

/// Tone of a single theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Three-step scale shared by engagement, severity and interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoIdeaType {
    #[serde(rename = "FAQ")]
    Faq,
    Tutorial,
    #[serde(rename = "Deep Dive")]
    DeepDive,
    #[serde(rename = "Problem Solving")]
    ProblemSolving,
    Explanation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_comments: f64,
    pub average_sentiment: AverageSentiment,
    pub engagement_level: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    pub frequency: f64,
    pub sentiment: Sentiment,
    pub example_comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub frequency: f64,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PainPoint {
    pub issue: String,
    pub severity: Level,
    pub frequency: f64,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRequest {
    pub topic: String,
    pub demand: f64,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Misconception {
    pub misconception: String,
    pub clarification: String,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoIdea {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub idea_type: VideoIdeaType,
    pub estimated_interest: Level,
    pub reasoning: String,
}

/// Structured content-strategy report produced from a comment section.
///
/// Deserializing into this type is the schema check: every field is
/// required, every list must be a list and every enumerated field must
/// hold one of its literal values. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: AnalysisSummary,
    pub themes: Vec<Theme>,
    pub questions: Vec<Question>,
    pub pain_points: Vec<PainPoint>,
    pub content_requests: Vec<ContentRequest>,
    pub misconceptions: Vec<Misconception>,
    pub video_ideas: Vec<VideoIdea>,
}

/// Successful outcome of one analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub video_info: VideoMetadata,
    pub analysis: AnalysisResult,
    pub comment_count: usize,
}
