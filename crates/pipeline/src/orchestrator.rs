use crate::collector::collect_comments;
use crate::error::{AnalyzeError, AtStage, PipelineError, Stage};
use crate::extract::extract_analysis;
use crate::metadata::fetch_metadata;
use crate::prompt::build_request;
use crate::resolver::resolve_video_id;
use completion::CompletionService;
use domain::AnalysisReport;
use provider::VideoProvider;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Comment sample size used unless configured otherwise
pub const DEFAULT_MAX_COMMENTS: usize = 200;

/// Runs the analysis pipeline for one URL at a time.
///
/// Holds only shared, read-only handles to its collaborators, so one
/// instance can serve concurrent requests. Every run owns its own comment
/// list and prompt.
#[derive(Clone)]
pub struct Analyzer {
    provider: Arc<dyn VideoProvider>,
    completion: Arc<dyn CompletionService>,
    max_comments: usize,
}

impl Analyzer {
    pub fn new(provider: Arc<dyn VideoProvider>, completion: Arc<dyn CompletionService>) -> Self {
        Self {
            provider,
            completion,
            max_comments: DEFAULT_MAX_COMMENTS,
        }
    }

    pub fn with_max_comments(mut self, max_comments: NonZeroUsize) -> Self {
        self.max_comments = max_comments.get();
        self
    }

    pub fn max_comments(&self) -> usize {
        self.max_comments
    }

    pub async fn analyze(&self, url: Option<&str>) -> Result<AnalysisReport, PipelineError> {
        let start = std::time::Instant::now();

        let url = url
            .filter(|u| !u.is_empty())
            .ok_or(AnalyzeError::MissingUrl)
            .at(Stage::ResolveId)?;
        let video = resolve_video_id(url)
            .ok_or_else(|| AnalyzeError::InvalidUrl(url.to_string()))
            .at(Stage::ResolveId)?;
        debug!("Resolved video id - url={}, id={}", url, video.id);

        let video_info = fetch_metadata(self.provider.as_ref(), &video)
            .await
            .at(Stage::FetchMetadata)?;

        let comments = collect_comments(self.provider.as_ref(), &video, self.max_comments)
            .await
            .at(Stage::CollectComments)?;
        if comments.is_empty() {
            warn!("No comments found - id={}", video.id);
            return Err(PipelineError::new(
                Stage::CollectComments,
                AnalyzeError::NoComments(video.id.clone()),
            ));
        }

        let request = build_request(&comments);
        debug!(
            "Built analysis request - comments={}, prompt_length={} chars",
            comments.len(),
            request.messages.iter().map(|m| m.content.len()).sum::<usize>()
        );

        let reply = self
            .completion
            .complete(&request)
            .await
            .map_err(AnalyzeError::from)
            .at(Stage::CallModel)?;

        let analysis = extract_analysis(&reply).at(Stage::ExtractValidate)?;

        info!(
            "Analysis completed - id={}, comments={}, themes={}, video_ideas={}, duration={:.2}s",
            video.id,
            comments.len(),
            analysis.themes.len(),
            analysis.video_ideas.len(),
            start.elapsed().as_secs_f32()
        );

        Ok(AnalysisReport {
            video_info,
            analysis,
            comment_count: comments.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use async_trait::async_trait;
    use completion::{CompletionError, CompletionRequest};
    use domain::{Comment, VideoMetadata};
    use provider::{CommentThreadPage, InMemoryProvider, ProviderError};
    use std::sync::Mutex;

    const WELL_FORMED: &str = r#"{
        "summary": {"totalComments": 3, "averageSentiment": "positive", "engagementLevel": "medium"},
        "themes": [],
        "questions": [],
        "painPoints": [],
        "contentRequests": [],
        "misconceptions": [],
        "videoIdeas": []
    }"#;

    struct ScriptedCompletion {
        reply: Result<String, ()>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedCompletion {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedCompletion {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
            self.requests.lock().unwrap().push(request.clone());
            self.reply.clone().map_err(|_| CompletionError::EmptyReply)
        }
    }

    fn provider_with_comments(count: usize) -> Arc<InMemoryProvider> {
        let provider = InMemoryProvider::new();
        provider.add_video(VideoMetadata {
            id: "abc123".to_string(),
            title: "Demo".to_string(),
            description: String::new(),
            published_at: String::new(),
            view_count: "0".to_string(),
            like_count: "0".to_string(),
            comment_count: count.to_string(),
        });
        for i in 0..count {
            provider.add_comment(
                "abc123",
                Comment {
                    id: format!("t{}", i),
                    text: format!("comment {}", i),
                    author_name: String::new(),
                    published_at: String::new(),
                    like_count: 0,
                    reply_count: 0,
                },
            );
        }
        Arc::new(provider)
    }

    #[tokio::test]
    async fn successful_run_returns_report() {
        let provider = provider_with_comments(3);
        let completion = ScriptedCompletion::replying(WELL_FORMED);
        let analyzer = Analyzer::new(provider.clone(), completion.clone());

        let report = analyzer
            .analyze(Some("https://youtu.be/abc123"))
            .await
            .unwrap();

        assert_eq!(report.video_info.title, "Demo");
        assert_eq!(report.comment_count, 3);
        assert_eq!(report.analysis.summary.total_comments, 3.0);
        assert_eq!(completion.calls(), 1);
        let requests = completion.requests.lock().unwrap();
        assert!(requests[0].messages[1].content.contains("comment 0\n---\ncomment 1"));
    }

    #[tokio::test]
    async fn missing_url_is_input_error() {
        let provider = provider_with_comments(3);
        let analyzer = Analyzer::new(provider.clone(), ScriptedCompletion::replying(WELL_FORMED));

        for url in [None, Some("")] {
            let err = analyzer.analyze(url).await.unwrap_err();
            assert_eq!(err.stage, Stage::ResolveId);
            assert!(matches!(err.error, AnalyzeError::MissingUrl));
        }
        assert_eq!(provider.request_count(), 0);
    }

    #[tokio::test]
    async fn unrecognised_url_makes_no_calls() {
        let provider = provider_with_comments(3);
        let completion = ScriptedCompletion::replying(WELL_FORMED);
        let analyzer = Analyzer::new(provider.clone(), completion.clone());

        let err = analyzer.analyze(Some("not a url")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Input);
        assert_eq!(provider.request_count(), 0);
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_video_stops_before_comments() {
        let provider = provider_with_comments(3);
        let analyzer = Analyzer::new(provider.clone(), ScriptedCompletion::replying(WELL_FORMED));

        let err = analyzer
            .analyze(Some("https://youtu.be/other"))
            .await
            .unwrap_err();

        assert_eq!(err.stage, Stage::FetchMetadata);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(provider.request_count(), 1);
    }

    #[tokio::test]
    async fn no_comments_skips_model_call() {
        let provider = provider_with_comments(0);
        let completion = ScriptedCompletion::replying(WELL_FORMED);
        let analyzer = Analyzer::new(provider, completion.clone());

        let err = analyzer
            .analyze(Some("https://youtu.be/abc123"))
            .await
            .unwrap_err();

        assert_eq!(err.stage, Stage::CollectComments);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn model_failure_is_upstream() {
        let analyzer = Analyzer::new(provider_with_comments(3), ScriptedCompletion::failing());

        let err = analyzer
            .analyze(Some("https://youtu.be/abc123"))
            .await
            .unwrap_err();

        assert_eq!(err.stage, Stage::CallModel);
        assert_eq!(err.kind(), ErrorKind::Upstream);
    }

    #[tokio::test]
    async fn malformed_reply_fails_extraction() {
        let analyzer = Analyzer::new(
            provider_with_comments(3),
            ScriptedCompletion::replying("Sure! Here are some thoughts."),
        );
        let err = analyzer
            .analyze(Some("https://youtu.be/abc123"))
            .await
            .unwrap_err();
        assert_eq!(err.stage, Stage::ExtractValidate);
        assert_eq!(err.kind(), ErrorKind::Parse);

        let analyzer = Analyzer::new(
            provider_with_comments(3),
            ScriptedCompletion::replying(r#"{"summary": {"totalComments": 3}}"#),
        );
        let err = analyzer
            .analyze(Some("https://youtu.be/abc123"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[tokio::test]
    async fn respects_configured_comment_bound() {
        let provider = provider_with_comments(30);
        let completion = ScriptedCompletion::replying(WELL_FORMED);
        let analyzer = Analyzer::new(provider.clone(), completion.clone())
            .with_max_comments(NonZeroUsize::new(10).unwrap());

        let report = analyzer
            .analyze(Some("https://www.youtube.com/watch?v=abc123"))
            .await
            .unwrap();

        assert_eq!(report.comment_count, 10);
        assert!(provider.request_count() >= 2);
        let requests = completion.requests.lock().unwrap();
        assert!(requests[0].messages[1].content.contains(r#""totalComments": 10,"#));
    }

    #[tokio::test]
    async fn smallest_bound_still_collects_a_comment() {
        let provider = provider_with_comments(5);
        let analyzer = Analyzer::new(provider, ScriptedCompletion::replying(WELL_FORMED))
            .with_max_comments(NonZeroUsize::MIN);

        let report = analyzer
            .analyze(Some("https://youtu.be/abc123"))
            .await
            .unwrap();

        assert_eq!(report.comment_count, 1);
    }

    /// Provider that fails on one of its two calls.
    struct Unavailable {
        metadata_fails: bool,
        inner: InMemoryProvider,
    }

    impl Unavailable {
        fn outage() -> ProviderError {
            ProviderError::Status {
                status: 503,
                message: "backend unavailable".to_string(),
            }
        }
    }

    #[async_trait]
    impl VideoProvider for Unavailable {
        async fn get_video_info(
            &self,
            video: &domain::VideoReference,
        ) -> Result<Option<VideoMetadata>, ProviderError> {
            if self.metadata_fails {
                return Err(Self::outage());
            }
            self.inner.get_video_info(video).await
        }

        async fn list_comment_threads(
            &self,
            _video: &domain::VideoReference,
            _page_size: u32,
            _page_token: Option<&str>,
        ) -> Result<CommentThreadPage, ProviderError> {
            Err(Self::outage())
        }
    }

    #[tokio::test]
    async fn metadata_failure_is_upstream_not_missing() {
        let provider = Arc::new(Unavailable {
            metadata_fails: true,
            inner: InMemoryProvider::new(),
        });
        let completion = ScriptedCompletion::replying(WELL_FORMED);
        let analyzer = Analyzer::new(provider, completion.clone());

        let err = analyzer
            .analyze(Some("https://youtu.be/abc123"))
            .await
            .unwrap_err();

        assert_eq!(err.stage, Stage::FetchMetadata);
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert!(matches!(
            err.error,
            AnalyzeError::Provider(ProviderError::Status { status: 503, .. })
        ));
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn comment_page_failure_is_upstream() {
        let inner = InMemoryProvider::new();
        inner.add_video(VideoMetadata {
            id: "abc123".to_string(),
            title: "Demo".to_string(),
            description: String::new(),
            published_at: String::new(),
            view_count: "0".to_string(),
            like_count: "0".to_string(),
            comment_count: "3".to_string(),
        });
        let provider = Arc::new(Unavailable {
            metadata_fails: false,
            inner,
        });
        let completion = ScriptedCompletion::replying(WELL_FORMED);
        let analyzer = Analyzer::new(provider, completion.clone());

        let err = analyzer
            .analyze(Some("https://youtu.be/abc123"))
            .await
            .unwrap_err();

        assert_eq!(err.stage, Stage::CollectComments);
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(completion.calls(), 0);
    }
}
