use async_trait::async_trait;
use domain::{Comment, VideoMetadata, VideoReference};
use provider::{CommentThreadPage, ProviderError, VideoProvider};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// Connection settings for the YouTube Data API
#[derive(Debug, Clone)]
pub struct YouTubeClientConfig {
    pub api_key: String,
    pub base_url: String,
}

impl YouTubeClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideosListResponse {
    #[serde(default)]
    items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct Video {
    snippet: Option<VideoSnippet>,
    statistics: Option<VideoStatistics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSnippet {
    published_at: Option<String>,
    title: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    view_count: Option<String>,
    like_count: Option<String>,
    comment_count: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadListResponse {
    next_page_token: Option<String>,
    #[serde(default)]
    items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
struct CommentThread {
    id: Option<String>,
    snippet: Option<CommentThreadSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadSnippet {
    top_level_comment: Option<TopLevelComment>,
    total_reply_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    snippet: Option<CommentSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    text_display: Option<String>,
    author_display_name: Option<String>,
    published_at: Option<String>,
    like_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl Video {
    fn into_metadata(self, id: &str) -> VideoMetadata {
        let snippet = self.snippet.unwrap_or_default();
        let statistics = self.statistics.unwrap_or_default();
        VideoMetadata {
            id: id.to_string(),
            title: snippet.title.unwrap_or_default(),
            description: snippet.description.unwrap_or_default(),
            published_at: snippet.published_at.unwrap_or_default(),
            view_count: statistics.view_count.unwrap_or_else(|| "0".to_string()),
            like_count: statistics.like_count.unwrap_or_else(|| "0".to_string()),
            comment_count: statistics.comment_count.unwrap_or_else(|| "0".to_string()),
        }
    }
}

impl CommentThread {
    /// Threads without a top-level comment carry nothing to analyse
    fn into_comment(self) -> Option<Comment> {
        let snippet = self.snippet?;
        let comment = snippet.top_level_comment?.snippet?;
        Some(Comment {
            id: self.id.unwrap_or_default(),
            text: comment.text_display.unwrap_or_default(),
            author_name: comment.author_display_name.unwrap_or_default(),
            published_at: comment.published_at.unwrap_or_default(),
            like_count: comment.like_count.unwrap_or(0),
            reply_count: snippet.total_reply_count.unwrap_or(0),
        })
    }
}

/// VideoProvider backed by the YouTube Data API v3
pub struct YouTubeDataClient {
    http: reqwest::Client,
    config: YouTubeClientConfig,
}

impl YouTubeDataClient {
    pub fn new(config: YouTubeClientConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ProviderError::Transport(Box::new(e)))?;
        Ok(Self { http, config })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);

        let resp = self
            .http
            .get(&url)
            .query(query)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(Box::new(e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or(body);
            warn!("YouTube API {} returned {}: {}", path, status.as_u16(), message);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| ProviderError::Decode(Box::new(e)))
    }
}

#[async_trait]
impl VideoProvider for YouTubeDataClient {
    async fn get_video_info(
        &self,
        video: &VideoReference,
    ) -> Result<Option<VideoMetadata>, ProviderError> {
        debug!("videos.list - id={}", video.id);
        let response: VideosListResponse = self
            .get_json(
                "/youtube/v3/videos",
                &[
                    ("part", "snippet,statistics".to_string()),
                    ("id", video.id.clone()),
                ],
            )
            .await?;

        Ok(response
            .items
            .into_iter()
            .next()
            .map(|item| item.into_metadata(&video.id)))
    }

    async fn list_comment_threads(
        &self,
        video: &VideoReference,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<CommentThreadPage, ProviderError> {
        debug!(
            "commentThreads.list - videoId={}, maxResults={}, pageToken={:?}",
            video.id, page_size, page_token
        );

        let mut query = vec![
            ("part", "snippet".to_string()),
            ("videoId", video.id.clone()),
            ("maxResults", page_size.to_string()),
            ("order", "relevance".to_string()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }

        let response: CommentThreadListResponse =
            self.get_json("/youtube/v3/commentThreads", &query).await?;

        Ok(CommentThreadPage {
            items: response
                .items
                .into_iter()
                .filter_map(CommentThread::into_comment)
                .collect(),
            next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
        })
    }
}
