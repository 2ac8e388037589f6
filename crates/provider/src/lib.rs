use async_trait::async_trait;
use domain::{Comment, VideoMetadata, VideoReference};
use std::collections::HashMap;
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Largest page the provider will serve in one call
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn Error + Send + Sync>),
    #[error("provider returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed provider response: {0}")]
    Decode(#[source] Box<dyn Error + Send + Sync>),
    #[error("invalid page token: {0}")]
    InvalidPageToken(String),
}

/// One page of top-level comment threads
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentThreadPage {
    pub items: Vec<Comment>,
    pub next_page_token: Option<String>,
}

/// Read-only access to video metadata and comments.
/// Implementations resolve missing optional fields to their defaults
/// before handing records out.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Snippet and statistics for a video, `None` if the provider has no such video
    async fn get_video_info(
        &self,
        video: &VideoReference,
    ) -> Result<Option<VideoMetadata>, ProviderError>;

    /// One page of top-level comment threads in relevance order
    async fn list_comment_threads(
        &self,
        video: &VideoReference,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<CommentThreadPage, ProviderError>;
}

/// In-memory implementation of the VideoProvider trait.
/// Page tokens are decimal offsets into the stored comment list.
pub struct InMemoryProvider {
    videos: Arc<RwLock<HashMap<String, VideoMetadata>>>,
    comments: Arc<RwLock<HashMap<String, Vec<Comment>>>>,
    requests: AtomicUsize,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self {
            videos: Arc::new(RwLock::new(HashMap::new())),
            comments: Arc::new(RwLock::new(HashMap::new())),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn add_video(&self, video: VideoMetadata) {
        self.videos
            .write()
            .expect("Failed to acquire write lock on videos")
            .insert(video.id.clone(), video);
    }

    pub fn add_comment(&self, video_id: &str, comment: Comment) {
        self.comments
            .write()
            .expect("Failed to acquire write lock on comments")
            .entry(video_id.to_string())
            .or_default()
            .push(comment);
    }

    /// Number of provider calls served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoProvider for InMemoryProvider {
    async fn get_video_info(
        &self,
        video: &VideoReference,
    ) -> Result<Option<VideoMetadata>, ProviderError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .videos
            .read()
            .expect("Failed to acquire read lock on videos")
            .get(&video.id)
            .cloned())
    }

    async fn list_comment_threads(
        &self,
        video: &VideoReference,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<CommentThreadPage, ProviderError> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        let offset = match page_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| ProviderError::InvalidPageToken(token.to_string()))?,
            None => 0,
        };
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE) as usize;

        let comments = self
            .comments
            .read()
            .expect("Failed to acquire read lock on comments");
        let all = comments.get(&video.id).map(Vec::as_slice).unwrap_or_default();

        let start = offset.min(all.len());
        let end = (start + page_size).min(all.len());
        let next_page_token = (end < all.len()).then(|| end.to_string());

        Ok(CommentThreadPage {
            items: all[start..end].to_vec(),
            next_page_token,
        })
    }
}
