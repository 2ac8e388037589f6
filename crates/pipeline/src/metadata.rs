use crate::error::AnalyzeError;
use domain::{VideoMetadata, VideoReference};
use provider::VideoProvider;
use tracing::{debug, info, warn};

/// Fetch snippet and statistics for a resolved video
pub async fn fetch_metadata(
    provider: &dyn VideoProvider,
    video: &VideoReference,
) -> Result<VideoMetadata, AnalyzeError> {
    let start = std::time::Instant::now();
    debug!("Fetching video metadata - id={}", video.id);

    match provider.get_video_info(video).await? {
        Some(metadata) => {
            info!(
                "Video metadata fetched - id={}, title={:?}, comments={}, duration={:.2}s",
                metadata.id,
                metadata.title,
                metadata.comment_count,
                start.elapsed().as_secs_f32()
            );
            Ok(metadata)
        }
        None => {
            warn!("Video not found - id={}", video.id);
            Err(AnalyzeError::VideoNotFound(video.id.clone()))
        }
    }
}
