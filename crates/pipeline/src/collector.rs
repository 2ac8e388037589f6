use crate::error::AnalyzeError;
use domain::{Comment, VideoReference};
use provider::{MAX_PAGE_SIZE, VideoProvider};
use tracing::{debug, info};

/// Collect up to `max_results` top-level comments in provider order.
///
/// Pages are requested with `min(100, remaining)` items until the bound is
/// reached or the provider stops returning a page token. A failing page
/// discards everything gathered so far.
pub async fn collect_comments(
    provider: &dyn VideoProvider,
    video: &VideoReference,
    max_results: usize,
) -> Result<Vec<Comment>, AnalyzeError> {
    let start = std::time::Instant::now();
    let mut comments: Vec<Comment> = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    while comments.len() < max_results {
        let remaining = max_results - comments.len();
        let page_size = remaining.min(MAX_PAGE_SIZE as usize) as u32;

        let page = provider
            .list_comment_threads(video, page_size, page_token.as_deref())
            .await?;
        pages += 1;

        debug!(
            "Comment page {} - requested={}, received={}, has_next={}",
            pages,
            page_size,
            page.items.len(),
            page.next_page_token.is_some()
        );

        comments.extend(page.items.into_iter().take(remaining));

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    info!(
        "Comment collection completed - id={}, comments={}, pages={}, duration={:.2}s",
        video.id,
        comments.len(),
        pages,
        start.elapsed().as_secs_f32()
    );

    Ok(comments)
}
