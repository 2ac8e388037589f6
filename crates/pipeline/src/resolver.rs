use domain::VideoReference;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Recognised URL shapes, tried in order
    static ref VIDEO_ID_PATTERNS: [Regex; 2] = [
        Regex::new(
            r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)([^&\n?#]+)"
        )
        .expect("watch/short/embed pattern should compile"),
        Regex::new(r"youtube\.com/watch\?.*v=([^&\n?#]+)")
            .expect("query-parameter pattern should compile"),
    ];
}

/// Extract the video id from a URL.
/// Returns `None` when no pattern matches; that is not an error here.
pub fn resolve_video_id(url: &str) -> Option<VideoReference> {
    VIDEO_ID_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| VideoReference::new(m.as_str()))
    })
}
