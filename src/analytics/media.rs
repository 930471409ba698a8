//! Media classification of event URLs.

use super::timeline::Timestamped;
use serde::{Deserialize, Serialize};

/// Kind of media an event URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Image,
    Audio,
}

/// A media URL and the time its event was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub url: String,
    pub create_time: String,
}

impl MediaItem {
    pub fn new(url: impl Into<String>, create_time: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            create_time: create_time.into(),
        }
    }
}

impl Timestamped for MediaItem {
    fn create_time(&self) -> &str {
        &self.create_time
    }
}

/// Classify a URL by the extension it mentions, ignoring case.
///
/// The extension may sit anywhere in the URL, so `a.jpg?x=1` is an image.
/// A URL mentioning both wins as an image.
pub fn classify_url(url: &str) -> Option<MediaKind> {
    let lower = url.to_lowercase();
    if lower.contains(".jpg") || lower.contains(".jpeg") {
        Some(MediaKind::Image)
    } else if lower.contains(".mp3") {
        Some(MediaKind::Audio)
    } else {
        None
    }
}

/// URL with its query string removed.
pub fn base_url(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}
