use serde::{Deserialize, Serialize};
use std::fmt;

const EMBED_BASE: &str = "https://www.youtube.com/embed/";
const WATCH_BASE: &str = "https://www.youtube.com/watch?v=";
const THUMBNAIL_BASE: &str = "https://img.youtube.com/vi/";

/// Opaque reference into the video host. Only the presentation layer resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoRef(String);

impl VideoRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    pub fn embed_url(&self) -> String {
        format!("{}{}", EMBED_BASE, self.0)
    }

    pub fn watch_url(&self) -> String {
        format!("{}{}", WATCH_BASE, self.0)
    }

    pub fn thumbnail_url(&self) -> String {
        format!("{}{}/maxresdefault.jpg", THUMBNAIL_BASE, self.0)
    }
}

impl fmt::Display for VideoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_urls() {
        let video = VideoRef::new("lob3mrCjkCQ");
        assert_eq!(video.embed_url(), "https://www.youtube.com/embed/lob3mrCjkCQ");
        assert_eq!(video.watch_url(), "https://www.youtube.com/watch?v=lob3mrCjkCQ");
        assert_eq!(
            video.thumbnail_url(),
            "https://img.youtube.com/vi/lob3mrCjkCQ/maxresdefault.jpg"
        );
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let video = VideoRef::new("abc");
        assert_eq!(serde_json::to_string(&video).unwrap(), "\"abc\"");
    }
}
