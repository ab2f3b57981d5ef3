//! Locating the article body inside raw page markup.
//!
//! MediaWiki pages wrap the article in `<div id="mw-content-text" ...>` and
//! put navigation boxes, categories and the footer after
//! `<div class="printfooter" ...>`. Only the range between the two markers is
//! handed to the link extractor, so sidebar and footer links never become
//! graph edges.

use tracing::debug;

/// Markers delimiting the article body.
#[derive(Debug, Clone)]
pub struct ContentMarkers {
    /// Prefix of the tag that opens the article body.
    pub body_start: String,
    /// Prefix of the tag that opens the footer.
    pub footer_start: String,
}

impl Default for ContentMarkers {
    fn default() -> Self {
        Self {
            body_start: r#"<div id="mw-content-text""#.to_string(),
            footer_start: r#"<div class="printfooter""#.to_string(),
        }
    }
}

/// Byte range `[begin, end)` of the article body within a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentWindow {
    pub begin: usize,
    pub end: usize,
}

impl ContentWindow {
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Borrow the windowed part of `content`.
    ///
    /// Returns an empty string if the window does not fit `content`.
    pub fn slice<'a>(&self, content: &'a str) -> &'a str {
        content.get(self.begin..self.end).unwrap_or("")
    }
}

impl ContentMarkers {
    /// Find the article body in `content`.
    ///
    /// Returns the empty window `(0, 0)` when either marker is missing or the
    /// footer marker comes before the body marker.
    pub fn locate(&self, content: &str) -> ContentWindow {
        let begin = content.find(&self.body_start);
        let end = content.find(&self.footer_start);
        match (begin, end) {
            (Some(begin), Some(end)) if begin <= end => ContentWindow { begin, end },
            _ => {
                debug!(
                    has_body = begin.is_some(),
                    has_footer = end.is_some(),
                    bytes = content.len(),
                    "Content markers not found; using empty window"
                );
                ContentWindow::default()
            }
        }
    }
}
