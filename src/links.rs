//! Article link filtering and extraction.
//!
//! Given the article body of a page, this module produces the titles of the
//! articles it links to. Only plain in-corpus article links survive:
//!
//! | href | result |
//! |------|--------|
//! | `/wiki/Paper` | `Paper` |
//! | `/wiki/Paper#History` | `Paper` |
//! | `/wiki/%D0%91%D1%83%D0%BC%D0%B0%D0%B3%D0%B0` | `Бумага` |
//! | `/wiki/Category:Paper` | rejected (namespace) |
//! | `/wiki/File:Paper.jpg` | rejected (namespace) |
//! | `/w/index.php?title=Paper` | rejected (not an article path) |
//! | `https://example.com/wiki/Paper` | rejected (external) |

use crate::content::ContentWindow;
use crate::utils::decode_title;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

static ARTICLE_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/wiki/([^/#?]+)(?:#.*)?$").expect("article href pattern"));

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("anchor selector"));

/// Map an `href` to a canonical article title, or `None` if it is not a
/// plain article link.
pub fn article_title(href: &str) -> Option<String> {
    // namespaced pages: Category:, File:, Talk:, Special:, ...
    if href.contains(':') {
        return None;
    }
    let raw = ARTICLE_HREF.captures(href)?.get(1)?.as_str();
    let title = decode_title(raw);
    if title.is_empty() { None } else { Some(title) }
}

/// Extract the article titles linked from `content[window]`.
///
/// Titles are returned in the order they first appear in the markup; later
/// duplicates are dropped. An empty window yields no links.
#[instrument(level = "debug", skip_all, fields(begin = window.begin, end = window.end))]
pub fn extract(content: &str, window: ContentWindow) -> Vec<String> {
    if window.is_empty() {
        return Vec::new();
    }
    let body = window.slice(content);

    let fragment = Html::parse_fragment(body);
    let links: Vec<String> = fragment
        .select(&ANCHOR_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(article_title)
        .unique()
        .collect();

    debug!(count = links.len(), "Extracted article links");
    links
}
