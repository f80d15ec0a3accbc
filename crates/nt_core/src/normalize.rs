//! Cleanup of provider rows into [`ArticleRecord`]s.
//!
//! Nothing here fails: a malformed link comes back unchanged and missing
//! fields become empty strings. The only row that is dropped is one whose
//! title is blank, since the title is the dedup key.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{ArticleRecord, RawArticle};

const YOUTUBE_WATCH: &str = "https://www.youtube.com/watch?v=";
const TRACKING_MARKER: &str = "&ved=";
const MAX_UNESCAPE_ROUNDS: usize = 3;

lazy_static! {
    // A YouTube watch link embedded as an escaped `url=` parameter of a redirect.
    // Percent escapes may use either hex case.
    static ref WRAPPED_YOUTUBE: Regex = Regex::new(
        r"youtube\.com(?i:%2F)watch(?i:%253F|%3F)v(?i:%253D|%3D)(?P<id>.+?)(?i:%2526|%26|&|$)"
    )
    .expect("valid youtube pattern");
}

pub fn normalize(raw: RawArticle) -> Option<ArticleRecord> {
    let title = raw.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return None;
    }

    Some(ArticleRecord {
        title: title.to_string(),
        source: raw.media.as_deref().map(str::trim).unwrap_or_default().to_string(),
        published_date: raw.date.as_deref().map(str::trim).unwrap_or_default().to_string(),
        description: raw.desc.unwrap_or_default(),
        url: canonicalize_url(raw.link.as_deref().unwrap_or_default()),
    })
}

/// Normalizes a whole provider page, keeping the provider's order.
pub fn normalize_page(raw: Vec<RawArticle>) -> Vec<ArticleRecord> {
    raw.into_iter().filter_map(normalize).collect()
}

pub fn canonicalize_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }

    if let Some(id) = wrapped_youtube_id(url) {
        return format!("{}{}", YOUTUBE_WATCH, id);
    }

    match url.find(TRACKING_MARKER) {
        Some(idx) => url[..idx].to_string(),
        None => url.to_string(),
    }
}

fn wrapped_youtube_id(url: &str) -> Option<String> {
    let escaped = WRAPPED_YOUTUBE.captures(url)?.name("id")?.as_str();
    let id = unescape(escaped);
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

// Redirect targets are escaped once per wrapping layer.
fn unescape(text: &str) -> String {
    let mut current = text.to_string();
    for _ in 0..MAX_UNESCAPE_ROUNDS {
        let decoded = match urlencoding::decode(&current) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => break,
        };
        if decoded == current {
            break;
        }
        current = decoded;
    }
    current
}
