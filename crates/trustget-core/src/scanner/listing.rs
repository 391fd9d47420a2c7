//! Hyperlink extraction from HTML directory listings (Apache, nginx autoindex).

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn href() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| Regex::new(r#"(?i)href=["']([^"']+)["']"#).expect("static href pattern"))
}

/// True for `Content-Type` values that can carry a listing.
pub(crate) fn is_html(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("text/html"))
}

/// `href` targets in document order, duplicates and navigation links removed.
///
/// Dropped: sort links (`?C=N;O=D`), `../` and the site root `/`.
pub(crate) fn extract_links(html: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    href()
        .captures_iter(html)
        .filter_map(|c| c.get(1).map(|m| m.as_str().trim()))
        .filter(|link| !(link.is_empty() || link.starts_with('?') || *link == "../" || *link == "/"))
        .filter(|link| seen.insert(link.to_string()))
        .map(str::to_string)
        .collect()
}
