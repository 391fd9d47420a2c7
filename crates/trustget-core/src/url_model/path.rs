//! Path-level URL manipulation: last segment, parent directory, link joining.

use url::Url;

/// Extracts the last path segment from a URL.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    segment_of(&parsed)
}

fn segment_of(parsed: &Url) -> Option<String> {
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// URL of the directory containing `url`: scheme, authority and the path up to
/// and including its last `/`. Query and fragment are dropped.
pub fn parent_directory(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;
    if parsed.cannot_be_a_base() {
        return None;
    }
    let dir = match parsed.path().rfind('/') {
        Some(idx) => parsed.path()[..=idx].to_string(),
        None => return None,
    };
    parsed.set_path(&dir);
    parsed.set_query(None);
    parsed.set_fragment(None);
    Some(parsed.into())
}

/// Resolves `href` against `base` and returns the absolute URL with the
/// filename taken from its last path segment.
///
/// Links resolving to a directory (empty last segment) yield `None`.
pub fn join_link(base: &str, href: &str) -> Option<(String, String)> {
    let base = Url::parse(base).ok()?;
    let joined = base.join(href).ok()?;
    if joined.path().ends_with('/') {
        return None;
    }
    let filename = segment_of(&joined)?;
    Some((joined.into(), filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal() {
        assert_eq!(
            filename_from_url_path("https://example.com/a/b/file.deb").as_deref(),
            Some("file.deb")
        );
        assert_eq!(
            filename_from_url_path("https://example.com/single").as_deref(),
            Some("single")
        );
    }

    #[test]
    fn root_or_empty() {
        assert_eq!(filename_from_url_path("https://example.com/"), None);
        assert_eq!(filename_from_url_path("https://example.com"), None);
    }

    #[test]
    fn with_query() {
        assert_eq!(
            filename_from_url_path("https://example.com/file.zip?token=abc").as_deref(),
            Some("file.zip")
        );
    }

    #[test]
    fn parent_of_file() {
        assert_eq!(
            parent_directory("https://mirror.example.org/pub/iso/debian-12.iso?x=1#frag").as_deref(),
            Some("https://mirror.example.org/pub/iso/")
        );
        assert_eq!(
            parent_directory("http://127.0.0.1:8080/file.bin").as_deref(),
            Some("http://127.0.0.1:8080/")
        );
    }

    #[test]
    fn parent_of_directory_is_itself() {
        assert_eq!(
            parent_directory("https://example.com/releases/").as_deref(),
            Some("https://example.com/releases/")
        );
    }

    #[test]
    fn parent_of_garbage() {
        assert_eq!(parent_directory("no scheme here"), None);
        assert_eq!(parent_directory("mailto:someone@example.com"), None);
    }

    #[test]
    fn join_relative_and_absolute_links() {
        let base = "https://example.com/pub/v1/";
        assert_eq!(
            join_link(base, "SHA256SUMS"),
            Some(("https://example.com/pub/v1/SHA256SUMS".to_string(), "SHA256SUMS".to_string()))
        );
        assert_eq!(
            join_link(base, "/other/app.tar.gz.sha256"),
            Some((
                "https://example.com/other/app.tar.gz.sha256".to_string(),
                "app.tar.gz.sha256".to_string()
            ))
        );
        assert_eq!(
            join_link(base, "https://cdn.example.net/x/MD5SUMS").map(|(_, f)| f).as_deref(),
            Some("MD5SUMS")
        );
    }

    #[test]
    fn join_directory_links_skipped() {
        let base = "https://example.com/pub/v1/";
        assert_eq!(join_link(base, "subdir/"), None);
        assert_eq!(join_link(base, "../"), None);
    }
}
