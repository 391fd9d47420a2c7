//! Hostname and scheme extraction.

/// Lowercased hostname of `url`, without port or userinfo.
///
/// Returns `None` if the URL cannot be parsed or has no host (e.g. `file:`).
pub fn hostname(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    if host.is_empty() {
        return None;
    }
    Some(host.to_ascii_lowercase())
}

/// True when `url` parses and its scheme is `https`.
pub fn is_https(url: &str) -> bool {
    url::Url::parse(url)
        .map(|u| u.scheme() == "https")
        .unwrap_or(false)
}
