//! Parse raw HTTP response header lines collected by curl.

/// Returns the `(name, value)` pairs of the last response block.
///
/// With redirects followed, curl reports the headers of every hop; each block
/// starts with an `HTTP/` status line, so everything before the last one is
/// dropped.
pub(crate) fn final_headers(lines: &[String]) -> Vec<(String, String)> {
    let start = lines
        .iter()
        .rposition(|l| l.trim_start().starts_with("HTTP/"))
        .map(|i| i + 1)
        .unwrap_or(0);

    let mut headers = Vec::new();
    for line in &lines[start..] {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    headers
}
