//! HTTP fetch capability consumed by the scanner and the release client.
//!
//! Decision logic only talks to the [`Fetcher`] trait; [`CurlFetcher`] is the
//! default libcurl-backed implementation.

mod http;
mod parse;

pub use http::CurlFetcher;

use std::collections::HashMap;

/// Transport-level failure (no HTTP status was obtained).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),
    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge { limit: u64 },
    #[error("HTTP session lock poisoned")]
    SessionPoisoned,
}

/// A completed GET: any status code, body and the final hop's headers.
#[derive(Debug, Clone, Default)]
pub struct FetchResponse {
    pub status: u32,
    /// Response headers of the final hop, in arrival order.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// URL after following redirects.
    pub effective_url: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Blocking GET with per-request timeout enforced by the implementation.
pub trait Fetcher {
    fn get(&self, url: &str, headers: &HashMap<String, String>)
        -> Result<FetchResponse, FetchError>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_case_insensitive() {
        let r = FetchResponse {
            status: 200,
            headers: vec![("Content-Type".to_string(), "text/html".to_string())],
            body: b"ok".to_vec(),
            effective_url: "https://example.com/".to_string(),
        };
        assert_eq!(r.header("content-type"), Some("text/html"));
        assert_eq!(r.header("etag"), None);
        assert!(r.is_success());
        assert_eq!(r.text(), "ok");
    }

    #[test]
    fn non_2xx_is_not_success() {
        let r = FetchResponse {
            status: 404,
            ..FetchResponse::default()
        };
        assert!(!r.is_success());
    }
}
