//! libcurl-backed [`Fetcher`].
//!
//! One `Easy` handle is owned per fetcher and reused across requests so
//! connections to the same host are kept alive; it is released when the
//! fetcher is dropped.

use std::collections::HashMap;
use std::str;
use std::sync::Mutex;
use std::time::Duration;

use curl::easy::{Easy, List};

use super::parse::final_headers;
use super::{FetchError, FetchResponse, Fetcher};
use crate::config::HttpConfig;

const MAX_REDIRECTIONS: u32 = 10;

/// Blocking HTTP GET over libcurl with per-request timeouts.
pub struct CurlFetcher {
    handle: Mutex<Easy>,
    config: HttpConfig,
}

impl CurlFetcher {
    pub fn new(config: &HttpConfig) -> Self {
        Self {
            handle: Mutex::new(Easy::new()),
            config: config.clone(),
        }
    }

    fn configure(&self, easy: &mut Easy, url: &str, headers: &HashMap<String, String>) -> Result<(), curl::Error> {
        easy.reset();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTIONS)?;
        easy.connect_timeout(Duration::from_secs(self.config.connect_timeout_secs))?;
        easy.timeout(Duration::from_secs(self.config.timeout_secs))?;
        easy.useragent(&self.config.user_agent)?;

        if !headers.is_empty() {
            let mut list = List::new();
            for (k, v) in headers {
                list.append(&format!("{}: {}", k.trim(), v.trim()))?;
            }
            easy.http_headers(list)?;
        }
        Ok(())
    }
}

impl Fetcher for CurlFetcher {
    fn get(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<FetchResponse, FetchError> {
        let mut easy = self.handle.lock().map_err(|_| FetchError::SessionPoisoned)?;
        self.configure(&mut easy, url, headers)?;

        let limit = self.config.max_body_bytes;
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        let mut too_large = false;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                if body.len() as u64 + data.len() as u64 > limit {
                    too_large = true;
                    return Ok(0); // abort transfer
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()
        };

        if too_large {
            return Err(FetchError::BodyTooLarge { limit });
        }
        performed?;

        let status = easy.response_code()?;
        let effective_url = easy
            .effective_url()?
            .map(str::to_string)
            .unwrap_or_else(|| url.to_string());
        tracing::debug!(url, status, bytes = body.len(), "fetched");

        Ok(FetchResponse {
            status,
            headers: final_headers(&header_lines),
            body,
            effective_url,
        })
    }
}
