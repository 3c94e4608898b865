// SPDX-License-Identifier: PMPL-1.0-or-later
//! Bounded page fetcher.
//!
//! Retrieves raw markup for a URL under three hard limits: a
//! whole-request timeout, a redirect cap, and a body size ceiling.
//! Redirects are followed manually (the client itself never redirects)
//! so the cap and the `InvalidRedirect` case stay explicit.

use crate::config::FetcherConfig;
use crate::error::FetchError;
use reqwest::header::LOCATION;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTTP client wrapper enforcing the fetch limits
pub struct PageFetcher {
    client: Client,
    config: FetcherConfig,
}

/// Normalize a URL string: bare hosts get the secure scheme, then the
/// result must parse as an http(s) URL.
pub fn normalize_url(raw: &str) -> Result<Url, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FetchError::InvalidUrl(raw.to_string()));
    }
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    let url = Url::parse(&candidate).map_err(|_| FetchError::InvalidUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(FetchError::InvalidUrl(raw.to_string())),
    }
}

impl PageFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(FetchError::from_reqwest)?;
        Ok(Self { client, config })
    }

    /// Fetch the decoded text body for a URL.
    ///
    /// Follows up to `max_redirects` redirects; a chain of exactly that
    /// many followed by a success still succeeds, one more fails with
    /// `TooManyRedirects`.
    pub async fn fetch(&self, raw_url: &str) -> Result<String, FetchError> {
        let mut url = normalize_url(raw_url)?;
        let timeout = Duration::from_millis(self.config.timeout_ms);

        for _ in 0..=self.config.max_redirects {
            debug!(%url, "fetching page");
            let response = self
                .client
                .get(url.clone())
                .timeout(timeout)
                .send()
                .await
                .map_err(FetchError::from_reqwest)?;

            let status = response.status();
            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .ok_or(FetchError::InvalidRedirect)?;
                url = url.join(location).map_err(|_| FetchError::InvalidRedirect)?;
                continue;
            }

            if !status.is_success() {
                return Err(FetchError::HttpStatus(status.as_u16()));
            }

            return self.read_body(response).await;
        }

        Err(FetchError::TooManyRedirects(self.config.max_redirects))
    }

    /// Accumulate the body incrementally, aborting once the ceiling is
    /// crossed so a pathological page cannot exhaust memory.
    async fn read_body(&self, mut response: Response) -> Result<String, FetchError> {
        let ceiling = self.config.max_body_bytes;
        let mut body: Vec<u8> = Vec::new();

        while let Some(chunk) = response.chunk().await.map_err(FetchError::from_reqwest)? {
            if body.len() + chunk.len() > ceiling {
                return Err(FetchError::PayloadTooLarge(ceiling));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bare_host_gets_https() {
        let url = normalize_url("example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_normalize_keeps_explicit_scheme() {
        let url = normalize_url("http://example.com/page").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.path(), "/page");
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(matches!(
            normalize_url(""),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            normalize_url("http://"),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            normalize_url("ftp://example.com"),
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
