//! HTTP transport for the quote service.
//!
//! A `Transport` performs one blocking GET and hands back the status and raw
//! body. Interpreting the status is left to the fetcher; only failures to
//! complete the exchange at all are reported as errors here.

use std::collections::BTreeMap;
use std::time::Duration;

use log::debug;
use ticker_common::FetchError;

/// GET request envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Fully built request URL.
    pub url: String,
    /// Header names are stored lowercase.
    pub headers: BTreeMap<String, String>,
    /// Upper bound for the whole exchange.
    pub timeout: Duration,
}

impl HttpRequest {
    /// GET `url` with no headers and a 15 second timeout.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Replace the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Only a plain 200 counts as success for the quote service.
    pub const fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Blocking HTTP client seam.
pub trait Transport {
    /// Perform `request`, failing with `FetchError::Transport` when no response
    /// could be obtained.
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError>;
}

/// Production transport using reqwest's blocking client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Build a client identifying itself as the ticker device.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("ticker_device/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut builder = self.client.get(&request.url).timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().map_err(|e| {
            if e.is_timeout() {
                FetchError::Transport(format!("request timeout: {}", e))
            } else if e.is_connect() {
                FetchError::Transport(format!("connection failed: {}", e))
            } else {
                FetchError::Transport(format!("request failed: {}", e))
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| FetchError::Transport(format!("failed to read response body: {}", e)))?
            .to_vec();
        debug!("GET {} -> {} ({} bytes)", request.url, status, body.len());

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_are_lowercased() {
        let request = HttpRequest::get("https://example.test/quote").with_header("X-API-Key", "k");

        assert_eq!(request.headers.get("x-api-key").map(String::as_str), Some("k"));
    }

    #[test]
    fn only_200_is_success() {
        let ok = HttpResponse {
            status: 200,
            body: b"{}".to_vec(),
        };
        assert!(ok.is_success());
        for status in [201, 204, 301, 429, 500] {
            let response = HttpResponse {
                status,
                body: Vec::new(),
            };
            assert!(!response.is_success(), "{status}");
        }
    }
}
