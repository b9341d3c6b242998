//! Async HTTP client wrapping reqwest.
//!
//! Presents itself as a desktop browser, follows redirects and treats any
//! non-2xx status as an error. One request per call, no retries.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use serde_json::Value;

use crate::types::CatalogResult;

/// Browser user-agent sent with every request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                                      AppleWebKit/537.36 (KHTML, like Gecko) \
                                      Chrome/120.0.0.0 Safari/537.36";

const MAX_REDIRECTS: usize = 10;

/// Response from an HTML page request.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    /// Original requested URL.
    pub url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// HTTP client shared by all pipelines of a run.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client with the browser user-agent and the given timeout.
    pub fn new(timeout: Duration) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(BROWSER_USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    /// GET a URL and parse the body as JSON.
    pub async fn get_json(&self, url: &str) -> CatalogResult<Value> {
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?;

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET an HTML page with the full browser header set, following redirects.
    pub async fn get_html(&self, url: &str) -> CatalogResult<HtmlPage> {
        let resp = self
            .client
            .get(url)
            .headers(browser_headers())
            .send()
            .await?
            .error_for_status()?;

        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();
        let body = resp.text().await?;

        Ok(HtmlPage {
            url: url.to_string(),
            final_url,
            status,
            body,
        })
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(
        "upgrade-insecure-requests",
        HeaderValue::from_static("1"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_creation() {
        assert!(HttpClient::new(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_browser_headers() {
        let headers = browser_headers();
        assert!(headers
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/html")));
        assert_eq!(headers.len(), 3);
    }
}
