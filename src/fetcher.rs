//! Page retrieval.
//!
//! The search engine only sees the [`PageSource`] trait, which turns a page
//! title into raw markup or `None`. [`HttpFetcher`] is the network-backed
//! implementation: one GET per call, no retries, and every failure (DNS,
//! connect, timeout, non-2xx status, body read) is logged and reported as
//! `None` so a broken page is just a dead end for the search.

use crate::utils::{encode_title, truncate_for_log};
use reqwest::Client;
use std::error::Error;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use url::Url;

/// Source of raw page markup, keyed by page title.
pub trait PageSource {
    /// Fetch the markup of `title`, or `None` if it is unavailable.
    async fn fetch(&self, title: &str) -> Option<String>;
}

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Prefix that the encoded title is appended to,
    /// e.g. `https://ru.wikipedia.org/wiki/`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ru.wikipedia.org/wiki/".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Fetches pages over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    /// Build a fetcher, validating the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `config.base_url` is not an absolute URL or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &FetcherConfig) -> Result<Self, Box<dyn Error>> {
        let mut base_url = Url::parse(&config.base_url)?.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Request URL for `title`.
    pub fn page_url(&self, title: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}{}", self.base_url, encode_title(title)))
    }

    async fn get_page(&self, title: &str) -> Result<String, Box<dyn Error>> {
        let url = self.page_url(title)?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

impl PageSource for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, title: &str) -> Option<String> {
        let t0 = Instant::now();
        match self.get_page(title).await {
            Ok(body) => {
                debug!(
                    bytes = body.len(),
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Fetched page"
                );
                Some(body)
            }
            Err(e) => {
                warn!(
                    %title,
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    error = %truncate_for_log(&e.to_string(), 300),
                    "Page unavailable; treating as dead end"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn config(base_url: &str) -> FetcherConfig {
        FetcherConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(5),
            ..FetcherConfig::default()
        }
    }

    /// Serve a single canned HTTP response and hand back the request line.
    async fn one_shot_server(response: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let request = String::from_utf8_lossy(&buf[..n]).into_owned();
            request.lines().next().unwrap_or_default().to_string()
        });
        (format!("http://{addr}/wiki/"), handle)
    }

    #[test]
    fn test_page_url_encodes_title() {
        let fetcher = HttpFetcher::new(&config("https://ru.wikipedia.org/wiki/")).unwrap();
        let url = fetcher.page_url("Бумага").unwrap();
        assert_eq!(
            url.as_str(),
            "https://ru.wikipedia.org/wiki/%D0%91%D1%83%D0%BC%D0%B0%D0%B3%D0%B0"
        );
        let url = fetcher.page_url("Mercury_(planet)").unwrap();
        assert_eq!(url.as_str(), "https://ru.wikipedia.org/wiki/Mercury_(planet)");
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let fetcher = HttpFetcher::new(&config("https://en.wikipedia.org/wiki")).unwrap();
        assert_eq!(
            fetcher.page_url("Paper").unwrap().as_str(),
            "https://en.wikipedia.org/wiki/Paper"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(HttpFetcher::new(&config("not a url")).is_err());
    }

    #[tokio::test]
    async fn test_fetch_success_returns_body() {
        let (base, server) = one_shot_server(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 11\r\nConnection: close\r\n\r\n<p>body</p>",
        )
        .await;
        let fetcher = HttpFetcher::new(&config(&base)).unwrap();
        let body = fetcher.fetch("Paper").await;
        assert_eq!(body.as_deref(), Some("<p>body</p>"));
        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /wiki/Paper "));
    }

    #[tokio::test]
    async fn test_fetch_http_error_is_unavailable() {
        let (base, server) = one_shot_server(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let fetcher = HttpFetcher::new(&config(&base)).unwrap();
        assert_eq!(fetcher.fetch("Missing").await, None);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_unavailable() {
        // bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let fetcher = HttpFetcher::new(&config(&format!("http://{addr}/wiki/"))).unwrap();
        assert_eq!(fetcher.fetch("Anything").await, None);
    }
}
