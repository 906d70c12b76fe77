//! HTTP client wrapper for the stylesheet and asset requests.
//!
//! This module provides the `HttpClient` struct which attaches the browser
//! User-Agent to every request, maps failures to [`DownloadError`], and
//! streams asset bodies to disk.

use std::path::Path;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};
use url::Url;

use super::error::DownloadError;
use crate::user_agent::BROWSER_USER_AGENT;

/// HTTP client for the font service.
///
/// Created once per run and reused for the stylesheet and every asset so the
/// connection to each host is pooled. No timeouts are set; requests block for
/// as long as the underlying library allows.
///
/// # Example
///
/// ```no_run
/// use fontdl_core::download::HttpClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let css = client
///     .fetch_text("https://fonts.googleapis.com/css?family=Roboto&subset=all")
///     .await?;
/// println!("{} bytes of CSS", css.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a client that identifies as a desktop browser.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_user_agent(BROWSER_USER_AGENT)
            .expect("failed to build HTTP client with static configuration")
    }

    /// Creates a client that sends `user_agent` on every request.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if `user_agent` is not a valid
    /// header value or the TLS backend cannot be initialised.
    #[instrument(level = "debug")]
    pub fn with_user_agent(user_agent: &str) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|source| DownloadError::ClientBuild { source })?;
        Ok(Self { client })
    }

    /// GETs `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if the URL is invalid, the request fails, the
    /// server answers with a non-success status, or the body cannot be read.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_text(&self, url: &str) -> Result<String, DownloadError> {
        let response = self.send_get(url).await?;
        let body = response
            .text()
            .await
            .map_err(|e| DownloadError::network(url, e))?;
        debug!(bytes = body.len(), "fetched text body");
        Ok(body)
    }

    /// GETs `url` and writes the full body to `file_path`, returning bytes written.
    ///
    /// The file is created (truncating any previous content) only after the
    /// server has answered with a success status. A failure while streaming
    /// leaves whatever was written so far on disk.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if the URL is invalid, the request fails, the
    /// server answers with a non-success status, or writing to disk fails.
    #[instrument(skip(self), fields(url = %url, path = %file_path.display()))]
    pub async fn download_to_path(&self, url: &str, file_path: &Path) -> Result<u64, DownloadError> {
        let response = self.send_get(url).await?;

        let mut file = File::create(file_path)
            .await
            .map_err(|e| DownloadError::io(file_path, e))?;

        let bytes_written = stream_to_file(&mut file, response, url, file_path).await?;
        debug!(bytes = bytes_written, "asset written");
        Ok(bytes_written)
    }

    async fn send_get(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }
        Ok(response)
    }
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path, e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path, e))?;

    Ok(bytes_written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use crate::test_support::socket_guard::start_mock_server_or_skip;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Match, Mock, Request, ResponseTemplate};

    /// Matches requests whose User-Agent equals the given value exactly.
    struct UserAgentIs(&'static str);

    impl Match for UserAgentIs {
        fn matches(&self, request: &Request) -> bool {
            request
                .headers
                .get("User-Agent")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|ua| ua == self.0)
        }
    }

    #[tokio::test]
    async fn test_fetch_text_returns_body() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/css"))
            .respond_with(ResponseTemplate::new(200).set_body_string("@font-face {}"))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let body = client
            .fetch_text(&format!("{}/css", mock_server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "@font-face {}");
    }

    #[tokio::test]
    async fn test_fetch_text_sends_browser_user_agent() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/css"))
            .and(UserAgentIs(BROWSER_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let result = client.fetch_text(&format!("{}/css", mock_server.uri())).await;
        assert!(result.is_ok(), "browser UA must be sent; got: {result:?}");
    }

    #[tokio::test]
    async fn test_custom_user_agent_is_sent() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/css"))
            .and(UserAgentIs("fontdl-test/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpClient::with_user_agent("fontdl-test/1.0").unwrap();
        let result = client.fetch_text(&format!("{}/css", mock_server.uri())).await;
        assert!(result.is_ok(), "custom UA must be sent; got: {result:?}");
    }

    #[test]
    fn test_with_user_agent_rejects_invalid_header_value() {
        let result = HttpClient::with_user_agent("bad\nagent");
        assert!(matches!(result, Err(DownloadError::ClientBuild { .. })));
    }

    #[tokio::test]
    async fn test_fetch_text_404_is_http_status_error() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/css"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let result = client.fetch_text(&format!("{}/css", mock_server.uri())).await;
        match result {
            Err(DownloadError::HttpStatus { status, .. }) => assert_eq!(status, 404),
            other => panic!("Expected HttpStatus error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_text_invalid_url() {
        let client = HttpClient::new();
        let result = client.fetch_text("not-a-valid-url").await;
        assert!(matches!(result, Err(DownloadError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_download_to_path_writes_exact_bytes() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/s/roboto/abc.woff2"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x00, 0x01]))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let target = temp_dir.path().join("Roboto.woff2");
        let written = client
            .download_to_path(
                &format!("{}/s/roboto/abc.woff2", mock_server.uri()),
                &target,
            )
            .await
            .unwrap();

        assert_eq!(written, 2);
        assert_eq!(std::fs::read(&target).unwrap(), vec![0x00, 0x01]);
    }

    #[tokio::test]
    async fn test_download_to_path_truncates_existing_file() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("Roboto.woff2");
        std::fs::write(&target, b"much longer stale content").unwrap();

        Mock::given(method("GET"))
            .and(path("/a.woff2"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"new".to_vec()))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        client
            .download_to_path(&format!("{}/a.woff2", mock_server.uri()), &target)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_download_to_path_error_status_creates_no_file() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/gone.woff2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let target = temp_dir.path().join("Gone.woff2");
        let result = client
            .download_to_path(&format!("{}/gone.woff2", mock_server.uri()), &target)
            .await;

        assert!(matches!(
            result,
            Err(DownloadError::HttpStatus { status: 500, .. })
        ));
        assert!(!target.exists(), "no file should be created on error status");
    }

    #[tokio::test]
    async fn test_download_to_path_missing_directory_is_io_error() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/a.woff2"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"x".to_vec()))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let target = temp_dir.path().join("missing").join("A.woff2");
        let result = client
            .download_to_path(&format!("{}/a.woff2", mock_server.uri()), &target)
            .await;

        match result {
            Err(DownloadError::Io { path, .. }) => assert_eq!(path, target),
            other => panic!("Expected Io error, got: {other:?}"),
        }
    }
}
