//! reqwest-backed attachment fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use tracing::{debug, warn};

use crate::domain::errors::{CacheError, FetchError};
use crate::domain::ports::{AttachmentFetcher, FetchedContent};

pub const USER_AGENT: &str = concat!("disrelay/", env!("CARGO_PKG_VERSION"));

/// Downloads attachment bodies over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpAttachmentFetcher {
    client: Client,
}

impl HttpAttachmentFetcher {
    /// Creates a fetcher whose requests give up after `timeout`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(timeout: Duration) -> Result<Self, CacheError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| CacheError::client(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl AttachmentFetcher for HttpAttachmentFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedContent, FetchError> {
        debug!(url = %url, "Downloading attachment");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Attachment request failed");
            if e.is_timeout() {
                FetchError::request("request timed out")
            } else if e.is_connect() {
                FetchError::request(format!("failed to connect: {e}"))
            } else {
                FetchError::request(e.to_string())
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = response.bytes().await.map_err(|e| {
            warn!(url = %url, error = %e, "Attachment body could not be read");
            if e.is_timeout() {
                FetchError::request("request timed out")
            } else {
                FetchError::body(e.to_string())
            }
        })?;

        debug!(url = %url, bytes = body.len(), "Attachment downloaded");

        Ok(FetchedContent { content_type, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use mockito::Server;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn fetcher() -> HttpAttachmentFetcher {
        HttpAttachmentFetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_ok_response_returns_body_and_type() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/circuit_diagram.png")
            .match_header("user-agent", USER_AGENT)
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body("not really a png")
            .create_async()
            .await;

        let fetched = fetcher()
            .fetch(&format!("{}/circuit_diagram.png", server.url()))
            .await
            .unwrap();

        assert_eq!(fetched.content_type.as_deref(), Some("image/png"));
        assert_eq!(fetched.body.as_ref(), b"not really a png");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_none() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/blob")
            .with_status(200)
            .with_body("data")
            .create_async()
            .await;

        let fetched = fetcher()
            .fetch(&format!("{}/blob", server.url()))
            .await
            .unwrap();

        assert!(fetched.content_type.is_none());
    }

    #[tokio::test]
    async fn test_not_found_is_status_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/notexist.png")
            .with_status(404)
            .create_async()
            .await;

        let err = fetcher()
            .fetch(&format!("{}/notexist.png", server.url()))
            .await
            .unwrap_err();

        assert_eq!(err, FetchError::Status { status: 404 });
    }

    #[tokio::test]
    async fn test_non_200_success_is_status_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/empty")
            .with_status(204)
            .create_async()
            .await;

        let err = fetcher()
            .fetch(&format!("{}/empty", server.url()))
            .await
            .unwrap_err();

        assert_eq!(err, FetchError::Status { status: 204 });
    }

    #[tokio::test]
    async fn test_unreachable_host_is_request_error() {
        let err = fetcher().fetch("http://127.0.0.1:1/").await.unwrap_err();

        assert!(matches!(err, FetchError::Request { .. }));
    }

    #[tokio::test]
    async fn test_truncated_body_is_body_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0_u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nonly part")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let err = fetcher()
            .fetch(&format!("http://{addr}/truncated"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Body { .. }));
    }

    /// Accepts one connection, optionally writes `head`, then holds the socket open.
    async fn stalling_server(head: &'static [u8]) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0_u8; 1024];
            let _ = socket.read(&mut buf).await;
            if !head.is_empty() {
                socket.write_all(head).await.unwrap();
            }
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        addr
    }

    #[tokio::test]
    async fn test_silent_server_times_out_as_request_error() {
        let addr = stalling_server(b"").await;
        let fetcher = HttpAttachmentFetcher::new(Duration::from_millis(100)).unwrap();

        let err = fetcher
            .fetch(&format!("http://{addr}/silent"))
            .await
            .unwrap_err();

        assert_eq!(err, FetchError::request("request timed out"));
    }

    #[tokio::test]
    async fn test_stalled_body_times_out_as_request_error() {
        let addr = stalling_server(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\npart").await;
        let fetcher = HttpAttachmentFetcher::new(Duration::from_millis(100)).unwrap();

        let err = fetcher
            .fetch(&format!("http://{addr}/stalled"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Request { .. }));
    }

    #[tokio::test]
    async fn test_cache_over_http_does_not_store_failures() {
        use crate::application::cache::{AttachmentCache, CacheConfig};
        use crate::domain::entities::AttachmentDescriptor;

        let mut server = Server::new_async().await;
        let ok = server
            .mock("GET", "/ok.txt")
            .with_status(200)
            .with_body("hello")
            .expect(1)
            .create_async()
            .await;
        let _missing = server
            .mock("GET", "/notexist.png")
            .with_status(404)
            .create_async()
            .await;

        let cache = AttachmentCache::new(Arc::new(fetcher()), &CacheConfig::default());
        let ok_url = format!("{}/ok.txt", server.url());
        let missing_url = format!("{}/notexist.png", server.url());

        cache
            .get(&AttachmentDescriptor::new(&ok_url, "ok.txt", "text/plain"))
            .await
            .unwrap();
        cache
            .get(&AttachmentDescriptor::new(&ok_url, "ok.txt", "text/plain"))
            .await
            .unwrap();
        ok.assert_async().await;

        let err = cache
            .get(&AttachmentDescriptor::new(&missing_url, "notexist.png", ""))
            .await
            .unwrap_err();
        assert!(err.is_fetch_failure());

        let err = cache
            .get(&AttachmentDescriptor::new("http://127.0.0.1:1/", "", ""))
            .await
            .unwrap_err();
        assert!(err.is_request_failure());

        assert!(!cache.contains(&missing_url));
        assert_eq!(cache.len(), 1);
    }
}
