use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;
use url::Url;

use crate::source::result::FetchError;

/// One read of a resource, returning its raw body.
///
/// Implementations must not retry or cache: every call is a fresh read.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn read(&self, location: &Url) -> Result<Vec<u8>, FetchError>;
}

/// HTTP GET. Any non-success status is a transport failure.
///
/// The client is built on first use, so a transport that only ever reads
/// files never sets up TLS.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: OnceCell<reqwest::Client>,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client: OnceCell::new_with(Some(client)),
        }
    }

    pub fn has_client(&self) -> bool {
        self.client.initialized()
    }

    async fn client(&self) -> Result<&reqwest::Client, reqwest::Error> {
        self.client
            .get_or_try_init(|| async { reqwest::Client::builder().build() })
            .await
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn read(&self, location: &Url) -> Result<Vec<u8>, FetchError> {
        let request_failed = |source| FetchError::Request {
            location: location.clone(),
            source,
        };

        let resp = self
            .client()
            .await
            .map_err(request_failed)?
            .get(location.clone())
            .send()
            .await
            .map_err(request_failed)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                location: location.clone(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(request_failed)?;
        debug!(%location, bytes = body.len(), "http read complete");
        Ok(body.to_vec())
    }
}

/// Local filesystem read of a `file://` location.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTransport;

#[async_trait]
impl Transport for FileTransport {
    async fn read(&self, location: &Url) -> Result<Vec<u8>, FetchError> {
        let path = location
            .to_file_path()
            .map_err(|_| FetchError::UnsupportedScheme(location.scheme().to_string()))?;

        let body = tokio::fs::read(&path)
            .await
            .map_err(|source| FetchError::Io {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), bytes = body.len(), "file read complete");
        Ok(body)
    }
}

/// Picks HTTP or filesystem by URL scheme.
#[derive(Debug, Clone, Default)]
pub struct SchemeTransport {
    http: HttpTransport,
    file: FileTransport,
}

impl SchemeTransport {
    pub fn new(http: HttpTransport) -> Self {
        Self {
            http,
            file: FileTransport,
        }
    }

    pub fn http(&self) -> &HttpTransport {
        &self.http
    }
}

#[async_trait]
impl Transport for SchemeTransport {
    async fn read(&self, location: &Url) -> Result<Vec<u8>, FetchError> {
        match location.scheme() {
            "http" | "https" => self.http.read(location).await,
            "file" => self.file.read(location).await,
            other => Err(FetchError::UnsupportedScheme(other.to_string())),
        }
    }
}
