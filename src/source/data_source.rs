use tracing::{debug, warn};
use url::Url;

use crate::document::Document;
use crate::source::config::SourceConfig;
use crate::source::result::{FetchError, FetchResult};
use crate::source::transport::{SchemeTransport, Transport};

/// Reads the database document from one fixed location.
///
/// Holds no mutable state: concurrent calls on the same instance are
/// independent reads.
#[derive(Debug)]
pub struct DataSource<T = SchemeTransport> {
    config: SourceConfig,
    location: Url,
    transport: T,
}

impl DataSource<SchemeTransport> {
    pub fn new(config: SourceConfig) -> Result<Self, FetchError> {
        Self::with_transport(config, SchemeTransport::default())
    }
}

impl<T> DataSource<T>
where
    T: Transport,
{
    /// The location is resolved once, here; it does not follow later
    /// changes to the working directory.
    pub fn with_transport(config: SourceConfig, transport: T) -> Result<Self, FetchError> {
        let location = config.resolve()?;
        Ok(Self {
            config,
            location,
            transport,
        })
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch and parse the document, catching every failure.
    ///
    /// Never returns an error past this boundary: transport and parse
    /// failures come back as [`FetchResult::Failure`] carrying the cause.
    pub async fn fetch_database(&self) -> FetchResult {
        match self.fetch_database_unchecked().await {
            Ok(doc) => FetchResult::Success(doc),
            Err(err) => {
                warn!(location = %self.location, kind = %err.kind(), error = %err, "fetch failed");
                FetchResult::Failure(err)
            }
        }
    }

    /// Fetch and parse the document with no recovery; failures propagate.
    pub async fn fetch_database_unchecked(&self) -> Result<Document, FetchError> {
        debug!(location = %self.location, "fetching document");

        let body = match self.config.timeout() {
            Some(timeout) => tokio::time::timeout(timeout, self.transport.read(&self.location))
                .await
                .map_err(|_| FetchError::TimedOut {
                    location: self.location.clone(),
                    timeout,
                })??,
            None => self.transport.read(&self.location).await?,
        };

        Document::from_slice(&body).map_err(|source| FetchError::Parse {
            location: self.location.clone(),
            source,
        })
    }
}
