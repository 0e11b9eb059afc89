use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::document::Document;
use crate::types::FailureKind;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {location} failed: {source}")]
    Request {
        location: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("{location} responded with status {status}")]
    Status { location: Url, status: u16 },
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{location} did not complete within {timeout:?}")]
    TimedOut { location: Url, timeout: Duration },
    #[error("Unsupported location scheme: {0}")]
    UnsupportedScheme(String),
    #[error("Base location is not an absolute directory: {0}")]
    InvalidBase(PathBuf),
    #[error("Could not determine working directory: {0}")]
    CurrentDir(#[source] std::io::Error),
    #[error("Invalid resource location: {0}")]
    Location(#[from] url::ParseError),
    #[error("Response from {location} is not valid JSON: {source}")]
    Parse {
        location: Url,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Parse { .. } => FailureKind::Parse,
            _ => FailureKind::Transport,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == FailureKind::Transport
    }

    pub fn is_parse(&self) -> bool {
        self.kind() == FailureKind::Parse
    }
}

/// Outcome of a checked fetch. Exactly one variant is populated.
///
/// `Failure` keeps the underlying cause; callers that only need to know
/// whether data arrived can use [`FetchResult::is_success`] or
/// [`FetchResult::ok`] and never look at it.
#[derive(Debug)]
pub enum FetchResult {
    Success(Document),
    Failure(FetchError),
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn document(&self) -> Option<&Document> {
        match self {
            FetchResult::Success(doc) => Some(doc),
            FetchResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchError> {
        match self {
            FetchResult::Success(_) => None,
            FetchResult::Failure(err) => Some(err),
        }
    }

    pub fn ok(self) -> Option<Document> {
        match self {
            FetchResult::Success(doc) => Some(doc),
            FetchResult::Failure(_) => None,
        }
    }

    pub fn into_result(self) -> Result<Document, FetchError> {
        self.into()
    }
}

impl From<Result<Document, FetchError>> for FetchResult {
    fn from(result: Result<Document, FetchError>) -> Self {
        match result {
            Ok(doc) => FetchResult::Success(doc),
            Err(err) => FetchResult::Failure(err),
        }
    }
}

impl From<FetchResult> for Result<Document, FetchError> {
    fn from(result: FetchResult) -> Self {
        match result {
            FetchResult::Success(doc) => Ok(doc),
            FetchResult::Failure(err) => Err(err),
        }
    }
}
