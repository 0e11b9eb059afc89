//! Data-access boundary for the Kariki application.
//!
//! `kariki-core` exposes two operations to the rest of the app: reading the
//! `db.json` document ([`fetch_database`]) and rendering timestamps for
//! display ([`format_date`]). The two share nothing but the failure
//! taxonomy in [`types`].

pub mod document;
pub mod format;
pub mod source;
pub mod types;

pub use document::Document;
pub use format::{format_date, try_format_date, DateFormatter, DateInput, FormattedDate};
pub use source::{DataSource, FetchError, FetchResult, SourceConfig};
pub use types::FailureKind;

/// Fetch `./db.json` relative to the working directory.
///
/// Failures are caught and returned as [`FetchResult::Failure`]; build a
/// [`DataSource`] for another location, policy, or timeout.
pub async fn fetch_database() -> FetchResult {
    match DataSource::new(SourceConfig::v0()) {
        Ok(source) => source.fetch_database().await,
        Err(err) => {
            tracing::warn!(error = %err, "could not resolve database location");
            FetchResult::Failure(err)
        }
    }
}
