pub mod config;
pub mod data_source;
pub mod result;
pub mod transport;

pub use config::{Resolution, SourceConfig, DATABASE_RESOURCE};
pub use data_source::DataSource;
pub use result::{FetchError, FetchResult};
pub use transport::{FileTransport, HttpTransport, SchemeTransport, Transport};
