use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::source::result::FetchError;

/// Fixed name of the resource every DataSource reads.
pub const DATABASE_RESOURCE: &str = "db.json";

/// How the resource name is joined onto the base location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// `./db.json`: next to the base document or inside the base directory.
    #[default]
    ModuleRelative,
    /// `/db.json`: at the origin root (http) or filesystem root (file).
    RootAbsolute,
}

impl Resolution {
    pub fn reference(&self, resource: &str) -> String {
        match self {
            Resolution::ModuleRelative => format!("./{resource}"),
            Resolution::RootAbsolute => format!("/{resource}"),
        }
    }
}

// Key point:
// Serializable
// Comparable
// Explicit defaults
//
// The resource name is not configurable: every source reads
// DATABASE_RESOURCE, only the base and resolution vary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Location the resource is resolved against. `None` means the process
    /// working directory, as a `file://` URL.
    pub base: Option<Url>,
    pub resolution: Resolution,
    /// Upper bound on a single read. `None` leaves it to the transport.
    pub timeout_ms: Option<u64>,
}

impl SourceConfig {
    pub fn v0() -> Self {
        Self {
            base: None,
            resolution: Resolution::ModuleRelative,
            timeout_ms: None,
        }
    }

    pub fn with_base(mut self, base: Url) -> Self {
        self.base = Some(base);
        self
    }

    /// Use a local directory as the base. The path must be absolute.
    pub fn with_base_dir(mut self, dir: &Path) -> Result<Self, FetchError> {
        let base = Url::from_directory_path(dir)
            .map_err(|_| FetchError::InvalidBase(dir.to_path_buf()))?;
        self.base = Some(base);
        Ok(self)
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Resolve the full resource location.
    pub fn resolve(&self) -> Result<Url, FetchError> {
        let base = match &self.base {
            Some(base) => base.clone(),
            None => {
                let cwd = std::env::current_dir().map_err(FetchError::CurrentDir)?;
                Url::from_directory_path(&cwd).map_err(|_| FetchError::InvalidBase(cwd))?
            }
        };
        Ok(base.join(&self.resolution.reference(DATABASE_RESOURCE))?)
    }
}
