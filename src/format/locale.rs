use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display conventions for a short date and medium time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// `1/15/2024, 10:00:00 AM`
    #[default]
    EnUs,
    /// `15/01/2024, 10:00:00`
    EnGb,
    /// `15.1.2024, 10:00:00`
    De,
    /// `15/01/2024 10:00:00`
    Fr,
    /// `2024/1/15 10:00:00`
    Ja,
    /// `2024-01-15 10:00:00`
    Sv,
}

impl Locale {
    /// Environment variables consulted for the ambient locale, in order.
    pub const ENV_VARS: [&'static str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

    /// Locale of the running process, from the POSIX locale variables.
    pub fn ambient() -> Self {
        Self::ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .map(|value| Self::from_posix(&value))
            .unwrap_or_default()
    }

    /// Map a POSIX locale name (`de_DE.UTF-8`, `en_GB@euro`) or a BCP 47
    /// tag (`en-GB`). `C`, `POSIX` and anything unknown fall back to `EnUs`.
    pub fn from_posix(name: &str) -> Self {
        let tag = name
            .split(&['.', '@'][..])
            .next()
            .unwrap_or_default()
            .replace('-', "_")
            .to_lowercase();
        let mut parts = tag.split('_');
        let language = parts.next().unwrap_or_default();
        let region = parts.next().unwrap_or_default();

        match (language, region) {
            ("en", "gb" | "ie" | "au" | "nz" | "in") => Locale::EnGb,
            ("de", _) => Locale::De,
            ("fr", _) => Locale::Fr,
            ("ja", _) => Locale::Ja,
            ("sv", _) => Locale::Sv,
            _ => Locale::EnUs,
        }
    }

    /// chrono pattern for this locale.
    pub(crate) fn pattern(&self) -> &'static str {
        match self {
            Locale::EnUs => "%-m/%-d/%Y, %-I:%M:%S %p",
            Locale::EnGb => "%d/%m/%Y, %H:%M:%S",
            Locale::De => "%-d.%-m.%Y, %H:%M:%S",
            Locale::Fr => "%d/%m/%Y %H:%M:%S",
            Locale::Ja => "%Y/%-m/%-d %-H:%M:%S",
            Locale::Sv => "%Y-%m-%d %H:%M:%S",
        }
    }
}

impl FromStr for Locale {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Locale::from_posix(s))
    }
}
