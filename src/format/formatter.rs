use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::trace;

use crate::format::input::DateInput;
use crate::format::locale::Locale;
use crate::format::zone::Zone;
use crate::types::FailureKind;

/// What a date that could not be interpreted renders as.
pub const INVALID_DATE: &str = "Invalid Date";

#[derive(Debug, Error)]
pub enum DateError {
    #[error("Input is not a valid date: {input}")]
    InvalidDateInput { input: String },
}

impl DateError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DateError::InvalidDateInput { .. } => FailureKind::InvalidDateInput,
        }
    }
}

/// A display string. Not meant to be parsed back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FormattedDate(String);

impl FormattedDate {
    pub fn invalid() -> Self {
        FormattedDate(INVALID_DATE.to_string())
    }

    pub fn is_valid(&self) -> bool {
        self.0 != INVALID_DATE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for FormattedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FormattedDate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for FormattedDate {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Renders dates in a fixed locale and zone.
///
/// Output depends only on the input and these two values. Use
/// [`DateFormatter::ambient`] at the outermost call site to pick them up
/// from the process environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateFormatter {
    locale: Locale,
    zone: Zone,
}

impl DateFormatter {
    pub fn new(locale: Locale, zone: Zone) -> Self {
        Self { locale, zone }
    }

    /// Locale from `LC_ALL`/`LC_TIME`/`LANG` and the process time zone.
    ///
    /// Output of a formatter built this way varies between machines.
    pub fn ambient() -> Self {
        Self::new(Locale::ambient(), Zone::Local)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Render `input`, or [`INVALID_DATE`] if it is not a date. Never fails.
    pub fn format(&self, input: impl Into<DateInput>) -> FormattedDate {
        self.try_format(input).unwrap_or_else(|err| {
            trace!(error = %err, "rendering invalid date sentinel");
            FormattedDate::invalid()
        })
    }

    pub fn try_format(&self, input: impl Into<DateInput>) -> Result<FormattedDate, DateError> {
        let input = input.into();
        let instant = input
            .resolve(&self.zone)
            .ok_or_else(|| DateError::InvalidDateInput {
                input: describe(&input),
            })?;
        Ok(FormattedDate(self.zone.render(&instant, self.locale.pattern())))
    }
}

fn describe(input: &DateInput) -> String {
    match input {
        DateInput::Timestamp(ms) => ms.to_string(),
        DateInput::Text(text) => text.clone(),
        DateInput::DateTime(dt) => dt.to_rfc3339(),
        DateInput::Invalid => "<not a date>".to_string(),
    }
}
