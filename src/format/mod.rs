pub mod formatter;
pub mod input;
pub mod locale;
pub mod zone;

pub use formatter::{DateError, DateFormatter, FormattedDate, INVALID_DATE};
pub use input::DateInput;
pub use locale::Locale;
pub use zone::{wall_clock_to_utc, Zone};

/// Format a date with the ambient locale and time zone.
///
/// The result is not reproducible across machines: it depends on the
/// process locale variables and `TZ`. Input that is not a date renders as
/// [`INVALID_DATE`] rather than failing.
pub fn format_date(input: impl Into<DateInput>) -> FormattedDate {
    DateFormatter::ambient().format(input)
}

/// Like [`format_date`], but reports invalid input as an error.
pub fn try_format_date(input: impl Into<DateInput>) -> Result<FormattedDate, DateError> {
    DateFormatter::ambient().try_format(input)
}
