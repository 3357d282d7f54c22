//! Timestamp values that remember the pattern they were written with.

mod pattern;

pub use pattern::FormatPattern;

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};

use crate::error::TimestampError;

/// A date-time paired with the format pattern used to write it back out.
///
/// The pattern travels with the value, so a timestamp read with
/// [`TimestampValue::parse`] renders to the exact text it was read from.
///
/// # Example
///
/// ```
/// use folio_domain::TimestampValue;
///
/// let published = TimestampValue::parse("2020-01-02", "YYYY-MM-DD").unwrap();
/// assert_eq!(published.render().unwrap(), "2020-01-02");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampValue {
    datetime: DateTime<FixedOffset>,
    format: String,
}

impl TimestampValue {
    /// Creates a timestamp rendered with `format`.
    ///
    /// The pattern is validated when the value is rendered.
    pub fn new(datetime: DateTime<FixedOffset>, format: impl Into<String>) -> Self {
        Self {
            datetime,
            format: format.into(),
        }
    }

    /// Creates a timestamp for midnight UTC on `date`.
    pub fn from_date(date: NaiveDate, format: impl Into<String>) -> Self {
        Self::new(date.and_time(NaiveTime::MIN).and_utc().fixed_offset(), format)
    }

    /// Parses `input` with the moment-style pattern `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid or the text does not
    /// match it.
    pub fn parse(input: &str, format: impl Into<String>) -> Result<Self, TimestampError> {
        let format = format.into();
        let datetime = FormatPattern::compile(&format)?.parse(input)?;
        Ok(Self { datetime, format })
    }

    /// Returns the date-time.
    #[must_use]
    pub const fn datetime(&self) -> &DateTime<FixedOffset> {
        &self.datetime
    }

    /// Returns the format pattern.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Renders the value with its own pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty or uses an unsupported token.
    pub fn render(&self) -> Result<String, TimestampError> {
        FormatPattern::compile(&self.format)?.render(&self.datetime)
    }
}

impl fmt::Display for TimestampValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{}", self.datetime.to_rfc3339()),
        }
    }
}
