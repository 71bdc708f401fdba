//! Content validation utilities.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

use super::model::ContentInput;

/// Maximum body length, counted in characters.
pub const MAX_BODY_LENGTH: usize = 500;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Category must not be blank")]
    BlankCategory,
    #[error("Content must not be blank")]
    BlankBody,
    #[error("Media must not be blank")]
    BlankMedia,
    #[error("Content length exceeds the limit of 500 characters")]
    BodyTooLong,
    #[error("Invalid category string")]
    EmptyCategory,
    #[error("At least one of startDate or endDate must be provided")]
    MissingDateRange,
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Validate the writable fields of a content record.
pub fn validate_content_fields(input: &ContentInput) -> Result<(), ValidationError> {
    if is_blank(&input.category) {
        return Err(ValidationError::BlankCategory);
    }
    if is_blank(&input.body) {
        return Err(ValidationError::BlankBody);
    }
    if is_blank(&input.media) {
        return Err(ValidationError::BlankMedia);
    }
    if input.body.chars().count() > MAX_BODY_LENGTH {
        return Err(ValidationError::BodyTooLong);
    }
    Ok(())
}

/// Only the empty string is rejected; whitespace is a legal category filter.
pub fn validate_category_filter(category: &str) -> Result<(), ValidationError> {
    if category.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    Ok(())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Inclusive creation-time window derived from calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Resolve an optional pair of `YYYY-MM-DD` dates into a UTC window.
    ///
    /// A missing bound takes the value of the other one. The window starts at
    /// midnight of the first day and ends at 23:59:59 of the last day.
    pub fn resolve(start: Option<&str>, end: Option<&str>) -> Result<Self, ValidationError> {
        let start = start.map(parse_date).transpose()?;
        let end = end.map(parse_date).transpose()?;

        let (first, last) = match (start, end) {
            (None, None) => return Err(ValidationError::MissingDateRange),
            (Some(start), None) => (start, start),
            (None, Some(end)) => (end, end),
            (Some(start), Some(end)) => (start, end),
        };

        Ok(Self {
            start: first.and_time(NaiveTime::MIN).and_utc(),
            end: last.and_time(end_of_day()).and_utc(),
        })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).expect("23:59:59 is a valid time of day")
}
