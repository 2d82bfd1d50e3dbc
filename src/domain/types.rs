//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, the dashed
//! customer id format, sanitized display text) so that once a value reaches
//! the domain layer it can be treated as trusted.
use std::ops::Deref;

use ammonia;
use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Customer id is not ten digits in `123-456-7890` form.
    #[error("invalid customer id")]
    InvalidCustomerId,
    /// Provided url failed format validation.
    #[error("invalid url address")]
    InvalidUrl,
    /// Range start lies after its end.
    #[error("date range start must not be after its end")]
    InvalidDateRange,
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(AccountId, "Unique identifier for a linked ads account.");
id_newtype!(CampaignId, "Unique identifier for a campaign.");
id_newtype!(AdGroupId, "Unique identifier for an ad group.");
id_newtype!(AdId, "Unique identifier for an ad.");
id_newtype!(KeywordId, "Unique identifier for a keyword.");
id_newtype!(AudienceId, "Unique identifier for an audience segment.");
id_newtype!(
    RecommendationId,
    "Unique identifier for an optimization recommendation."
);

/// Ten-digit Google Ads customer id, normalized to `123-456-7890` form.
///
/// Dashes in the input are optional; anything that does not reduce to exactly
/// ten ASCII digits is rejected.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CustomerId(String);

impl CustomerId {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        let digits: String = trimmed.chars().filter(|c| *c != '-').collect();
        if digits.len() != 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(TypeConstraintError::InvalidCustomerId);
        }
        Ok(Self(format!(
            "{}-{}-{}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..10]
        )))
    }

    /// Borrow the dashed representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CustomerId {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CustomerId {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CustomerId> for String {
    fn from(value: CustomerId) -> Self {
        value.0
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(
    AccountName,
    "Display name of a linked account enforcing non-empty values."
);

/// Free text originating outside the backend (AI recommendations), stripped of
/// markup before it can reach a browser.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SanitizedText(String);

impl SanitizedText {
    /// Constructs a sanitized, trimmed, non-empty value.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = ammonia::clean(&value.into());
        let inner = NonEmptyString::new(sanitized)?;
        Ok(Self(inner.into_inner()))
    }

    /// Borrow the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for SanitizedText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SanitizedText {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for SanitizedText {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SanitizedText> for String {
    fn from(value: SanitizedText) -> Self {
        value.0
    }
}

/// Sanitizes optional display text, dropping values that clean down to
/// nothing.
pub fn sanitize_opt(value: Option<String>) -> Option<String> {
    value
        .map(|s| ammonia::clean(&s).trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Validated landing page URL of an ad.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FinalUrl(String);

impl FinalUrl {
    /// Ensures a trimmed URL is non-empty and well formed before wrapping.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let url = NonEmptyString::new(value)?;

        if !url.as_str().validate_url() {
            Err(TypeConstraintError::InvalidUrl)
        } else {
            Ok(Self(url.into_inner()))
        }
    }

    /// Borrow the URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the owned URL.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for FinalUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for FinalUrl {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for FinalUrl {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FinalUrl> for String {
    fn from(value: FinalUrl) -> Self {
        value.0
    }
}

/// Inclusive calendar date window used by every metrics query.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Builds a range ensuring `from <= to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, TypeConstraintError> {
        if from > to {
            return Err(TypeConstraintError::InvalidDateRange);
        }
        Ok(Self { from, to })
    }

    /// The trailing window ending today, `days` long. The dashboard default is
    /// [`DateRange::last_30_days`].
    pub fn last_days(days: u32) -> Self {
        let to = Utc::now().date_naive();
        let from = to
            .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(to);
        Self { from, to }
    }

    pub fn last_30_days() -> Self {
        Self::last_days(30)
    }

    pub const fn from(&self) -> NaiveDate {
        self.from
    }

    pub const fn to(&self) -> NaiveDate {
        self.to
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Day count of the window, inclusive on both ends.
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_id_accepts_dashed_and_plain_digits() {
        let dashed = CustomerId::new("123-456-7890").unwrap();
        let plain = CustomerId::new(" 1234567890 ").unwrap();
        assert_eq!(dashed, plain);
        assert_eq!(dashed.as_str(), "123-456-7890");
    }

    #[test]
    fn customer_id_rejects_wrong_lengths_and_letters() {
        assert_eq!(
            CustomerId::new("123-456-789"),
            Err(TypeConstraintError::InvalidCustomerId)
        );
        assert_eq!(
            CustomerId::new("123-456-78901"),
            Err(TypeConstraintError::InvalidCustomerId)
        );
        assert_eq!(
            CustomerId::new("abc-def-ghij"),
            Err(TypeConstraintError::InvalidCustomerId)
        );
        assert_eq!(CustomerId::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn sanitized_text_strips_markup() {
        let text = SanitizedText::new("<script>alert(1)</script>Raise the budget").unwrap();
        assert_eq!(text.as_str(), "Raise the budget");
        assert!(SanitizedText::new("<script>alert(1)</script>").is_err());
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        let from = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        assert_eq!(
            DateRange::new(from, to),
            Err(TypeConstraintError::InvalidDateRange)
        );
        assert!(DateRange::new(to, from).is_ok());
    }

    #[test]
    fn last_30_days_spans_thirty_dates_inclusive() {
        let range = DateRange::last_30_days();
        assert_eq!(range.days(), 30);
        assert!(range.contains(range.from()));
        assert!(range.contains(range.to()));
    }

    #[test]
    fn single_day_range_counts_one_day() {
        let day = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let range = DateRange::new(day, day).unwrap();
        assert_eq!(range.days(), 1);
    }
}
