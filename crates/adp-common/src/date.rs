use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when a date string is not `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DateError {
    /// The string did not split into exactly three `-` separated parts.
    #[error("expected YYYY-MM-DD, got '{0}'")]
    WrongComponentCount(String),

    /// One of the parts was empty or contained something other than digits.
    #[error("date component '{component}' in '{input}' is not numeric")]
    NonNumeric {
        /// The whole input string.
        input: String,
        /// The offending component.
        component: String,
    },
}

/// A calendar date kept as the three string components ADP sends.
///
/// Components keep their original zero padding, so formatting a parsed date
/// reproduces the input.
///
/// # Examples
///
/// ```
/// use adp_common::WorkerDate;
///
/// let date: WorkerDate = "2020-03-15".parse().unwrap();
/// assert_eq!(date.year, "2020");
/// assert_eq!(date.month, "03");
/// assert_eq!(date.day, "15");
/// assert_eq!(date.to_string(), "2020-03-15");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkerDate {
    /// Four digit year.
    pub year: String,
    /// Two digit month.
    pub month: String,
    /// Two digit day of month.
    pub day: String,
}

impl WorkerDate {
    /// Parses a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns [`DateError`] unless the input splits on `-` into exactly
    /// three non-empty numeric components.
    pub fn parse(input: &str) -> Result<Self, DateError> {
        let parts: Vec<&str> = input.split('-').collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(DateError::WrongComponentCount(input.to_string()));
        };

        for component in [year, month, day] {
            if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(DateError::NonNumeric {
                    input: input.to_string(),
                    component: (*component).to_string(),
                });
            }
        }

        Ok(Self {
            year: (*year).to_string(),
            month: (*month).to_string(),
            day: (*day).to_string(),
        })
    }

    /// Converts to a [`NaiveDate`], or `None` when the components do not name
    /// a real calendar day (e.g. `2021-02-30`).
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            self.year.parse().ok()?,
            self.month.parse().ok()?,
            self.day.parse().ok()?,
        )
    }
}

impl fmt::Display for WorkerDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

impl FromStr for WorkerDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WorkerDate {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WorkerDate> for String {
    fn from(date: WorkerDate) -> Self {
        date.to_string()
    }
}

/// Serde adapter for optional date fields.
///
/// A missing field, `null`, or an empty string all decode as `None`; anything
/// else must be a valid `YYYY-MM-DD` date or the decode fails.
pub(crate) mod optional {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::WorkerDate;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<WorkerDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.is_empty() => Ok(None),
            Some(raw) => WorkerDate::parse(&raw).map(Some).map_err(D::Error::custom),
        }
    }

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(date: &Option<WorkerDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        date.as_ref().map(ToString::to_string).serialize(serializer)
    }
}
