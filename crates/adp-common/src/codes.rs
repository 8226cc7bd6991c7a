use std::fmt;

use serde::{Deserialize, Serialize};

/// An enumerated value as ADP encodes it.
///
/// Gender, ethnicity, status and reason codes all share this shape. Each
/// member is optional because the API omits whichever labels it has no
/// value for, but a member that is present must be a string.
///
/// # Examples
///
/// ```
/// use adp_common::CodeValue;
///
/// let code: CodeValue =
///     serde_json::from_str(r#"{"codeValue": "F", "shortName": "Female"}"#).unwrap();
/// assert_eq!(code.code(), Some("F"));
/// assert_eq!(code.label(), Some("Female"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeValue {
    /// Machine-readable code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_value: Option<String>,
    /// Short display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Long display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
}

impl CodeValue {
    /// Creates a code value with only the code set.
    pub fn new(code_value: impl Into<String>) -> Self {
        Self {
            code_value: Some(code_value.into()),
            ..Self::default()
        }
    }

    /// Sets the short label.
    #[must_use]
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    /// Sets the long label.
    #[must_use]
    pub fn with_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.long_name = Some(long_name.into());
        self
    }

    /// The machine-readable code, if any.
    pub fn code(&self) -> Option<&str> {
        non_empty(self.code_value.as_deref())
    }

    /// The best display label: the long name, falling back to the short name.
    pub fn label(&self) -> Option<&str> {
        non_empty(self.long_name.as_deref()).or_else(|| non_empty(self.short_name.as_deref()))
    }

    /// Returns `true` when the code equals `code` exactly.
    pub fn is(&self, code: &str) -> bool {
        self.code() == Some(code)
    }
}

impl fmt::Display for CodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.label(), self.code()) {
            (Some(label), _) => write!(f, "{label}"),
            (None, Some(code)) => write!(f, "{code}"),
            (None, None) => Ok(()),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
