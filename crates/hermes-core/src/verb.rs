//! The closed set of supported request methods.

use crate::HermesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported request method.
///
/// The set is closed: anything outside these five verbs fails request
/// validation rather than flowing through dispatch as an opaque string.
/// Input is case-insensitive; the canonical (stored and serialized) form is
/// lower-case.
///
/// # Example
///
/// ```
/// use hermes_core::Verb;
///
/// assert_eq!(Verb::parse("GET"), Some(Verb::Get));
/// assert_eq!(Verb::Get.as_str(), "get");
/// assert_eq!(Verb::parse("options"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    /// Retrieve a resource.
    Get,
    /// Create a resource.
    Post,
    /// Replace a resource.
    Put,
    /// Partially update a resource.
    Patch,
    /// Remove a resource.
    Delete,
}

impl Verb {
    /// All supported verbs, in a stable order.
    pub const ALL: [Self; 5] = [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

    /// Parses a verb case-insensitively, returning `None` for anything
    /// outside the supported set.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "patch" => Some(Self::Patch),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Returns the canonical lower-case form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = HermesError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            HermesError::validation(format!(
                "request method '{value}' is not one of get, post, put, patch, delete"
            ))
        })
    }
}
