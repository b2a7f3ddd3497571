//! Case-normalized header map.
//!
//! Header keys are folded to ASCII lower-case at every insertion and lookup
//! boundary, so the two endpoints of a dispatch agree on one canonical form
//! regardless of how callers spell their header names.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Folds a header name to its canonical form.
fn normalize(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// A string-to-string header map with case-insensitive keys.
///
/// Keys are normalized to lower-case on insertion, lookup and
/// deserialization. Iteration order is the sorted key order, which keeps
/// serialized output deterministic.
///
/// # Example
///
/// ```
/// use hermes_core::Headers;
///
/// let mut headers = Headers::new();
/// headers.set("Content-Type", "application/json");
///
/// assert_eq!(headers.get("content-type"), Some("application/json"));
/// assert!(headers.contains("CONTENT-TYPE"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Headers {
    inner: BTreeMap<String, String>,
}

impl Headers {
    /// Creates a new empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header, replacing any previous value under the same
    /// (case-insensitive) name.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.inner.insert(normalize(name.as_ref()), value.into());
    }

    /// Returns the value of a header, if present.
    #[must_use]
    pub fn get(&self, name: impl AsRef<str>) -> Option<&str> {
        self.inner
            .get(&normalize(name.as_ref()))
            .map(String::as_str)
    }

    /// Returns true if a header is present.
    #[must_use]
    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.inner.contains_key(&normalize(name.as_ref()))
    }

    /// Removes a header, returning its previous value.
    pub fn remove(&mut self, name: impl AsRef<str>) -> Option<String> {
        self.inner.remove(&normalize(name.as_ref()))
    }

    /// Returns true if no headers are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over the (name, value) pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Headers {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(name, value)| (normalize(&name), value))
                .collect(),
        }
    }
}

// Deserialization is an insertion boundary too: keys arriving from the wire
// are normalized like any other insert.
impl<'de> Deserialize<'de> for Headers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}
