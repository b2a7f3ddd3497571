//! Compiled path patterns.
//!
//! A [`PathPattern`] is parsed once at registration time into a segment list;
//! matching is a pure walk over that list. Empty segments are filtered on both
//! sides, so trailing slashes are normalized away.

use crate::params::Params;

/// One parsed pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Static segment matched verbatim (e.g. `apples`).
    Literal(String),
    /// Named capture of exactly one segment (e.g. `:id`).
    Param(String),
    /// Trailing catch-all capturing the remainder of the path (e.g. `*rest`).
    Wildcard(String),
}

/// A compiled path pattern.
///
/// Supports literal segments, `:name` captures and a trailing `*name`
/// catch-all. Patterns are compiled at registration time; matching never
/// allocates beyond the captured parameter values.
///
/// # Example
///
/// ```rust
/// use hermes_router::PathPattern;
///
/// let pattern = PathPattern::compile("/orchards/:orchard/apples/:id");
/// let params = pattern.matches("/orchards/north/apples/3444").unwrap();
///
/// assert_eq!(params.get("orchard"), Some("north"));
/// assert_eq!(params.get("id"), Some("3444"));
/// ```
///
/// # Panics
///
/// `compile` panics on malformed patterns: a `:` segment with no name, a `*`
/// segment with no name, or a `*` segment anywhere but the last position.
/// Patterns are programmer input supplied at registration time, so a bad one
/// is a bug in the calling code, not a runtime condition.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compiles a pattern string into a matchable form.
    #[must_use]
    pub fn compile(pattern: &str) -> Self {
        let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
        let mut segments = Vec::with_capacity(parts.len());

        for (index, part) in parts.iter().enumerate() {
            if let Some(name) = part.strip_prefix(':') {
                assert!(
                    !name.is_empty(),
                    "path parameter in pattern `{pattern}` must have a name"
                );
                segments.push(Segment::Param(name.to_string()));
            } else if let Some(name) = part.strip_prefix('*') {
                assert!(
                    !name.is_empty(),
                    "catch-all in pattern `{pattern}` must have a name"
                );
                assert!(
                    index == parts.len() - 1,
                    "catch-all must be the last segment in pattern `{pattern}`"
                );
                segments.push(Segment::Wildcard(name.to_string()));
            } else {
                segments.push(Segment::Literal((*part).to_string()));
            }
        }

        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    /// Returns the pattern string this was compiled from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Matches a concrete path exactly against this pattern.
    ///
    /// Returns the captured parameters on a match, `None` otherwise. The path
    /// must not carry a query suffix; stripping it is the caller's job.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Params> {
        self.match_segments(path, false)
    }

    /// Matches a concrete path against this pattern as a prefix.
    ///
    /// Every pattern segment must be consumed, but the path may continue with
    /// further segments beneath it. This is the middleware mode: a pattern
    /// registered as `/apples` accepts `/apples`, `/apples/3444` and anything
    /// deeper, but not `/apple-crates`.
    #[must_use]
    pub fn matches_prefix(&self, path: &str) -> Option<Params> {
        self.match_segments(path, true)
    }

    fn match_segments(&self, path: &str, allow_trailing: bool) -> Option<Params> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut params = Params::new();
        let mut index = 0;

        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => {
                    if *parts.get(index)? != literal.as_str() {
                        return None;
                    }
                    index += 1;
                }
                Segment::Param(name) => {
                    let value = *parts.get(index)?;
                    params.push(name.clone(), value.to_string());
                    index += 1;
                }
                Segment::Wildcard(name) => {
                    params.push(name.clone(), parts[index..].join("/"));
                    return Some(params);
                }
            }
        }

        if allow_trailing || index == parts.len() {
            Some(params)
        } else {
            None
        }
    }
}
