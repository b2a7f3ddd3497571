//! Path pattern matching for the Hermes request router.
//!
//! This crate is the "path matcher" capability the dispatch engine consumes:
//! given a pattern containing literal segments, named captures and an optional
//! trailing catch-all, and a concrete request path, it either returns the
//! captured parameters or reports no match. It knows nothing about methods,
//! handlers or dispatch order.
//!
//! # Pattern syntax
//!
//! - Literal segments match verbatim: `/apples/export`
//! - A segment prefixed `:` captures the corresponding path segment under
//!   that name: `/apples/:id`
//! - A trailing segment prefixed `*` captures the remainder of the path:
//!   `/files/*rest`
//!
//! # Example
//!
//! ```rust
//! use hermes_router::PathPattern;
//!
//! let pattern = PathPattern::compile("/apples/:id");
//!
//! let params = pattern.matches("/apples/3444").unwrap();
//! assert_eq!(params.get("id"), Some("3444"));
//!
//! assert!(pattern.matches("/pears/3444").is_none());
//! ```
//!
//! Middleware patterns use [`PathPattern::matches_prefix`], which accepts any
//! path that extends the pattern with further segments.

mod params;
mod pattern;

pub use params::Params;
pub use pattern::PathPattern;
