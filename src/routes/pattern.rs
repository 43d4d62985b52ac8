//! Segment-based path pattern matching
//!
//! Declared paths are split on `/` into segments:
//! 1. Literal: `users` matches exactly `users` (case-sensitive)
//! 2. Parameter: `:id` matches any single non-empty segment
//!
//! Matching is anchored and a pattern only matches paths with the same
//! number of segments.

use indexmap::IndexMap;
use regex::Regex;

use crate::error::{NavError, Result};

/// One token of a declared path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// A declared path, tokenized once and matched many times
///
/// # Examples
///
/// ```
/// use route_authz::PathPattern;
///
/// let pattern = PathPattern::new("/users/:id");
/// assert!(pattern.matches("/users/42"));
/// assert!(!pattern.matches("/users/42/edit"));
///
/// let params = pattern.captures("/users/42").unwrap();
/// assert_eq!(params["id"], "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn new(declared: impl Into<String>) -> Self {
        let raw = declared.into();
        let segments = raw
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(segment.to_string()),
            })
            .collect();

        Self { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of parameter segments
    pub fn param_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Param(_)))
            .count()
    }

    /// Checks whether `candidate` matches this pattern in full
    pub fn matches(&self, candidate: &str) -> bool {
        let mut parts = candidate.split('/');

        for segment in &self.segments {
            let Some(part) = parts.next() else {
                return false;
            };
            let ok = match segment {
                Segment::Literal(literal) => literal == part,
                Segment::Param(_) => !part.is_empty(),
            };
            if !ok {
                return false;
            }
        }

        parts.next().is_none()
    }

    /// Matches `candidate` and returns the parameter values by name
    pub fn captures(&self, candidate: &str) -> Option<IndexMap<String, String>> {
        if !self.matches(candidate) {
            return None;
        }

        let params = self
            .segments
            .iter()
            .zip(candidate.split('/'))
            .filter_map(|(segment, part)| match segment {
                Segment::Param(name) => Some((name.clone(), part.to_string())),
                Segment::Literal(_) => None,
            })
            .collect();

        Some(params)
    }

    /// Validates the declaration against load-time rules
    ///
    /// # Errors
    ///
    /// Returns `NavError::InvalidPattern` if:
    /// - The path does not start with `/`
    /// - A parameter segment does not match `param_name`
    /// - The same parameter name appears twice
    pub fn validate(&self, param_name: &Regex) -> Result<()> {
        if !self.raw.starts_with('/') {
            return Err(self.invalid("path must start with '/'"));
        }

        let mut seen = Vec::new();
        for segment in &self.segments {
            if let Segment::Param(name) = segment {
                if !param_name.is_match(&format!(":{}", name)) {
                    return Err(self.invalid(&format!("invalid parameter segment ':{}'", name)));
                }
                if seen.contains(&name) {
                    return Err(self.invalid(&format!("duplicate parameter ':{}'", name)));
                }
                seen.push(name);
            }
        }

        Ok(())
    }

    fn invalid(&self, reason: &str) -> NavError {
        NavError::InvalidPattern {
            pattern: self.raw.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Checks if `candidate` matches the `declared` path pattern
///
/// # Examples
///
/// ```
/// use route_authz::matches_path;
///
/// assert!(matches_path("/users/42", "/users/:id"));
/// assert!(matches_path("/users", "/users"));
/// assert!(!matches_path("/Users", "/users"));
/// assert!(!matches_path("/users/", "/users/:id"));
/// ```
pub fn matches_path(candidate: &str, declared: &str) -> bool {
    PathPattern::new(declared).matches(candidate)
}
