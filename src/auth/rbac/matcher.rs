//! Path-template matching
//!
//! Segment-wise comparison of concrete request paths against stored route
//! patterns. Literal segments match case-sensitively; `:name` segments match
//! any single non-empty segment.

use thiserror::Error;

/// Error raised when a stored pattern cannot be interpreted
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,
    #[error("pattern must start with '/'")]
    MissingLeadingSlash,
    #[error("pattern contains an empty segment")]
    EmptySegment,
    #[error("parameter segment is missing a name")]
    UnnamedParameter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Parameter,
}

/// A parsed route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a stored pattern string.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        let rest = pattern
            .strip_prefix('/')
            .ok_or(PatternError::MissingLeadingSlash)?;
        // A single trailing slash is tolerated, both here and on paths.
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let mut segments = Vec::new();
        if rest.is_empty() {
            return Ok(Self { segments });
        }
        for raw in rest.split('/') {
            if raw.is_empty() {
                return Err(PatternError::EmptySegment);
            }
            if let Some(name) = raw.strip_prefix(':') {
                if name.is_empty() {
                    return Err(PatternError::UnnamedParameter);
                }
                segments.push(Segment::Parameter);
            } else {
                segments.push(Segment::Literal(raw.to_string()));
            }
        }
        Ok(Self { segments })
    }

    /// Test a request path (already query-stripped) against this pattern.
    pub fn matches(&self, path: &str) -> bool {
        let Some(rest) = path.strip_prefix('/') else {
            return false;
        };
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        let path_segments: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };

        if path_segments.len() != self.segments.len() {
            return false;
        }
        self.segments
            .iter()
            .zip(path_segments)
            .all(|(segment, actual)| match segment {
                Segment::Literal(literal) => literal == actual,
                Segment::Parameter => !actual.is_empty(),
            })
    }
}

/// Strip the query component from a raw request path and trim whitespace.
pub fn strip_query(path: &str) -> &str {
    let path = match path.find('?') {
        Some(index) => &path[..index],
        None => path,
    };
    path.trim()
}
