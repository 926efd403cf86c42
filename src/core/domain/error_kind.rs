use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Hierarchical error tag such as `command.already_exists`.
///
/// A kind is-a another kind when both are equal or when the other one is a
/// dot-separated prefix of it, so `command.already_exists` is-a `command`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct ErrorKind(Cow<'static, str>);

impl ErrorKind {
    /// Builds a kind from a literal. The literal is trusted to be well formed.
    pub const fn from_static(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives a sub-kind, e.g. `command` + `not_found`.
    pub fn child(&self, segment: &str) -> Self {
        Self(Cow::Owned(format!("{}.{}", self.0, segment)))
    }

    pub fn is_a(&self, other: &ErrorKind) -> bool {
        let (this, other) = (self.as_str(), other.as_str());
        match this.strip_prefix(other) {
            Some("") => true,
            Some(rest) => rest.starts_with('.'),
            None => false,
        }
    }

    /// Tells whether this kind is-a any of the given kinds.
    pub fn matches_any(&self, kinds: &[ErrorKind]) -> bool {
        kinds.iter().any(|kind| self.is_a(kind))
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ErrorKindParseError {
    #[error("error kind must not be empty")]
    Empty,
    #[error("invalid error kind segment in '{0}'")]
    InvalidSegment(String),
}

impl FromStr for ErrorKind {
    type Err = ErrorKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl TryFrom<String> for ErrorKind {
    type Error = ErrorKindParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ErrorKindParseError::Empty);
        }
        let well_formed = value.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
        });
        if !well_formed {
            return Err(ErrorKindParseError::InvalidSegment(value));
        }
        Ok(Self(Cow::Owned(value)))
    }
}

/// Errors that can be matched against no-rollback lists.
pub trait Classify {
    fn kind(&self) -> ErrorKind;
}
