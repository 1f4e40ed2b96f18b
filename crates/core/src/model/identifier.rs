use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reasons an identifier is rejected at quiz start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdentifierError {
    #[error("identifier must not be empty")]
    Empty,

    #[error("identifier must not contain whitespace")]
    Whitespace,

    #[error("identifier must contain '@'")]
    MissingAt,

    #[error("identifier must contain exactly one '@'")]
    MultipleAt,

    #[error("identifier needs text before '@'")]
    EmptyLocalPart,

    #[error("identifier domain needs a '.' with text on both sides")]
    MissingDomainDot,
}

/// A well-formed participant identifier of the shape `local@domain.tld`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier(String);

impl Identifier {
    /// Validate and wrap an identifier.
    ///
    /// The rule: one `@`, a non-empty local part, no whitespace anywhere, and a
    /// `.` in the domain with at least one character on each side of it.
    ///
    /// # Errors
    ///
    /// Returns the first `IdentifierError` the input violates.
    pub fn parse(raw: impl Into<String>) -> Result<Self, IdentifierError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(IdentifierError::Empty);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(IdentifierError::Whitespace);
        }

        let Some((local, domain)) = raw.split_once('@') else {
            return Err(IdentifierError::MissingAt);
        };
        if domain.contains('@') {
            return Err(IdentifierError::MultipleAt);
        }
        if local.is_empty() {
            return Err(IdentifierError::EmptyLocalPart);
        }
        if !has_inner_dot(domain) {
            return Err(IdentifierError::MissingDomainDot);
        }

        Ok(Self(raw))
    }

    /// Pure predicate form of [`Identifier::parse`].
    #[must_use]
    pub fn is_well_formed(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn has_inner_dot(domain: &str) -> bool {
    let chars: Vec<char> = domain.chars().collect();
    if chars.len() < 3 {
        return false;
    }
    chars[1..chars.len() - 1].contains(&'.')
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
