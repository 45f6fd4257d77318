//! Error types for descriptor parsing and build failure classification.

use thiserror::Error;

/// Build failure categories.
///
/// Every error surfaced by a build maps onto exactly one kind. The code is
/// printed by the CLI so failures can be grepped for in build logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// E001: Malformed descriptor or metadata document
    Parse,
    /// E002: Missing bucket or referenced key
    NotFound,
    /// E003: Frame index beyond the resolved frame grid
    IndexOutOfRange,
    /// E004: Filesystem or store failure
    Io,
    /// E005: Unexpected directory where a file was required
    Structural,
}

impl ErrorKind {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Parse => "E001",
            ErrorKind::NotFound => "E002",
            ErrorKind::IndexOutOfRange => "E003",
            ErrorKind::Io => "E004",
            ErrorKind::Structural => "E005",
        }
    }

    /// Returns a short lowercase name for the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Parse => "parse",
            ErrorKind::NotFound => "not_found",
            ErrorKind::IndexOutOfRange => "index_out_of_range",
            ErrorKind::Io => "io",
            ErrorKind::Structural => "structural",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors produced while parsing or validating a source document.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The document is not valid YAML or does not match the expected shape.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed but a value violates a descriptor invariant.
    #[error("{context}: {message}")]
    Invalid {
        /// Which entry the problem belongs to (e.g. `animation 'walk'`).
        context: String,
        /// What is wrong with it.
        message: String,
    },
}

impl SpecError {
    /// Creates a validation error for the given entry.
    pub fn invalid(context: impl Into<String>, message: impl Into<String>) -> Self {
        SpecError::Invalid {
            context: context.into(),
            message: message.into(),
        }
    }
}
