//! Error types for PRCD Core
//!
//! This module defines all error types used by the loader and the grimoire.
//! We use `thiserror` for ergonomic error definitions with automatic Display/Error implementations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for PRCD operations
pub type Result<T> = std::result::Result<T, PrcdError>;

/// Main error type for PRCD operations
#[derive(Error, Debug)]
pub enum PrcdError {
    /// Loading the prcd directory failed
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Requested section is not in the grimoire
    #[error("Section {0} does not exist")]
    SectionNotFound(String),

    /// Section exists but holds no entries
    #[error("Section {0} has no entries")]
    EmptySection(String),

    /// No sections loaded at all
    #[error("Grimoire has no sections")]
    EmptyGrimoire,

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        source: Box<PrcdError>,
    },
}

/// Errors raised while scanning and parsing a prcd directory
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Cannot scan directory: {0}")]
    Scan(#[from] glob::GlobError),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed prcd file name: {0}")]
    MalformedFileName(PathBuf),

    #[error("Continuation line without a preceding entry at {path}:{line}")]
    OrphanContinuation { path: PathBuf, line: usize },
}

impl PrcdError {
    /// Add context to an error
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether the error means "no such section", looking through context
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::SectionNotFound(_) => true,
            Self::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add lazy context to a Result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<PrcdError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context() {
        let err = PrcdError::SectionNotFound("love".to_string());
        let err = err.context("Failed to pick moccolo");

        assert!(err.to_string().contains("Failed to pick moccolo"));
        assert!(err.to_string().contains("love"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_result_ext() {
        let result: std::result::Result<(), LoadError> =
            Err(LoadError::NotADirectory(PathBuf::from("/nope")));
        let result = result.with_context(|| "Loading prcd".to_string());

        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("Loading prcd"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_empty_errors_are_not_not_found() {
        assert!(!PrcdError::EmptyGrimoire.is_not_found());
        assert!(!PrcdError::EmptySection("x".into()).is_not_found());
    }
}
