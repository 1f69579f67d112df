/*!
 * Error types for the lingua-link library.
 *
 * This module contains custom error types for validation, template helpers
 * and the record store, using the thiserror crate for ergonomic error
 * definitions.
 *
 * "No translation found" is never an error: lookups return `Ok(None)` or an
 * empty collection. The error types below cover the failures that must block
 * a write or abort rendering.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors raised while validating a record before a write
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Another record already occupies the language slot under the same original
    #[error("Translation in language {language} for this object already exists")]
    DuplicateTranslation {
        /// Language code of the rejected write
        language: String,
    },

    /// Language code is not part of the configured language list
    #[error("Language {0} is not in the configured language list")]
    UnknownLanguage(String),

    /// translation_of must point to a record in the primary language
    #[error("translation_of must reference a primary-language record (record {target} is in {language})")]
    NonPrimaryTarget {
        /// Primary key of the rejected link target
        target: i64,
        /// Language of the rejected link target
        language: String,
    },

    /// translation_of points at a record that does not exist
    #[error("translation_of references missing record {0}")]
    MissingTarget(i64),
}

/// Errors raised by the template tag helpers
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The target object does not implement the multilingual capability
    #[error("Translated object must be multilingual")]
    NotMultilingual,

    /// Neither an explicit language nor a request was available
    #[error("Cannot resolve a language: no request in context and no language given")]
    MissingLanguageContext,

    /// Malformed tag syntax
    #[error("Invalid syntax for {tag}: {message}")]
    InvalidSyntax {
        /// Tag name as written in the template
        tag: String,
        /// What was wrong with it
        message: String,
    },

    /// Unexpected store failure during a lookup. Unlike a missing
    /// translation, this propagates to the caller.
    #[error("Translation lookup failed: {0}")]
    Lookup(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the record store
    #[error("Database error: {0}")]
    Database(String),

    /// Error validating a record write
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error from a template helper
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(error: rusqlite::Error) -> Self {
        Self::Database(error.to_string())
    }
}
