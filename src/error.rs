//! # Error Types
//!
//! This module defines the error types used throughout the library.
//! All operations return [`Result<T, BullcryptError>`](BullcryptError).
//!
//! The variants split into two groups:
//!
//! - **Fatal at setup**: [`BullcryptError::Configuration`] raised while building
//!   [`Options`](crate::Options) or extracting algorithm arguments aborts a run
//!   before any file is touched.
//! - **Recovered**: everything else is caught at the narrowest boundary that can
//!   continue (line, unit, file, directory entry, input path) and never aborts
//!   unrelated work. See [`BullcryptError::is_recoverable`].

use std::path::PathBuf;
use thiserror::Error;

/// The error type for all extraction, decryption, and traversal operations.
#[derive(Error, Debug)]
pub enum BullcryptError {
    /// Invalid or missing configuration.
    ///
    /// Raised for unknown extraction modes, unknown plaintext or text encodings,
    /// and algorithm arguments that fail validation (e.g. no keys supplied).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The on-disk representation of a unit could not be pre-decoded.
    ///
    /// Examples: malformed base64 on a line, a file that is not valid in the
    /// selected text codec, text that cannot be represented in that codec.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The algorithm options carried on [`Options`](crate::Options) do not have
    /// the shape the selected algorithm requires.
    #[error("Algorithm options error: {0}")]
    AlgorithmOptionsType(String),

    /// A single decryption candidate failed.
    ///
    /// Deliberately carries no detail about *which* check failed (key format,
    /// token structure, MAC, padding).
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// Every candidate in a decryption group failed.
    #[error("Decryption group exhausted after {attempts} candidate(s)")]
    GroupExhausted {
        /// Number of candidates that were tried.
        attempts: usize,
    },

    /// Enumerating a directory entry failed.
    #[error("Traversal error at {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Reading a file failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BullcryptError {
    /// Whether this error kind is one the pipeline recovers from.
    ///
    /// Only [`BullcryptError::Configuration`] is fatal, and only when raised
    /// during setup; once processing has started it is isolated like any other.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, BullcryptError::Configuration(_))
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BullcryptError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_kind() {
        let err = BullcryptError::Configuration("Unknown mode bogus".into());
        assert_eq!(err.to_string(), "Configuration error: Unknown mode bogus");

        let err = BullcryptError::GroupExhausted { attempts: 3 };
        assert_eq!(
            err.to_string(),
            "Decryption group exhausted after 3 candidate(s)"
        );
    }

    #[test]
    fn only_configuration_is_fatal() {
        assert!(!BullcryptError::Configuration(String::new()).is_recoverable());
        assert!(BullcryptError::Extraction(String::new()).is_recoverable());
        assert!(BullcryptError::Decryption(String::new()).is_recoverable());
        assert!(BullcryptError::AlgorithmOptionsType(String::new()).is_recoverable());
        assert!(BullcryptError::GroupExhausted { attempts: 0 }.is_recoverable());
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(BullcryptError::io("missing", io).is_recoverable());
    }
}
