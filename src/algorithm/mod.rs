// src/algorithm/mod.rs

//! # Algorithm Contract
//!
//! An [`Algorithm`] enumerates decryption candidates; it never decides when
//! to stop or what to do with a failure. That policy belongs to the caller
//! (see [`Orchestrator`](crate::Orchestrator)), which pulls candidates from a
//! [`DecryptionGroup`] in order and stops at the first success.
//!
//! ## Shape
//!
//! - [`Algorithm::decrypt`] (required) returns a [`GroupFactory`]. Each call to
//!   [`GroupFactory::produce`] yields a *fresh* group for the same payload.
//! - [`Algorithm::extract_content`] defaults to [`extract_content`](crate::extract_content)
//!   driven by the run's [`Options`].
//! - [`Algorithm::register_args`] / [`Algorithm::extract_args`] declare and
//!   normalize per-algorithm configuration; both default to "nothing".

pub(crate) mod args;
pub mod fernet;
pub(crate) mod registry;

pub use args::{ArgSpec, ArgSurface, RawArgs};
pub use fernet::{Fernet, FernetKey, FernetOptions};
pub use registry::Registry;

use crate::error::BullcryptError;
use crate::extract::extract_content;
use crate::options::{AlgorithmOptions, Options};
use std::path::Path;

/// One attempt at decrypting one unit with one parameter set.
pub type Candidate<'a> = Box<dyn FnOnce() -> Result<Vec<u8>, BullcryptError> + 'a>;

/// Ordered, finite, single-pass sequence of candidates for one unit.
pub type DecryptionGroup<'a> = Box<dyn Iterator<Item = Candidate<'a>> + 'a>;

/// Lazy stream of ciphertext units extracted from one file.
pub type UnitStream<'a> = Box<dyn Iterator<Item = Result<Vec<u8>, BullcryptError>> + 'a>;

/// Zero-argument producer of decryption groups for one payload.
///
/// Producing a group can itself fail, e.g. when the algorithm options have the
/// wrong shape; such failures surface from [`produce`](Self::produce) before
/// any candidate exists.
pub struct GroupFactory<'a> {
    produce: Box<dyn Fn() -> Result<DecryptionGroup<'a>, BullcryptError> + 'a>,
}

impl<'a> GroupFactory<'a> {
    pub fn new<F>(produce: F) -> Self
    where
        F: Fn() -> Result<DecryptionGroup<'a>, BullcryptError> + 'a,
    {
        Self {
            produce: Box::new(produce),
        }
    }

    /// A factory whose groups contain no candidates.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(|| Ok(Box::new(std::iter::empty())))
    }

    pub fn produce(&self) -> Result<DecryptionGroup<'a>, BullcryptError> {
        (self.produce)()
    }
}

/// A named decryption scheme plugged into the pipeline.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: one instance is shared by every
/// unit of a run, possibly across threads with the `batch-ops` feature.
pub trait Algorithm: Send + Sync {
    /// Slice `path` into ciphertext units.
    fn extract_content<'a>(&'a self, path: &Path, options: &'a Options) -> UnitStream<'a> {
        Box::new(extract_content(
            path,
            options.mode(),
            options.plaintext_encoding(),
            options.text_encoding(),
        ))
    }

    /// Enumerate decryption candidates for `payload`.
    fn decrypt<'a>(&'a self, payload: &'a [u8], options: &'a Options) -> GroupFactory<'a>;

    /// Declare algorithm-specific configuration under the namespace `name`.
    fn register_args(&self, name: &str, surface: &mut ArgSurface) {
        let _ = (name, surface);
    }

    /// Validate and normalize the values collected for the arguments declared
    /// in [`register_args`](Self::register_args).
    ///
    /// # Errors
    ///
    /// [`BullcryptError::Configuration`] when the configuration is unusable.
    fn extract_args(
        &self,
        name: &str,
        args: &RawArgs,
    ) -> Result<Option<AlgorithmOptions>, BullcryptError> {
        let _ = (name, args);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nothing;

    impl Algorithm for Nothing {
        fn decrypt<'a>(&'a self, _payload: &'a [u8], _options: &'a Options) -> GroupFactory<'a> {
            GroupFactory::empty()
        }
    }

    #[test]
    fn default_group_is_empty() {
        let options = Options::default();
        let factory = Nothing.decrypt(b"", &options);
        assert_eq!(factory.produce().unwrap().count(), 0);
    }

    #[test]
    fn factory_produces_fresh_groups() {
        let options = Options::default();
        let factory = Nothing.decrypt(b"", &options);
        assert!(factory.produce().is_ok());
        assert!(factory.produce().is_ok());
    }

    #[test]
    fn default_hooks_do_nothing() {
        let mut surface = ArgSurface::new();
        Nothing.register_args("nothing", &mut surface);
        assert!(surface.specs().is_empty());

        let extracted = Nothing.extract_args("nothing", &RawArgs::new()).unwrap();
        assert!(extracted.is_none());
    }
}
