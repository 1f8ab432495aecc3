// src/algorithm/fernet/mod.rs

//! Multi-key Fernet decryption.
//!
//! Every configured key becomes one candidate, in the order the keys were
//! given. Keys are configured with the repeatable `--<name>.key` argument.

pub(crate) mod key;
pub(crate) mod token;

pub use key::FernetKey;
pub use token::decrypt_token;

use crate::algorithm::{
    Algorithm, ArgSpec, ArgSurface, Candidate, DecryptionGroup, GroupFactory, RawArgs,
};
use crate::error::BullcryptError;
use crate::options::{AlgorithmOptions, Options};
use tracing::trace;

const KEY_REQUIRED: &str =
    "A Fernet key is required and must be 32 url-safe base64-encoded bytes.";

/// Algorithm options for [`Fernet`]: an ordered, non-empty list of keys.
#[derive(Debug, Clone)]
pub struct FernetOptions {
    keys: Vec<FernetKey>,
}

impl FernetOptions {
    /// Build from key strings, dropping empty ones.
    ///
    /// # Errors
    ///
    /// [`BullcryptError::Configuration`] when no non-empty key remains.
    pub fn new<I, S>(keys: I) -> Result<Self, BullcryptError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<FernetKey> = keys
            .into_iter()
            .map(FernetKey::new)
            .filter(|key| !key.is_empty())
            .collect();

        if keys.is_empty() {
            return Err(BullcryptError::Configuration(KEY_REQUIRED.into()));
        }
        Ok(Self { keys })
    }

    #[must_use]
    pub fn keys(&self) -> &[FernetKey] {
        &self.keys
    }
}

/// The Fernet algorithm variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fernet;

impl Algorithm for Fernet {
    fn decrypt<'a>(&'a self, payload: &'a [u8], options: &'a Options) -> GroupFactory<'a> {
        GroupFactory::new(move || {
            let fernet_options = options
                .algorithm_options()
                .and_then(AlgorithmOptions::downcast_ref::<FernetOptions>)
                .ok_or_else(|| {
                    BullcryptError::AlgorithmOptionsType(
                        "Algorithm options expected to be a Fernet key list".into(),
                    )
                })?;

            let candidates = fernet_options.keys.iter().enumerate().map(
                move |(index, key)| -> Candidate<'a> {
                    Box::new(move || {
                        trace!(index, "Trying Fernet key");
                        decrypt_token(payload, key)
                    })
                },
            );
            let group: DecryptionGroup<'a> = Box::new(candidates);
            Ok(group)
        })
    }

    fn register_args(&self, name: &str, surface: &mut ArgSurface) {
        surface.add(
            ArgSpec::new(name, "key", "A 32-byte key encoded as Base64URL")
                .repeatable()
                .in_group(format!("Fernet ({name})")),
        );
    }

    fn extract_args(
        &self,
        name: &str,
        args: &RawArgs,
    ) -> Result<Option<AlgorithmOptions>, BullcryptError> {
        let keys = args.get_all(&format!("{name}.key"));
        let options = FernetOptions::new(keys.iter().cloned())?;
        Ok(Some(AlgorithmOptions::new(options)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionsBuilder;

    #[test]
    fn missing_key_is_configuration_error() {
        let err = Fernet.extract_args("fernet", &RawArgs::new()).unwrap_err();
        assert_eq!(err.to_string(), format!("Configuration error: {KEY_REQUIRED}"));
    }

    #[test]
    fn empty_keys_are_dropped() {
        let args: RawArgs = [("fernet.key", ""), ("fernet.key", "abc")].into_iter().collect();
        let extracted = Fernet.extract_args("fernet", &args).unwrap().unwrap();
        let options = extracted.downcast_ref::<FernetOptions>().unwrap();
        assert_eq!(options.keys().len(), 1);

        let only_empty: RawArgs = [("fernet.key", "")].into_iter().collect();
        assert!(Fernet.extract_args("fernet", &only_empty).is_err());
    }

    #[test]
    fn namespace_follows_registered_name() {
        let args: RawArgs = [("vault.key", "abc")].into_iter().collect();
        assert!(Fernet.extract_args("vault", &args).is_ok());
        assert!(Fernet.extract_args("fernet", &args).is_err());
    }

    #[test]
    fn wrong_options_shape_fails_group_production() {
        let options = OptionsBuilder::new()
            .with_algorithm_options(Some(AlgorithmOptions::new(42u32)))
            .build()
            .unwrap();
        let factory = Fernet.decrypt(b"", &options);
        assert!(matches!(
            factory.produce(),
            Err(BullcryptError::AlgorithmOptionsType(_))
        ));

        let no_options = Options::default();
        assert!(Fernet.decrypt(b"", &no_options).produce().is_err());
    }

    #[test]
    fn one_candidate_per_key() {
        let keys = FernetOptions::new(["a", "b", "c"]).unwrap();
        let options = OptionsBuilder::new()
            .with_algorithm_options(Some(AlgorithmOptions::new(keys)))
            .build()
            .unwrap();
        let factory = Fernet.decrypt(b"payload", &options);
        assert_eq!(factory.produce().unwrap().count(), 3);
        // a second group is independent of the first
        assert_eq!(factory.produce().unwrap().count(), 3);
    }

    #[test]
    fn register_args_declares_repeatable_key() {
        let mut surface = ArgSurface::new();
        Fernet.register_args("fernet", &mut surface);
        let spec = &surface.specs()[0];
        assert_eq!(spec.id, "fernet.key");
        assert!(spec.repeatable);
        assert_eq!(spec.group, "Fernet (fernet)");
    }
}
