//! src/algorithm/fernet/key.rs
//! Fernet keys, kept as supplied and decoded only when a candidate runs

use crate::aliases::{EncryptionKey16, KeyString, SigningKey16};
use crate::consts::FERNET_KEY_LEN;
use crate::error::BullcryptError;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use std::fmt;
use zeroize::Zeroizing;

/// A Fernet key in its textual form: 32 bytes, url-safe base64.
///
/// The text is not validated on construction. A malformed key only fails the
/// candidate that uses it, like a wrong key would.
#[derive(Clone)]
pub struct FernetKey {
    text: KeyString,
}

impl FernetKey {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Zeroizing::new(text.into()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Decode into the signing half and the encryption half.
    pub fn split(&self) -> Result<(SigningKey16, EncryptionKey16), BullcryptError> {
        let decoded = Zeroizing::new(
            URL_SAFE
                .decode(self.text.trim().as_bytes())
                .map_err(|_| invalid_key())?,
        );
        if decoded.len() != FERNET_KEY_LEN {
            return Err(invalid_key());
        }

        let mut signing = SigningKey16::new([0u8; 16]);
        let mut encryption = EncryptionKey16::new([0u8; 16]);
        signing.copy_from_slice(&decoded[..16]);
        encryption.copy_from_slice(&decoded[16..]);

        Ok((signing, encryption))
    }
}

impl fmt::Debug for FernetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FernetKey([REDACTED])")
    }
}

fn invalid_key() -> BullcryptError {
    BullcryptError::Decryption("Fernet key must be 32 url-safe base64-encoded bytes".into())
}
