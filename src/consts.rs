//! # Constants
//!
//! Token layout sizes for the Fernet variant and run-wide defaults.

/// Text codec used when none is configured.
pub const DEFAULT_TEXT_ENCODING: &str = "utf-8";

/// Version byte every Fernet token starts with.
pub const FERNET_VERSION: u8 = 0x80;

/// Decoded Fernet key length: 16 bytes signing key + 16 bytes encryption key.
pub const FERNET_KEY_LEN: usize = 32;

/// Big-endian seconds since the epoch, following the version byte.
pub const FERNET_TIMESTAMP_LEN: usize = 8;

/// AES block size, also the IV length.
pub const AES_BLOCK_LEN: usize = 16;

/// HMAC-SHA256 tag appended to every token.
pub const HMAC_TAG_LEN: usize = 32;

/// Bytes before the ciphertext: version + timestamp + IV.
pub const FERNET_HEADER_LEN: usize = 1 + FERNET_TIMESTAMP_LEN + AES_BLOCK_LEN;

/// Smallest well-formed token: header, one ciphertext block, tag.
pub const FERNET_MIN_TOKEN_LEN: usize = FERNET_HEADER_LEN + AES_BLOCK_LEN + HMAC_TAG_LEN;
