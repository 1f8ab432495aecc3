//! # Zeroizing Type Aliases
//!
//! Secret-bearing buffers used by the Fernet variant. Every type here wipes
//! its contents on drop via [`zeroize::Zeroizing`].
//!
//! ## Type Categories
//!
//! ### HMAC Primitives
//! - [`HmacSha256`] - token authentication
//!
//! ### Fixed-Size Secrets
//! - [`SigningKey16`] - first half of a Fernet key (HMAC key)
//! - [`EncryptionKey16`] - second half of a Fernet key (AES-128 key)
//! - [`Block16`] - one decrypted AES block
//! - [`Iv16`] - CBC chaining value
//!
//! ### Dynamic Secrets
//! - [`KeyString`] - a key as supplied by the user, before decoding

use hmac::Hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

pub type HmacSha256 = Hmac<Sha256>;

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer: generic zeroizing stack buffer
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = Zeroizing<[u8; N]>;

pub type Block16 = SpanBuffer<16>; // one decrypted AES block
pub type EncryptionKey16 = SpanBuffer<16>; // AES-128 key
pub type Iv16 = SpanBuffer<16>; // previous ciphertext block / IV
pub type SigningKey16 = SpanBuffer<16>; // HMAC-SHA256 key

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
pub type KeyString = Zeroizing<String>;
