// src/extract/mod.rs

//! Content extraction: turning one file into ciphertext units.
//!
//! Core API: [`extract_content`] returns a lazy [`Units`] iterator.
//! Helpers: [`decode_content`] and [`encode_text`] for the textual pre-decoding step.

pub(crate) mod decode;
pub(crate) mod units;

pub use decode::{decode_content, encode_text};
pub use units::{extract_content, Units};
