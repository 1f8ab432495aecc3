//! # Run Options
//!
//! [`Options`] is built once per run and shared read-only by every unit.
//! Construct it through [`OptionsBuilder`]; every label is validated in
//! [`OptionsBuilder::build`] so nothing downstream has to re-check it.

use crate::consts::DEFAULT_TEXT_ENCODING;
use crate::error::BullcryptError;
use encoding_rs::Encoding;
use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// How a file is sliced into ciphertext units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The whole file, as bytes, is one unit.
    #[default]
    Raw,
    /// All lines joined into one string, pre-decoded into one unit.
    Chunked,
    /// Every non-blank line is its own unit.
    Line,
}

impl Mode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Raw => "raw",
            Mode::Chunked => "chunked",
            Mode::Line => "line",
        }
    }
}

impl FromStr for Mode {
    type Err = BullcryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(Mode::Raw),
            "chunked" => Ok(Mode::Chunked),
            "line" => Ok(Mode::Line),
            other => Err(BullcryptError::Configuration(format!("Unknown mode {other}"))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Textual encoding applied to a unit's on-disk representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaintextEncoding {
    /// Text is re-encoded with the text codec, no transport decoding.
    Plain,
    Base16,
    Base32,
    Base32Hex,
    Base64,
    Base64Url,
}

impl PlaintextEncoding {
    pub const ALL: [PlaintextEncoding; 6] = [
        PlaintextEncoding::Plain,
        PlaintextEncoding::Base16,
        PlaintextEncoding::Base32,
        PlaintextEncoding::Base32Hex,
        PlaintextEncoding::Base64,
        PlaintextEncoding::Base64Url,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PlaintextEncoding::Plain => "plain",
            PlaintextEncoding::Base16 => "base16",
            PlaintextEncoding::Base32 => "base32",
            PlaintextEncoding::Base32Hex => "base32hex",
            PlaintextEncoding::Base64 => "base64",
            PlaintextEncoding::Base64Url => "base64url",
        }
    }
}

impl FromStr for PlaintextEncoding {
    type Err = BullcryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlaintextEncoding::ALL
            .into_iter()
            .find(|encoding| encoding.as_str() == s)
            .ok_or_else(|| {
                BullcryptError::Configuration(format!("Unsupported plaintext encoding {s}"))
            })
    }
}

impl fmt::Display for PlaintextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque, algorithm-owned configuration.
///
/// The core never looks inside; a variant recovers its own type with
/// [`AlgorithmOptions::downcast_ref`]. Cloning shares the same value.
#[derive(Clone)]
pub struct AlgorithmOptions(Arc<dyn Any + Send + Sync>);

impl AlgorithmOptions {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for AlgorithmOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AlgorithmOptions(..)")
    }
}

/// Immutable options for one run.
#[derive(Debug, Clone)]
pub struct Options {
    mode: Mode,
    plaintext_encoding: Option<PlaintextEncoding>,
    text_encoding: &'static Encoding,
    recursive: bool,
    algorithm_options: Option<AlgorithmOptions>,
}

impl Options {
    #[must_use]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::new()
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn plaintext_encoding(&self) -> Option<PlaintextEncoding> {
        self.plaintext_encoding
    }

    #[must_use]
    pub const fn text_encoding(&self) -> &'static Encoding {
        self.text_encoding
    }

    #[must_use]
    pub const fn recursive(&self) -> bool {
        self.recursive
    }

    #[must_use]
    pub const fn algorithm_options(&self) -> Option<&AlgorithmOptions> {
        self.algorithm_options.as_ref()
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            plaintext_encoding: None,
            text_encoding: encoding_rs::UTF_8,
            recursive: false,
            algorithm_options: None,
        }
    }
}

/// Builder for [`Options`].
///
/// Defaults: raw mode, no plaintext encoding, utf-8 text, non-recursive,
/// no algorithm options.
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    mode: Mode,
    plaintext_encoding: Option<PlaintextEncoding>,
    text_encoding: String,
    recursive: bool,
    algorithm_options: Option<AlgorithmOptions>,
}

impl OptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: Mode::default(),
            plaintext_encoding: None,
            text_encoding: DEFAULT_TEXT_ENCODING.to_string(),
            recursive: false,
            algorithm_options: None,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_plaintext_encoding(mut self, encoding: Option<PlaintextEncoding>) -> Self {
        self.plaintext_encoding = encoding;
        self
    }

    /// Set the text codec by its WHATWG label (`"utf-8"`, `"latin1"`, ...).
    /// Validated in [`build`](Self::build).
    #[must_use]
    pub fn with_text_encoding(mut self, label: impl Into<String>) -> Self {
        self.text_encoding = label.into();
        self
    }

    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    #[must_use]
    pub fn with_algorithm_options(mut self, options: Option<AlgorithmOptions>) -> Self {
        self.algorithm_options = options;
        self
    }

    pub fn build(self) -> Result<Options, BullcryptError> {
        let text_encoding = Encoding::for_label(self.text_encoding.trim().as_bytes())
            .ok_or_else(|| {
                BullcryptError::Configuration(format!(
                    "Unknown text encoding {}",
                    self.text_encoding
                ))
            })?;

        Ok(Options {
            mode: self.mode,
            plaintext_encoding: self.plaintext_encoding,
            text_encoding,
            recursive: self.recursive,
            algorithm_options: self.algorithm_options,
        })
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
