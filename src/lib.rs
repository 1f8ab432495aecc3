// src/lib.rs

//! Batch decryption of ciphertext extracted from files.
//!
//! A file is sliced into ciphertext units ([`extract_content`]), every unit is
//! handed to an [`Algorithm`] that enumerates decryption candidates, and the
//! [`Orchestrator`] keeps the first candidate that succeeds. Failures stay
//! local to the line, unit, file or directory entry that caused them.

pub mod aliases;
pub mod algorithm;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod cli;
pub mod consts;
pub mod error;
pub mod extract;
pub mod logging;
pub mod options;
pub mod orchestrator;
pub mod utils;

pub use algorithm::{
    Algorithm, ArgSpec, ArgSurface, Candidate, DecryptionGroup, Fernet, FernetKey, FernetOptions,
    GroupFactory, RawArgs, Registry, UnitStream,
};
pub use error::BullcryptError;
pub use extract::{decode_content, encode_text, extract_content, Units};
pub use options::{AlgorithmOptions, Mode, Options, OptionsBuilder, PlaintextEncoding};
pub use orchestrator::{
    CollectingSink, ConsoleSink, FileResult, Orchestrator, ResultSink, SinkEvent, Summary,
    UnitOutcome,
};

#[cfg(feature = "batch-ops")]
pub use batch_ops::decrypt_batch;
