//! src/orchestrator/sink.rs
//! Result sinks: where resolved and unresolved units end up

use crate::error::BullcryptError;
use encoding_rs::Encoding;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Final state of one ciphertext unit.
#[derive(Debug)]
pub enum UnitOutcome {
    /// A candidate succeeded; later candidates were never invoked.
    Resolved {
        /// Zero-based position of the winning candidate in its group.
        candidate: usize,
        plaintext: Vec<u8>,
    },
    /// Every candidate failed, or the group could not be produced.
    Unresolved(BullcryptError),
}

impl UnitOutcome {
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, UnitOutcome::Resolved { .. })
    }

    #[must_use]
    pub fn plaintext(&self) -> Option<&[u8]> {
        match self {
            UnitOutcome::Resolved { plaintext, .. } => Some(plaintext),
            UnitOutcome::Unresolved(_) => None,
        }
    }
}

/// Outcome of one unit, tagged with where it came from.
#[derive(Debug)]
pub struct FileResult {
    pub path: PathBuf,
    /// Zero-based index of the unit within its file.
    pub unit: usize,
    pub outcome: UnitOutcome,
}

/// Receiver of everything the orchestrator produces.
///
/// Only [`on_result`](Self::on_result) is required; the other hooks let a
/// sink tell "nothing matched" apart from "nothing to match" and from
/// "could not be processed".
pub trait ResultSink {
    fn on_result(&mut self, result: FileResult);

    /// A regular file was processed and yielded zero units.
    fn on_empty(&mut self, path: &Path) {
        let _ = path;
    }

    /// A file, directory entry, or input path failed and was skipped.
    fn on_error(&mut self, path: &Path, error: BullcryptError) {
        let _ = (path, error);
    }
}

/// Writes `"<path> -> <text>"` for every resolved unit to `out`.
///
/// Unless quiet, unresolved units, empty files and isolated errors are
/// reported on `err` as `"<path> !! <reason>"`.
pub struct ConsoleSink<W, E> {
    out: W,
    err: E,
    text_encoding: &'static Encoding,
    quiet: bool,
}

impl<W: Write, E: Write> ConsoleSink<W, E> {
    pub fn new(out: W, err: E, text_encoding: &'static Encoding) -> Self {
        Self {
            out,
            err,
            text_encoding,
            quiet: false,
        }
    }

    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    fn report(&mut self, path: &Path, reason: impl std::fmt::Display) {
        if self.quiet {
            return;
        }
        if let Err(e) = writeln!(self.err, "{} !! {reason}", path.display()) {
            warn!(error = %e, "Failed to write report line");
        }
    }
}

impl<W: Write, E: Write> ResultSink for ConsoleSink<W, E> {
    fn on_result(&mut self, result: FileResult) {
        match result.outcome {
            UnitOutcome::Resolved { plaintext, .. } => {
                let (text, _) = self.text_encoding.decode_without_bom_handling(&plaintext);
                if let Err(e) = writeln!(self.out, "{} -> {text}", result.path.display()) {
                    warn!(error = %e, "Failed to write result line");
                }
            }
            UnitOutcome::Unresolved(error) => {
                self.report(&result.path, format_args!("unresolved: {error}"));
            }
        }
    }

    fn on_empty(&mut self, path: &Path) {
        self.report(path, "no ciphertext units");
    }

    fn on_error(&mut self, path: &Path, error: BullcryptError) {
        self.report(path, error);
    }
}

/// One recorded sink call.
#[derive(Debug)]
pub enum SinkEvent {
    Result(FileResult),
    Empty(PathBuf),
    Error(PathBuf, BullcryptError),
}

/// Buffers every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Vec<SinkEvent>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// `(path, plaintext)` of every resolved unit.
    pub fn resolved(&self) -> impl Iterator<Item = (&Path, &[u8])> {
        self.events.iter().filter_map(|event| match event {
            SinkEvent::Result(result) => result
                .outcome
                .plaintext()
                .map(|plaintext| (result.path.as_path(), plaintext)),
            _ => None,
        })
    }

    /// Number of unresolved units.
    #[must_use]
    pub fn unresolved_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SinkEvent::Result(r) if !r.outcome.is_resolved()))
            .count()
    }

    /// Forward every buffered event to `sink`, in order.
    pub fn replay_into(self, sink: &mut dyn ResultSink) {
        for event in self.events {
            match event {
                SinkEvent::Result(result) => sink.on_result(result),
                SinkEvent::Empty(path) => sink.on_empty(&path),
                SinkEvent::Error(path, error) => sink.on_error(&path, error),
            }
        }
    }
}

impl ResultSink for CollectingSink {
    fn on_result(&mut self, result: FileResult) {
        self.events.push(SinkEvent::Result(result));
    }

    fn on_empty(&mut self, path: &Path) {
        self.events.push(SinkEvent::Empty(path.to_path_buf()));
    }

    fn on_error(&mut self, path: &Path, error: BullcryptError) {
        self.events.push(SinkEvent::Error(path.to_path_buf(), error));
    }
}
