// src/orchestrator/mod.rs

//! # Orchestrator
//!
//! Drives one algorithm over a list of input paths:
//!
//! path → (walk) → file → units → candidate group → first success
//!
//! Failures are isolated at every level. A failing candidate only moves on
//! to the next one, an exhausted group only marks its unit unresolved, a
//! failing file or directory entry is logged and skipped, and one bad input
//! path never stops the others. Only configuration errors abort a run, and
//! those happen before the orchestrator exists.
//!
//! Everything isolated here reaches the [`ResultSink`], so it is only logged
//! at debug level.

pub(crate) mod sink;

pub use sink::{CollectingSink, ConsoleSink, FileResult, ResultSink, SinkEvent, UnitOutcome};

use crate::algorithm::Algorithm;
use crate::error::BullcryptError;
use crate::options::Options;
use std::ops::AddAssign;
use std::path::Path;
use tracing::{debug, info, trace};
use walkdir::WalkDir;

/// Counters for one run (or any part of one).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Regular files opened.
    pub files: usize,
    /// Ciphertext units extracted.
    pub units: usize,
    pub resolved: usize,
    pub unresolved: usize,
    /// Files that yielded no unit at all.
    pub empty: usize,
    /// Files, entries or paths that failed and were skipped.
    pub errors: usize,
    /// Inputs that were neither a file nor a walkable directory.
    pub skipped: usize,
}

impl Summary {
    fn file() -> Self {
        Self {
            files: 1,
            ..Self::default()
        }
    }

    fn error() -> Self {
        Self {
            errors: 1,
            ..Self::default()
        }
    }

    /// `true` when every extracted unit was resolved and nothing failed.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.unresolved == 0 && self.errors == 0
    }
}

impl AddAssign for Summary {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.units += other.units;
        self.resolved += other.resolved;
        self.unresolved += other.unresolved;
        self.empty += other.empty;
        self.errors += other.errors;
        self.skipped += other.skipped;
    }
}

/// Applies one [`Algorithm`] with one [`Options`] to files and directories.
#[derive(Clone, Copy)]
pub struct Orchestrator<'a> {
    algorithm: &'a dyn Algorithm,
    options: &'a Options,
}

impl<'a> Orchestrator<'a> {
    pub fn new(algorithm: &'a dyn Algorithm, options: &'a Options) -> Self {
        Self { algorithm, options }
    }

    #[must_use]
    pub const fn options(&self) -> &'a Options {
        self.options
    }

    /// Process every input path in order.
    ///
    /// Never fails: an error on one path is logged, handed to
    /// [`ResultSink::on_error`] and counted, then the next path is processed.
    pub fn run<P: AsRef<Path>>(&self, paths: &[P], sink: &mut dyn ResultSink) -> Summary {
        let mut summary = Summary::default();
        for path in paths {
            summary += self.run_one(path.as_ref(), sink);
        }
        info!(
            files = summary.files,
            resolved = summary.resolved,
            unresolved = summary.unresolved,
            errors = summary.errors,
            "Run finished"
        );
        summary
    }

    pub(crate) fn run_one(&self, path: &Path, sink: &mut dyn ResultSink) -> Summary {
        match self.process_path(path, sink) {
            Ok(summary) => summary,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping input path");
                sink.on_error(path, e);
                Summary::error()
            }
        }
    }

    /// Process one input path.
    ///
    /// A regular file is decrypted. A directory is walked when the options
    /// ask for recursion, otherwise skipped like any other non-file.
    ///
    /// # Errors
    ///
    /// Only when `path` is a file that cannot be processed; entries found
    /// while walking a directory are isolated individually.
    pub fn process_path(
        &self,
        path: &Path,
        sink: &mut dyn ResultSink,
    ) -> Result<Summary, BullcryptError> {
        if path.is_file() {
            return self.decrypt_file(path, sink);
        }
        if self.options.recursive() && path.is_dir() {
            return Ok(self.walk(path, sink));
        }

        debug!(path = %path.display(), "Not a regular file, skipping");
        Ok(Summary {
            skipped: 1,
            ..Summary::default()
        })
    }

    fn walk(&self, root: &Path, sink: &mut dyn ResultSink) -> Summary {
        debug!(root = %root.display(), "Walking directory");
        let mut summary = Summary::default();

        for entry in WalkDir::new(root).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    let path = source.path().unwrap_or(root).to_path_buf();
                    let e = BullcryptError::Traversal {
                        path: path.clone(),
                        source,
                    };
                    debug!(error = %e, "Skipping unreadable directory entry");
                    sink.on_error(&path, e);
                    summary.errors += 1;
                    continue;
                }
            };

            // Path::is_file resolves symlinks; directories are only descended into
            if !entry.path().is_file() {
                trace!(path = %entry.path().display(), "Skipping non-file entry");
                continue;
            }

            match self.decrypt_file(entry.path(), sink) {
                Ok(file_summary) => summary += file_summary,
                Err(e) => {
                    debug!(path = %entry.path().display(), error = %e, "Skipping file");
                    sink.on_error(entry.path(), e);
                    summary.errors += 1;
                }
            }
        }
        summary
    }

    /// Extract every unit of `path` and resolve each one in order.
    ///
    /// Results reach `sink` as they are produced. A file that yields no unit
    /// is reported through [`ResultSink::on_empty`].
    ///
    /// # Errors
    ///
    /// When extraction itself fails (unreadable file, undecodable text or
    /// transport encoding). Units already reported stay reported.
    pub fn decrypt_file(
        &self,
        path: &Path,
        sink: &mut dyn ResultSink,
    ) -> Result<Summary, BullcryptError> {
        debug!(path = %path.display(), mode = %self.options.mode(), "Processing file");
        let mut summary = Summary::file();

        for (index, unit) in self.algorithm.extract_content(path, self.options).enumerate() {
            let payload = unit?;
            summary.units += 1;

            let outcome = self.resolve_unit(&payload);
            match &outcome {
                UnitOutcome::Resolved { candidate, .. } => {
                    debug!(path = %path.display(), unit = index, candidate, "Unit resolved");
                    summary.resolved += 1;
                }
                UnitOutcome::Unresolved(e) => {
                    debug!(path = %path.display(), unit = index, error = %e, "Unit unresolved");
                    summary.unresolved += 1;
                }
            }
            sink.on_result(FileResult {
                path: path.to_path_buf(),
                unit: index,
                outcome,
            });
        }

        if summary.units == 0 {
            debug!(path = %path.display(), "No ciphertext units");
            summary.empty += 1;
            sink.on_empty(path);
        }
        Ok(summary)
    }

    /// Try the candidates of a fresh group for `payload` until one succeeds.
    ///
    /// Candidates after the first success are never invoked.
    pub fn resolve_unit(&self, payload: &[u8]) -> UnitOutcome {
        let factory = self.algorithm.decrypt(payload, self.options);
        let group = match factory.produce() {
            Ok(group) => group,
            Err(e) => return UnitOutcome::Unresolved(e),
        };

        let mut attempts = 0;
        for (index, candidate) in group.enumerate() {
            attempts += 1;
            match candidate() {
                Ok(plaintext) => {
                    return UnitOutcome::Resolved {
                        candidate: index,
                        plaintext,
                    }
                }
                Err(e) => debug!(candidate = index, error = %e, "Candidate failed"),
            }
        }
        UnitOutcome::Unresolved(BullcryptError::GroupExhausted { attempts })
    }
}

impl std::fmt::Debug for Orchestrator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("options", self.options)
            .finish_non_exhaustive()
    }
}
