//! src/extract/units.rs
//! Lazy slicing of one file into ciphertext units

use crate::error::BullcryptError;
use crate::extract::decode::decode_content;
use crate::options::{Mode, PlaintextEncoding};
use encoding_rs::Encoding;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Line terminators in line mode: `\n`, `\r\n` and a lone `\r`.
const LINE_BREAKS: [char; 2] = ['\n', '\r'];

/// Every line boundary a whole-file join drops: [`LINE_BREAKS`] plus the
/// vertical tab, form feed, file/group/record separators, NEL and the
/// Unicode line and paragraph separators.
const JOIN_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}',
    '\u{2029}',
];

/// Slice `path` into ciphertext units.
///
/// Nothing is read until the first call to [`Iterator::next`]. The returned
/// sequence is finite and cannot be restarted; call again for a fresh one.
///
/// - [`Mode::Raw`]: exactly one unit holding the file's bytes (an empty file
///   yields one empty unit), or one `Err` if the file cannot be read.
/// - [`Mode::Chunked`]: lines joined without terminators, pre-decoded into at
///   most one unit. Read or decode failures are logged and yield nothing.
/// - [`Mode::Line`]: one unit per non-blank, successfully decoded line, in file
///   order. A malformed line is logged and skipped.
pub fn extract_content(
    path: impl AsRef<Path>,
    mode: Mode,
    plaintext_encoding: Option<PlaintextEncoding>,
    text_encoding: &'static Encoding,
) -> Units {
    Units {
        path: path.as_ref().to_path_buf(),
        mode,
        plaintext_encoding,
        text_encoding,
        state: UnitsState::Unopened,
    }
}

/// Iterator returned by [`extract_content`].
#[derive(Debug)]
pub struct Units {
    path: PathBuf,
    mode: Mode,
    plaintext_encoding: Option<PlaintextEncoding>,
    text_encoding: &'static Encoding,
    state: UnitsState,
}

#[derive(Debug)]
enum UnitsState {
    Unopened,
    Lines(std::vec::IntoIter<String>),
    Finished,
}

impl Units {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&mut self) -> Option<Result<Vec<u8>, BullcryptError>> {
        match self.mode {
            Mode::Raw => {
                self.state = UnitsState::Finished;
                Some(fs::read(&self.path).map_err(|e| BullcryptError::io(&self.path, e)))
            }
            Mode::Chunked => {
                self.state = UnitsState::Finished;
                let text = self.read_text()?;
                let joined: String = text.split(JOIN_BREAKS).collect();
                if joined.is_empty() {
                    return None;
                }
                match decode_content(&joined, self.plaintext_encoding, self.text_encoding) {
                    Ok(bytes) => Some(Ok(bytes)),
                    Err(e) => {
                        warn!(path = %self.path.display(), error = %e, "Failed to decode file");
                        None
                    }
                }
            }
            Mode::Line => {
                let text = match self.read_text() {
                    Some(text) => text,
                    None => {
                        self.state = UnitsState::Finished;
                        return None;
                    }
                };
                let lines: Vec<String> = text.split(LINE_BREAKS).map(str::to_owned).collect();
                self.state = UnitsState::Lines(lines.into_iter());
                self.next()
            }
        }
    }

    /// Read the whole file through the text codec, logging any failure.
    fn read_text(&self) -> Option<String> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read file");
                return None;
            }
        };

        match self
            .text_encoding
            .decode_without_bom_handling_and_without_replacement(&bytes)
        {
            Some(text) => Some(text.into_owned()),
            None => {
                warn!(
                    path = %self.path.display(),
                    encoding = self.text_encoding.name(),
                    "Failed to decode file: not valid text"
                );
                None
            }
        }
    }
}

impl Iterator for Units {
    type Item = Result<Vec<u8>, BullcryptError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                UnitsState::Unopened => return self.open(),
                UnitsState::Finished => return None,
                UnitsState::Lines(lines) => {
                    let Some(line) = lines.next() else {
                        self.state = UnitsState::Finished;
                        return None;
                    };

                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    match decode_content(line, self.plaintext_encoding, self.text_encoding) {
                        Ok(bytes) => return Some(Ok(bytes)),
                        Err(e) => {
                            warn!(path = %self.path.display(), line, error = %e, "Failed to decode line");
                        }
                    }
                }
            }
        }
    }
}
