//! src/extract/decode.rs
//! Plaintext pre-decoding of a unit's textual representation

use crate::error::BullcryptError;
use crate::options::PlaintextEncoding;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use data_encoding::{BASE32, BASE32HEX, HEXUPPER};
use encoding_rs::Encoding;

/// Decode `content` into bytes according to `plaintext_encoding`.
///
/// - `None` or [`PlaintextEncoding::Plain`]: `content` is encoded with
///   `text_encoding`; characters the codec cannot represent are an error.
/// - Any other encoding: `content` is decoded with the standard padded
///   alphabet for that encoding (base16 is upper-case only).
///
/// # Errors
///
/// [`BullcryptError::Extraction`] on malformed input for the chosen decoder.
pub fn decode_content(
    content: &str,
    plaintext_encoding: Option<PlaintextEncoding>,
    text_encoding: &'static Encoding,
) -> Result<Vec<u8>, BullcryptError> {
    let (encoding, decoded) = match plaintext_encoding {
        None | Some(PlaintextEncoding::Plain) => return encode_text(content, text_encoding),
        Some(encoding @ PlaintextEncoding::Base16) => {
            (encoding, HEXUPPER.decode(content.as_bytes()).map_err(|e| e.to_string()))
        }
        Some(encoding @ PlaintextEncoding::Base32) => {
            (encoding, BASE32.decode(content.as_bytes()).map_err(|e| e.to_string()))
        }
        Some(encoding @ PlaintextEncoding::Base32Hex) => {
            (encoding, BASE32HEX.decode(content.as_bytes()).map_err(|e| e.to_string()))
        }
        Some(encoding @ PlaintextEncoding::Base64) => {
            (encoding, STANDARD.decode(content).map_err(|e| e.to_string()))
        }
        Some(encoding @ PlaintextEncoding::Base64Url) => {
            (encoding, URL_SAFE.decode(content).map_err(|e| e.to_string()))
        }
    };

    decoded.map_err(|reason| BullcryptError::Extraction(format!("invalid {encoding}: {reason}")))
}

/// Encode `content` with `text_encoding`.
///
/// encoding_rs only encodes into ASCII-compatible codecs; UTF-16 labels
/// fall back to UTF-8 output.
pub fn encode_text(
    content: &str,
    text_encoding: &'static Encoding,
) -> Result<Vec<u8>, BullcryptError> {
    let (bytes, used, had_errors) = text_encoding.encode(content);
    if had_errors {
        return Err(BullcryptError::Extraction(format!(
            "text cannot be represented in {}",
            used.name()
        )));
    }
    Ok(bytes.into_owned())
}
