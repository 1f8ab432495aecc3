//! src/algorithm/fernet/token.rs
//! Fernet token decryption: authenticate first, then AES-128-CBC + PKCS#7
//!
//! Layout (after url-safe base64):
//! `0x80 | timestamp (8, BE) | IV (16) | ciphertext (16 * n) | HMAC-SHA256 (32)`

use crate::aliases::{Block16, EncryptionKey16, HmacSha256, Iv16, SigningKey16};
use crate::algorithm::fernet::FernetKey;
use crate::consts::{
    AES_BLOCK_LEN, FERNET_HEADER_LEN, FERNET_MIN_TOKEN_LEN, FERNET_TIMESTAMP_LEN, FERNET_VERSION,
    HMAC_TAG_LEN,
};
use crate::error::BullcryptError;
use crate::utils::{pkcs7_unpadded_len, xor_blocks};
use aes::cipher::{BlockDecrypt, KeyInit};
use aes::{Aes128Dec, Block as AesBlock};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use hmac::Mac;

/// Decrypt one Fernet `token` with `key`.
///
/// ASCII whitespace inside the token is ignored. The timestamp is not checked
/// against any TTL.
///
/// # Errors
///
/// Always [`BullcryptError::Decryption`] with the same message, whatever went
/// wrong: malformed key, malformed token, MAC mismatch or bad padding.
pub fn decrypt_token(token: &[u8], key: &FernetKey) -> Result<Vec<u8>, BullcryptError> {
    let (signing_key, encryption_key) = key.split().map_err(|_| invalid_token())?;
    let data = decode_token(token).ok_or_else(invalid_token)?;

    if data.len() < FERNET_MIN_TOKEN_LEN || data[0] != FERNET_VERSION {
        return Err(invalid_token());
    }

    let (signed, tag) = data.split_at(data.len() - HMAC_TAG_LEN);
    let ciphertext = &signed[FERNET_HEADER_LEN..];
    if ciphertext.len() % AES_BLOCK_LEN != 0 {
        return Err(invalid_token());
    }

    verify_tag(signed, tag, &signing_key)?;

    let mut iv = Iv16::new([0u8; 16]);
    iv.copy_from_slice(&signed[1 + FERNET_TIMESTAMP_LEN..FERNET_HEADER_LEN]);

    decrypt_cbc(ciphertext, &iv, &encryption_key)
}

fn decode_token(token: &[u8]) -> Option<Vec<u8>> {
    let compact: Vec<u8> = token
        .iter()
        .copied()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect();
    URL_SAFE.decode(compact).ok()
}

/// HMAC-SHA256 over everything but the tag, compared in constant time.
#[inline(always)]
fn verify_tag(signed: &[u8], tag: &[u8], signing_key: &SigningKey16) -> Result<(), BullcryptError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(&signing_key[..])
        .map_err(|_| invalid_token())?;
    mac.update(signed);
    mac.verify_slice(tag).map_err(|_| invalid_token())
}

/// AES-128-CBC decryption with PKCS#7 removal.
#[inline(always)]
fn decrypt_cbc(
    ciphertext: &[u8],
    iv: &Iv16,
    encryption_key: &EncryptionKey16,
) -> Result<Vec<u8>, BullcryptError> {
    let cipher = Aes128Dec::new((&**encryption_key).into());
    let mut previous_block = Iv16::new(**iv);
    let mut plaintext_block = Block16::new([0u8; 16]);
    let mut output = Vec::with_capacity(ciphertext.len());

    for chunk in ciphertext.chunks_exact(AES_BLOCK_LEN) {
        let mut block = *AesBlock::from_slice(chunk);
        cipher.decrypt_block(&mut block);
        xor_blocks(block.as_slice(), &previous_block[..], &mut plaintext_block[..]);
        output.extend_from_slice(&plaintext_block[..]);
        previous_block.copy_from_slice(chunk);
    }

    let final_start = output.len().checked_sub(AES_BLOCK_LEN).ok_or_else(invalid_token)?;
    let mut final_block = Block16::new([0u8; 16]);
    final_block.copy_from_slice(&output[final_start..]);
    let kept = pkcs7_unpadded_len(&final_block).ok_or_else(invalid_token)?;

    output.truncate(final_start + kept);
    Ok(output)
}

fn invalid_token() -> BullcryptError {
    BullcryptError::Decryption("invalid token or key".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "eBUADWmyqd8diJhRb2Kps6ZMbDqzLOXj2_6ILmFs-sE=";
    const TOKEN: &str = "gAAAAABo7pXag6KIWBdtlWUhl_qnc17dk4bJ4-mI_f4oxpBCLQc7sMacXD5XIP7v2sJctAQJDDJvo7hmCby0zBOG3rIfV2D2ZvirH-kSmX9rrvkk5dB7sUhvJUP6B7qG_xAaWzx823_5";

    #[test]
    fn decrypts_known_token() {
        let plaintext = decrypt_token(TOKEN.as_bytes(), &FernetKey::new(KEY)).unwrap();
        assert_eq!(plaintext, b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789");
    }

    #[test]
    fn whitespace_inside_token_is_ignored() {
        let wrapped = format!("{}\n{}\n", &TOKEN[..70], &TOKEN[70..]);
        let plaintext = decrypt_token(wrapped.as_bytes(), &FernetKey::new(KEY)).unwrap();
        assert_eq!(plaintext, b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789");
    }

    #[test]
    fn flipped_byte_fails_authentication() {
        let mut data = URL_SAFE.decode(TOKEN).unwrap();
        let middle = data.len() / 2;
        data[middle] ^= 0x01;
        let tampered = URL_SAFE.encode(&data);
        let err = decrypt_token(tampered.as_bytes(), &FernetKey::new(KEY)).unwrap_err();
        assert_eq!(err.to_string(), "Decryption error: invalid token or key");
    }

    #[test]
    fn failures_are_indistinguishable() {
        let wrong_key = FernetKey::new("57ndyQKDwbYrkLKXkT0zPBaIpyfSNktkaWk7HOz_WC8=");
        let bad_key = FernetKey::new("not-a-key");
        let errors = [
            decrypt_token(TOKEN.as_bytes(), &wrong_key).unwrap_err().to_string(),
            decrypt_token(TOKEN.as_bytes(), &bad_key).unwrap_err().to_string(),
            decrypt_token(b"", &FernetKey::new(KEY)).unwrap_err().to_string(),
            decrypt_token(b"gAAAAA==", &FernetKey::new(KEY)).unwrap_err().to_string(),
        ];
        assert!(errors.iter().all(|e| e == &errors[0]));
    }
}
