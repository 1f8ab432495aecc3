// src/utils.rs

//! Utility functions used across the library.

use subtle::ConstantTimeEq;

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// Used by the hand-chained AES-CBC loop in the Fernet variant.
///
/// # Panics (by contract)
///
/// Panics if any slice is shorter than 16 bytes. Callers only pass
/// 16-byte AES blocks.
#[inline(always)]
pub fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < 16 {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// Length of the message once a valid PKCS#7 pad is removed from the final
/// 16-byte block, or `None` if the padding is malformed.
///
/// The pad bytes are compared in constant time.
#[inline(always)]
pub fn pkcs7_unpadded_len(final_block: &[u8; 16]) -> Option<usize> {
    let padding = final_block[15];
    if padding == 0 || padding > 16 {
        return None;
    }

    let start = 16 - padding as usize;
    let expected = [padding; 16];
    let intact: bool = final_block[start..].ct_eq(&expected[start..]).into();

    intact.then_some(start)
}
