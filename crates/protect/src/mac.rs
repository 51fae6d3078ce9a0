use crate::cancel::CancelToken;
use crate::error::{ProtectError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Seal MACs carry only the leading 16 bytes of the 32-byte HMAC-SHA256
/// digest; the full-length value is never exchanged.
const SEAL_LEN: usize = 16;

/// Decode the shared secret from its hex form into raw key bytes.
///
/// The bank hands out keys as 32 hex characters (16 bytes); any odd-length
/// or non-hex input is rejected as [`ProtectError::InvalidKeyFormat`].
pub fn decode_key(key_hex: &str) -> Result<Vec<u8>> {
    hex::decode(key_hex).map_err(|e| ProtectError::InvalidKeyFormat(e.to_string()))
}

/// Compute the seal MAC over a hex-encoded message.
///
/// The message is decoded into raw bytes, authenticated with HMAC-SHA256
/// under `key`, truncated to its first 16 bytes and returned as 32
/// uppercase hex characters.
pub fn seal_mac(key: &[u8], message_hex: &str, cancel: &CancelToken) -> Result<String> {
    let message = decode_hex_message(message_hex, cancel)?;

    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| ProtectError::InvalidKeyFormat(e.to_string()))?;
    mac.update(&message);
    let digest = mac.finalize().into_bytes();

    Ok(hex::encode_upper(&digest[..SEAL_LEN]))
}

/// Decode a hex digest into raw bytes, observing cancellation once per byte
/// pair. Digests cover whole documents, so this loop can run for millions
/// of iterations.
fn decode_hex_message(message_hex: &str, cancel: &CancelToken) -> Result<Vec<u8>> {
    let digits = message_hex.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(ProtectError::InvalidHexInput(format!(
            "odd number of hex digits ({})",
            digits.len()
        )));
    }

    let mut bytes = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks_exact(2) {
        cancel.check()?;
        bytes.push((hex_value(pair[0])? << 4) | hex_value(pair[1])?);
    }
    Ok(bytes)
}

fn hex_value(digit: u8) -> Result<u8> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        _ => Err(ProtectError::InvalidHexInput(format!(
            "'{}' is not a hex digit",
            digit as char
        ))),
    }
}
