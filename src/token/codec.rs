//! HMAC-SHA256 token wire codec.
//! Used by: token::manager.
//!
//! Wire form: `base64url(claims_json) "." base64url(hmac_sha256(secret, base64url(claims_json)))`.
//! The signature covers the encoded claims segment exactly as transmitted.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{Error, Result};
use crate::token::claims::Token;

type HmacSha256 = Hmac<Sha256>;

const SEPARATOR: char = '.';

/// Padded URL-safe output, accepts input with or without padding.
const WIRE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

fn keyed(secret: &[u8]) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(secret).map_err(|e| Error::Config(format!("signing key: {e}")))
}

pub fn encode(token: &Token, secret: &[u8]) -> Result<String> {
    let payload = serde_json::to_vec(token)?;
    let encoded_payload = WIRE.encode(payload);

    let mut mac = keyed(secret)?;
    mac.update(encoded_payload.as_bytes());
    let encoded_signature = WIRE.encode(mac.finalize().into_bytes());

    Ok(format!("{encoded_payload}{SEPARATOR}{encoded_signature}"))
}

/// Checks structure and signature, then parses claims. Does not check expiry.
pub fn decode(wire: &str, secret: &[u8]) -> Result<Token> {
    let mut parts = wire.split(SEPARATOR);
    let (encoded_payload, encoded_signature) = match (parts.next(), parts.next(), parts.next()) {
        (Some(p), Some(s), None) if !p.is_empty() && !s.is_empty() => (p, s),
        _ => return Err(Error::MalformedToken),
    };

    let provided = WIRE
        .decode(encoded_signature)
        .map_err(|_| Error::BadSignature)?;

    let mut mac = keyed(secret)?;
    mac.update(encoded_payload.as_bytes());
    // verify_slice compares in constant time
    mac.verify_slice(&provided).map_err(|_| Error::BadSignature)?;

    let payload = WIRE
        .decode(encoded_payload)
        .map_err(|e| Error::MalformedPayload(e.to_string()))?;
    serde_json::from_slice(&payload).map_err(|e| Error::MalformedPayload(e.to_string()))
}
