use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const SIGNATURE_HEADER: &str = "x-line-signature";

type HmacSha256 = Hmac<Sha256>;

fn mac_for(body: &[u8], channel_secret: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes()).ok()?;
    mac.update(body);
    Some(mac)
}

/// Base64 HMAC-SHA256 of `body`, i.e. the value LINE puts in `x-line-signature`.
pub fn sign(body: &[u8], channel_secret: &str) -> String {
    mac_for(body, channel_secret)
        .map(|mac| general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
        .unwrap_or_default()
}

/// Checks `signature` against the HMAC of the exact bytes received.
///
/// The header is decoded with the strict standard engine (padding and
/// canonical trailing bits required), so a match here means the header
/// text equals `sign(body, channel_secret)`. The digest comparison itself
/// runs in constant time.
pub fn verify_signature(body: &[u8], signature: &str, channel_secret: &str) -> bool {
    let Ok(provided) = general_purpose::STANDARD.decode(signature) else {
        return false;
    };

    match mac_for(body, channel_secret) {
        Some(mac) => mac.verify_slice(&provided).is_ok(),
        None => false,
    }
}
