use hmac::{Hmac, Mac};
use sha2::Sha256;

/// The base64-encoded HMAC-SHA256 of `data` under `secret`. This is the signature format the webhook middleware
/// expects in the signature header.
pub fn calculate_hmac(secret: &str, data: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC can take a key of any size");
    mac.update(data);
    base64::encode(mac.finalize().into_bytes())
}
