use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;

use super::Signer;
use crate::token::TokenError;

type HmacSha256 = Hmac<Sha256>;

/// Signer backed by the RustCrypto `hmac` and `sha2` crates.
///
/// Used on the login path where tokens are minted.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSigner;

impl HmacSigner {
    pub fn new() -> Self {
        Self
    }
}

impl Signer for HmacSigner {
    fn sign(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>, TokenError> {
        let mut mac =
            HmacSha256::new_from_slice(key).map_err(|e| TokenError::SigningFailed(e.to_string()))?;
        mac.update(message);

        Ok(mac.finalize().into_bytes().to_vec())
    }
}
