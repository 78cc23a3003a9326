use ring::hmac;

use super::Signer;
use crate::token::TokenError;

/// Signer backed by `ring`.
///
/// Used by the request-gating middleware; produces the same tags as
/// [`HmacSigner`](super::HmacSigner).
#[derive(Debug, Clone, Copy, Default)]
pub struct RingSigner;

impl RingSigner {
    pub fn new() -> Self {
        Self
    }
}

impl Signer for RingSigner {
    fn sign(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>, TokenError> {
        let key = hmac::Key::new(hmac::HMAC_SHA256, key);
        let tag = hmac::sign(&key, message);

        Ok(tag.as_ref().to_vec())
    }
}
