pub mod hmac_sha256;
pub mod ring_hmac;

pub use hmac_sha256::HmacSigner;
pub use ring_hmac::RingSigner;

use crate::token::TokenError;

/// HMAC-SHA256 signing capability.
///
/// Implementations are interchangeable: for the same key and message every
/// signer returns the same MAC bytes, so a token minted through one of them
/// validates through any other.
pub trait Signer: Send + Sync + 'static {
    /// Compute the raw HMAC-SHA256 tag of `message` under `key`.
    ///
    /// # Arguments
    /// * `key` - Shared secret bytes
    /// * `message` - Bytes to authenticate
    ///
    /// # Returns
    /// 32-byte MAC
    ///
    /// # Errors
    /// * `SigningFailed` - Backend rejected the key
    fn sign(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>, TokenError>;
}
