use std::fmt;
use std::str::FromStr;

use super::errors::TokenError;

/// Signed admin credential: `"<issued_at_millis>.<hex_signature>"`.
///
/// The signature covers the timestamp field exactly as it appears in the
/// token string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    issued_at_millis: i64,
    timestamp: String,
    signature: String,
}

impl AuthToken {
    /// Build a token from an issuance time and its hex signature.
    pub fn new(issued_at_millis: i64, signature: String) -> Self {
        Self {
            issued_at_millis,
            timestamp: issued_at_millis.to_string(),
            signature,
        }
    }

    /// Issuance time in Unix milliseconds.
    pub fn issued_at_millis(&self) -> i64 {
        self.issued_at_millis
    }

    /// The message the signature was computed over.
    pub fn signed_payload(&self) -> &str {
        &self.timestamp
    }

    /// Lowercase hex signature as carried by the client.
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl FromStr for AuthToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split('.');
        let (Some(timestamp), Some(signature), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(TokenError::Malformed("expected exactly two fields"));
        };

        if timestamp.is_empty() || signature.is_empty() {
            return Err(TokenError::Malformed("empty field"));
        }

        if !timestamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TokenError::Malformed("timestamp is not numeric"));
        }

        let issued_at_millis = timestamp
            .parse::<i64>()
            .map_err(|_| TokenError::Malformed("timestamp out of range"))?;

        Ok(Self {
            issued_at_millis,
            timestamp: timestamp.to_string(),
            signature: signature.to_string(),
        })
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.timestamp, self.signature)
    }
}
