use std::hint::black_box;

use subtle::ConstantTimeEq;

/// Compare two byte strings in time independent of where they differ.
///
/// When the lengths differ a full comparison of `a` against itself is still
/// performed before returning `false`.
pub fn timing_safe_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        let _ = black_box(a.ct_eq(black_box(a)));
        return false;
    }

    a.ct_eq(b).into()
}

/// Check a submitted password against the configured secret.
///
/// Returns `false` if either side is empty or the secret is absent.
pub fn validate_password(candidate: &str, secret: Option<&str>) -> bool {
    match secret {
        Some(secret) if !secret.is_empty() && !candidate.is_empty() => {
            timing_safe_equal(candidate.as_bytes(), secret.as_bytes())
        }
        _ => false,
    }
}
