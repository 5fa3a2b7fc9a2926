//! Password comparison.
//!
//! The credential file stores passwords in the clear and comparison is an
//! exact, case-sensitive string match. That is a known weakness, not a
//! guarantee: keeping the comparison behind this module means a hashed
//! scheme can replace it without touching the store or any caller.

/// Check a candidate password against the stored value.
pub fn verify(candidate: &str, stored: &str) -> bool {
    candidate == stored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_is_exact_and_case_sensitive() {
        assert!(verify("pw1", "pw1"));
        assert!(!verify("PW1", "pw1"));
        assert!(!verify("pw1 ", "pw1"));
        assert!(!verify("", "pw1"));
    }
}
