//! Recipient address validation
//!
//! Shape check only: `<prefix>1` followed by exactly 38 lowercase
//! alphanumeric characters. This is a syntactic approximation, not a
//! bech32 checksum verification, so a string that passes may still be
//! invalid on-chain.

/// Check whether `candidate` is a well-formed account address for the
/// given bech32 prefix
pub fn is_valid_address(candidate: &str, prefix: &str) -> bool {
    let Some(rest) = candidate.strip_prefix(prefix) else {
        return false;
    };
    let Some(payload) = rest.strip_prefix('1') else {
        return false;
    };
    payload.len() == 38
        && payload
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}
