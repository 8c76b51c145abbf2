//! Denomination validation.

use crate::CoinError;

/// Minimum denomination length.
pub const MIN_DENOM_LEN: usize = 3;

/// Maximum denomination length.
pub const MAX_DENOM_LEN: usize = 128;

/// Validate a denomination against `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
pub fn validate_denom(denom: &str) -> Result<(), CoinError> {
    let bytes = denom.as_bytes();
    let valid = (MIN_DENOM_LEN..=MAX_DENOM_LEN).contains(&bytes.len())
        && bytes[0].is_ascii_alphabetic()
        && bytes[1..].iter().all(|&b| {
            b.is_ascii_alphanumeric() || matches!(b, b'/' | b':' | b'.' | b'_' | b'-')
        });

    if !valid {
        return Err(CoinError::InvalidDenom(denom.to_string()));
    }
    Ok(())
}
