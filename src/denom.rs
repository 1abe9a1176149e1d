//! Amount conversion between smallest-unit and display denominations
//!
//! Balances arrive from the chain as integer strings in the smallest
//! unit (e.g. uatom). Display amounts divide by `10^decimals` and keep
//! at most six fraction digits with no thousands separators. Conversion
//! back to base units truncates toward zero so a rounded-up amount can
//! never overspend the displayed balance.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{ValidationError, WorkflowError};

/// Maximum fraction digits rendered in a display amount
pub const MAX_DISPLAY_FRACTION_DIGITS: u32 = 6;

/// Render a smallest-unit integer string as a display amount
///
/// `"2500000"` with 6 decimals becomes `"2.5"`; exact multiples trim
/// down to a bare integer (`"5000000"` becomes `"5"`).
pub fn format_display(raw: &str, decimals: u32) -> Result<String, WorkflowError> {
    let units = Decimal::from_str(raw)
        .map_err(|e| WorkflowError::Parse(format!("invalid raw amount {:?}: {}", raw, e)))?;
    let scale = Decimal::from(10u64.pow(decimals));
    let display = (units / scale)
        .round_dp(MAX_DISPLAY_FRACTION_DIGITS)
        .normalize();
    Ok(display.to_string())
}

/// Convert a display-denomination decimal string to a smallest-unit
/// integer string, truncating toward zero
///
/// Rejects input that is not a positive finite number.
pub fn to_base_units(amount: &str, decimals: u32) -> Result<String, ValidationError> {
    let value = Decimal::from_str(amount).map_err(|_| {
        ValidationError::InvalidAmount(format!("{:?} is not a number", amount))
    })?;
    if value <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount(
            "amount must be positive".to_string(),
        ));
    }
    let scale = Decimal::from(10u64.pow(decimals));
    let base = value
        .checked_mul(scale)
        .ok_or_else(|| ValidationError::InvalidAmount("amount out of range".to_string()))?
        .trunc();
    Ok(base.to_string())
}
