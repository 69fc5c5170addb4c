//! Rounding and guarded arithmetic shared by the strategies.
//!
//! Every intermediate value is rounded where it is produced, so later
//! formulas consume the rounded figure.

use crate::errors::{CalcError, CalcResult};

/// Round `value` to `precision` decimal places (half away from zero).
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}

/// Reject NaN and infinities produced along the way.
pub fn finite(value: f64, quantity: &str) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::calculation_failed(
            quantity,
            format!("result is not a finite number ({})", value),
        ))
    }
}

/// `numerator / denominator`, rounded.
///
/// # Errors
///
/// * `DivisionByZero` - `denominator` is zero
/// * `CalculationFailed` - the quotient is not finite
pub fn ratio(numerator: f64, denominator: f64, quantity: &str, precision: u32) -> CalcResult<f64> {
    if denominator == 0.0 {
        return Err(CalcError::division_by_zero(quantity));
    }
    finite(round_to(numerator / denominator, precision), quantity)
}

/// Rounded product or sum that must stay finite.
pub fn rounded(value: f64, quantity: &str, precision: u32) -> CalcResult<f64> {
    finite(round_to(value, precision), quantity)
}
