//! Precision Context
//!
//! An immutable decimal-precision budget threaded explicitly through every
//! numeric entry point. Nothing in the workspace reads ambient precision
//! state: if a function computes, it takes a `&PrecisionContext`.
//!
//! All truncation thresholds are derived from the digit count at the
//! moment they are needed, never cached earlier, so a context is fully
//! described by its one integer.

use crate::constants::{
    GUARD_BITS, LOG2_10, MAX_DIGITS, RESIDUAL_SLACK_DIGITS, UNDERFLOW_FLOOR_DIGITS,
    WINDOW_DIGITS_FACTOR,
};
use crate::errors::{CoreError, CoreResult};
use rug::float::{Constant, Round};
use rug::ops::{AssignRound, Pow};
use rug::Float;
use std::cmp::Ordering;

/// Immutable decimal working-precision budget.
///
/// Construct once per logical run, pass by reference everywhere. Equality
/// of contexts implies bit-identical arithmetic for identical inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecisionContext {
    digits: u32,
}

impl PrecisionContext {
    /// Create a context with the given decimal digits of working precision.
    ///
    /// # Errors
    /// `InvalidPrecision` for zero digits or anything beyond `MAX_DIGITS`.
    pub fn new(digits: u32) -> CoreResult<Self> {
        if digits == 0 || digits > MAX_DIGITS {
            return Err(CoreError::InvalidPrecision { digits });
        }
        Ok(Self { digits })
    }

    /// Decimal digits of working precision.
    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// Binary precision handed to MPFR: digits·log2(10) plus guard bits.
    pub fn bits(&self) -> u32 {
        (self.digits as f64 * LOG2_10).ceil() as u32 + GUARD_BITS
    }

    // =========================================================================
    // VALUE CONSTRUCTORS
    // =========================================================================

    /// A `Float` at working precision, assigned from any rug-assignable value.
    pub fn float<T>(&self, val: T) -> Float
    where
        Float: AssignRound<T, Round = Round, Ordering = Ordering>,
    {
        Float::with_val(self.bits(), val)
    }

    /// Exact zero at working precision.
    pub fn zero(&self) -> Float {
        Float::with_val(self.bits(), 0)
    }

    /// π at working precision.
    pub fn pi(&self) -> Float {
        self.float(Constant::Pi)
    }

    /// The Euler–Mascheroni constant γ_E at working precision.
    pub fn euler_gamma(&self) -> Float {
        self.float(Constant::Euler)
    }

    /// Parse a decimal string at working precision.
    pub fn parse_float(&self, text: &str) -> CoreResult<Float> {
        let incomplete = Float::parse(text).map_err(|_| CoreError::InvalidNumber {
            text: text.to_string(),
        })?;
        Ok(self.float(incomplete))
    }

    // =========================================================================
    // DERIVED THRESHOLDS
    // =========================================================================

    /// Series truncation floor ε = 10^{-digits}.
    pub fn epsilon(&self) -> Float {
        self.float(10).pow(-(self.digits as i32))
    }

    /// Quadrature and identity-residual tolerance 10^{-(digits - 5)}.
    pub fn quadrature_tolerance(&self) -> Float {
        let slack = self.digits.saturating_sub(RESIDUAL_SLACK_DIGITS).max(1);
        self.float(10).pow(-(slack as i32))
    }

    /// Half-width X of the archimedean integration window.
    ///
    /// X = 2.3·digits, chosen so that e^{-X} sits below the precision
    /// floor; integrating further adds nothing but rounding noise.
    pub fn integration_window(&self) -> Float {
        self.float(WINDOW_DIGITS_FACTOR * self.digits as f64)
    }

    /// Absolute underflow floor for the zero-sum early exit.
    ///
    /// 10^{-max(50, digits)}: the historical 1e-50 cutoff, deepened when
    /// the precision budget exceeds 50 digits so the early exit never
    /// discards terms the budget could still resolve.
    pub fn underflow_floor(&self) -> Float {
        let d = self.digits.max(UNDERFLOW_FLOOR_DIGITS);
        self.float(10).pow(-(d as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_digits() {
        assert!(matches!(
            PrecisionContext::new(0),
            Err(CoreError::InvalidPrecision { digits: 0 })
        ));
    }

    #[test]
    fn test_rejects_oversized() {
        assert!(PrecisionContext::new(MAX_DIGITS + 1).is_err());
    }

    #[test]
    fn test_bits_exceed_digits() {
        let ctx = PrecisionContext::new(50).unwrap();
        // 50 digits need at least 167 bits
        assert!(ctx.bits() >= 167);
    }

    #[test]
    fn test_epsilon_scale() {
        let ctx = PrecisionContext::new(50).unwrap();
        let eps = ctx.epsilon();
        assert!(eps > 0);
        assert!(eps < 1e-49f64);
    }

    #[test]
    fn test_underflow_floor_tracks_budget() {
        let shallow = PrecisionContext::new(20).unwrap();
        let deep = PrecisionContext::new(80).unwrap();
        // 20 digits still uses the 1e-50 floor; 80 digits deepens it
        assert!(shallow.underflow_floor() < 1e-49f64);
        assert!(deep.underflow_floor() < shallow.underflow_floor());
    }

    #[test]
    fn test_window_scales_with_digits() {
        let ctx = PrecisionContext::new(50).unwrap();
        let x = ctx.integration_window();
        assert!(x > 114f64 && x < 116f64);
    }

    #[test]
    fn test_constants_at_precision() {
        let ctx = PrecisionContext::new(50).unwrap();
        let pi = ctx.pi();
        assert!(pi > 3.14159f64 && pi < 3.1416f64);
        let gamma = ctx.euler_gamma();
        assert!(gamma > 0.5772f64 && gamma < 0.5773f64);
    }

    #[test]
    fn test_parse_float_roundtrip() {
        let ctx = PrecisionContext::new(50).unwrap();
        let v = ctx.parse_float("14.134725142068005").unwrap();
        assert!(v > 14.13f64 && v < 14.14f64);
        assert!(ctx.parse_float("not a number").is_err());
    }
}
