//! Test-Function / Analytic-Transform Pair
//!
//! The explicit formula is evaluated against a smooth, rapidly decaying
//! test function together with its closed-form frequency-domain
//! counterpart. The two capabilities are separate traits so an evaluator
//! states exactly which side of the pair it consumes: the archimedean and
//! prime terms see only [`TestFunction`], the zeros term only
//! [`AnalyticTransform`].
//!
//! The one supported family is the Gaussian
//!
//! ```text
//! f(u)  = exp(-(u / 2σ)²)
//! f̂(t)  = 2σ·√π·exp(-(σt)²)
//! ```
//!
//! whose transform is exact, monotone non-increasing in |t|, and even —
//! the three properties the summation early-exits rely on.

use crate::errors::{FormulaError, FormulaResult};
use rug::Float;
use weil_core::PrecisionContext;

/// A smooth, rapidly decaying test function on the reals.
///
/// Implementations must be pure: identical input and context give a
/// bit-identical result.
pub trait TestFunction {
    /// Evaluate f at `u` under the given precision context.
    fn evaluate(&self, u: &Float, ctx: &PrecisionContext) -> Float;
}

/// The closed-form transform paired with a test function.
///
/// Used in place of a numerical transform; exact for the supported
/// Gaussian family.
pub trait AnalyticTransform {
    /// Evaluate f̂ at `t` under the given precision context.
    fn transform(&self, t: &Float, ctx: &PrecisionContext) -> Float;
}

/// The Gaussian test-function family, parameterized by its width σ.
#[derive(Debug, Clone)]
pub struct GaussianPair {
    sigma: Float,
}

impl GaussianPair {
    /// Create a Gaussian pair with width `sigma`.
    ///
    /// # Errors
    /// `InvalidSigma` unless sigma is finite and strictly positive.
    pub fn new(sigma: Float) -> FormulaResult<Self> {
        if !sigma.is_finite() || sigma <= 0 {
            return Err(FormulaError::InvalidSigma {
                sigma: sigma.to_f64(),
            });
        }
        Ok(Self { sigma })
    }

    /// The width parameter σ.
    pub fn sigma(&self) -> &Float {
        &self.sigma
    }

    /// The transform evaluated at the pole locations t = ±i/2.
    ///
    /// With t² = -1/4 the Gaussian in f̂ flips sign in the exponent:
    /// f̂(±i/2) = 2σ·√π·exp(σ²/4). Real-valued, so no complex arithmetic
    /// is needed. Consumed only by the orchestrator's geometric side.
    pub fn pole_value(&self, ctx: &PrecisionContext) -> Float {
        let sqrt_pi = ctx.pi().sqrt();
        let mut exponent = ctx.float(&self.sigma * &self.sigma);
        exponent /= 4u32;
        let mut out = ctx.float(&self.sigma * &sqrt_pi);
        out *= 2u32;
        out *= exponent.exp();
        out
    }
}

impl TestFunction for GaussianPair {
    /// f(u) = exp(-(u / 2σ)²)
    fn evaluate(&self, u: &Float, ctx: &PrecisionContext) -> Float {
        let mut two_sigma = ctx.float(&self.sigma);
        two_sigma *= 2u32;
        let ratio = ctx.float(u / &two_sigma);
        (-ratio.square()).exp()
    }
}

impl AnalyticTransform for GaussianPair {
    /// f̂(t) = 2σ·√π·exp(-(σt)²)
    fn transform(&self, t: &Float, ctx: &PrecisionContext) -> Float {
        let sqrt_pi = ctx.pi().sqrt();
        let st = ctx.float(&self.sigma * t);
        let gauss = (-st.square()).exp();
        let mut out = ctx.float(&self.sigma * &sqrt_pi);
        out *= 2u32;
        out *= gauss;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PrecisionContext {
        PrecisionContext::new(50).unwrap()
    }

    #[test]
    fn test_rejects_nonpositive_sigma() {
        let ctx = ctx();
        assert!(GaussianPair::new(ctx.zero()).is_err());
        assert!(GaussianPair::new(ctx.float(-1)).is_err());
        assert!(GaussianPair::new(ctx.float(1)).is_ok());
    }

    #[test]
    fn test_gaussian_peak() {
        let ctx = ctx();
        let pair = GaussianPair::new(ctx.float(1)).unwrap();
        let peak = pair.evaluate(&ctx.zero(), &ctx);
        assert_eq!(peak, 1);
    }

    #[test]
    fn test_gaussian_even() {
        let ctx = ctx();
        let pair = GaussianPair::new(ctx.float(1.5)).unwrap();
        let x = ctx.float(2.75);
        let neg_x = ctx.float(-2.75);
        assert_eq!(pair.evaluate(&x, &ctx), pair.evaluate(&neg_x, &ctx));
    }

    #[test]
    fn test_gaussian_value() {
        let ctx = ctx();
        let pair = GaussianPair::new(ctx.float(1)).unwrap();
        // f(2) = exp(-1) for sigma = 1
        let v = pair.evaluate(&ctx.float(2), &ctx);
        let expected = ctx.float(1).exp().recip();
        let diff = ctx.float(&v - &expected).abs();
        assert!(diff < 1e-45f64);
    }

    #[test]
    fn test_transform_at_origin() {
        let ctx = ctx();
        let pair = GaussianPair::new(ctx.float(1)).unwrap();
        // f̂(0) = 2·√π ≈ 3.5449077
        let v = pair.transform(&ctx.zero(), &ctx);
        assert!(v > 3.5449f64 && v < 3.545f64);
    }

    #[test]
    fn test_transform_monotone_decreasing() {
        let ctx = ctx();
        let pair = GaussianPair::new(ctx.float(1)).unwrap();
        let a = pair.transform(&ctx.float(1), &ctx);
        let b = pair.transform(&ctx.float(2), &ctx);
        let c = pair.transform(&ctx.float(3), &ctx);
        assert!(a > b);
        assert!(b > c);
    }

    #[test]
    fn test_pole_value() {
        let ctx = ctx();
        let pair = GaussianPair::new(ctx.float(1)).unwrap();
        // 2·√π·exp(1/4) ≈ 4.552
        let v = pair.pole_value(&ctx);
        assert!(v > 4.55f64 && v < 4.56f64);
    }
}
