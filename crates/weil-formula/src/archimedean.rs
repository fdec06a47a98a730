//! Archimedean Term
//!
//! The correction term of the explicit formula arising from the real
//! place:
//!
//! ```text
//! W_R(f) = (ln(4π) + γ_E)·f(0)
//!        + ∫₀^X [f(x)·e^{x/2} + f(-x)·e^{-x/2} - 2f(0)] / |e^x - 1| dx
//! ```
//!
//! written in the additive variable x = ln u. At x = 0 the integrand is a
//! removable 0/0 singularity — the numerator and its first derivative
//! vanish by symmetry — and is special-cased to exactly zero inside
//! |x| < `SINGULARITY_CUTOFF` instead of being evaluated as a ratio.
//!
//! The window X = 2.3·digits replaces the infinite upper limit: the
//! integrand decays like e^{-x}, so the discarded tail sits below the
//! precision floor. Integrating further is wasted work and numerically
//! unstable.

use crate::config::FormulaConfig;
use crate::errors::FormulaResult;
use crate::quadrature::integrate;
use crate::testfn::TestFunction;
use rug::Float;
use tracing::debug;
use weil_core::{PrecisionContext, SINGULARITY_CUTOFF};

/// Compute the archimedean term W_R(f).
///
/// # Errors
/// `QuadratureNonConvergence` if the singular integral does not settle
/// within the configured level budget.
pub fn compute<F: TestFunction>(
    f: &F,
    config: &FormulaConfig,
    ctx: &PrecisionContext,
) -> FormulaResult<Float> {
    let f0 = f.evaluate(&ctx.zero(), ctx);

    // Closed form: (ln(4π) + γ_E)·f(0)
    let mut four_pi = ctx.pi();
    four_pi *= 4u32;
    let mut coeff = four_pi.ln();
    coeff += ctx.euler_gamma();
    let closed_form = ctx.float(&coeff * &f0);

    let integral = singular_integral(f, &f0, config, ctx)?;
    debug!(
        closed_form = closed_form.to_f64(),
        integral = integral.to_f64(),
        "archimedean term"
    );

    Ok(closed_form + integral)
}

/// The regularized integrand at one point.
///
/// Inside |x| < `SINGULARITY_CUTOFF` the value is exactly zero by the
/// removable-singularity rule; the ratio is never formed there.
pub fn integrand<F: TestFunction>(
    f: &F,
    f0: &Float,
    x: &Float,
    ctx: &PrecisionContext,
) -> Float {
    let cutoff = ctx.float(SINGULARITY_CUTOFF);
    if x.clone().abs() < cutoff {
        return ctx.zero();
    }
    let mut half = x.clone();
    half /= 2u32;
    let exp_half = half.clone().exp();
    let exp_neg_half = (-half).exp();
    let f_pos = f.evaluate(x, ctx);
    let f_neg = f.evaluate(&ctx.float(-x), ctx);

    let mut numerator = ctx.float(&f_pos * &exp_half);
    numerator += ctx.float(&f_neg * &exp_neg_half);
    let mut two_f0 = f0.clone();
    two_f0 *= 2u32;
    numerator -= two_f0;

    let denominator = (x.clone().exp() - 1u32).abs();
    ctx.float(&numerator / &denominator)
}

/// The regularized principal-value integral over [0, X].
fn singular_integral<F: TestFunction>(
    f: &F,
    f0: &Float,
    config: &FormulaConfig,
    ctx: &PrecisionContext,
) -> FormulaResult<Float> {
    // Breakpoints keep the quadrature from probing the singular region
    // with naive step sizes; any breakpoint past the window is dropped.
    let window = ctx.integration_window();
    let mut breakpoints = vec![ctx.zero(), ctx.float(1e-5), ctx.float(1), ctx.float(10)];
    breakpoints.retain(|b| *b < window);
    breakpoints.push(window);

    let tol = ctx.quadrature_tolerance();
    integrate(
        |x| integrand(f, f0, x, ctx),
        &breakpoints,
        &tol,
        config.max_quadrature_levels,
        ctx,
    )
}
