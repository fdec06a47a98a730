//! Tanh-Sinh Quadrature
//!
//! Level-adaptive double-exponential integration over a chain of panels.
//! The variable change x = tanh((π/2)·sinh t) pushes the endpoints to
//! t = ±∞ with doubly-exponential weight decay, so endpoint singularities
//! and steep integrands converge geometrically as the node density
//! doubles per level.
//!
//! Callers supply explicit internal breakpoints; each panel between
//! consecutive breakpoints is integrated independently. This is how the
//! archimedean evaluator keeps naive step sizes away from the removable
//! singularity at the origin.
//!
//! Failure to converge within the level budget is an error, never a
//! silently inaccurate value.

use crate::errors::{FormulaError, FormulaResult};
use rug::Float;
use tracing::trace;
use weil_core::PrecisionContext;

/// Default tanh-sinh level budget.
///
/// Level k places nodes at spacing 2^{-k}; 12 levels resolve well past
/// 50-digit tolerances for smooth integrands.
pub const DEFAULT_MAX_LEVELS: u32 = 12;

/// Hard cap on nodes per side per level, so a runaway integrand cannot
/// hang the loop before the weight underflow check triggers.
const MAX_NODES_PER_SIDE: u32 = 40_000;

/// Integrate `f` over the chain of panels defined by `breakpoints`.
///
/// Breakpoints must be ascending; zero-length panels are skipped. Each
/// panel is integrated to absolute/relative tolerance `tol` and the panel
/// results are summed.
///
/// # Errors
/// `QuadratureNonConvergence` if any panel fails to converge within
/// `max_levels` doubling levels.
pub fn integrate<F>(
    f: F,
    breakpoints: &[Float],
    tol: &Float,
    max_levels: u32,
    ctx: &PrecisionContext,
) -> FormulaResult<Float>
where
    F: Fn(&Float) -> Float,
{
    let mut total = ctx.zero();
    for pair in breakpoints.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if b <= a {
            continue;
        }
        total += integrate_panel(&f, a, b, tol, max_levels, ctx)?;
    }
    Ok(total)
}

/// Tanh-sinh integration of one panel [a, b].
fn integrate_panel<F>(
    f: &F,
    a: &Float,
    b: &Float,
    tol: &Float,
    max_levels: u32,
    ctx: &PrecisionContext,
) -> FormulaResult<Float>
where
    F: Fn(&Float) -> Float,
{
    // Affine map [a, b] -> [-1, 1]: x = center + radius·y
    let mut center = ctx.float(a + b);
    center /= 2u32;
    let mut radius = ctx.float(b - a);
    radius /= 2u32;

    // Node weights below this floor cannot move the sum at tolerance tol
    let weight_floor = ctx.float(tol * tol);

    // Level 0: unit spacing, including the central node t = 0
    let mut h = ctx.float(1);
    let pi_half = {
        let mut v = ctx.pi();
        v /= 2u32;
        v
    };
    let central = {
        // t = 0: y = 0, weight = π/2
        let fx = f(&center);
        ctx.float(&pi_half * &fx)
    };
    let mut sum = central;
    sum += level_sum(f, &center, &radius, &h, false, &weight_floor, ctx);
    let mut estimate = ctx.float(&sum * &h);
    estimate *= &radius;

    // Levels 1..: halve h, add the odd-index nodes, compare estimates
    let mut last_diff = ctx.float(f64::INFINITY);
    for level in 1..=max_levels {
        h /= 2u32;
        sum += level_sum(f, &center, &radius, &h, true, &weight_floor, ctx);
        let mut refined = ctx.float(&sum * &h);
        refined *= &radius;

        let diff = ctx.float(&refined - &estimate).abs();
        let mut scale = ctx.float(refined.clone().abs());
        if scale < 1 {
            scale = ctx.float(1);
        }
        let threshold = ctx.float(tol * &scale);
        trace!(level, diff = diff.to_f64(), "tanh-sinh refinement");

        estimate = refined;
        if diff <= threshold {
            return Ok(estimate);
        }
        last_diff = diff;
    }

    Err(FormulaError::QuadratureNonConvergence {
        estimate: last_diff.to_f64(),
        levels: max_levels,
    })
}

/// Sum of w(t)·f(x(t)) over the nodes of one refinement level.
///
/// With `odd_only` set, only odd multiples of `h` are visited — the nodes
/// a halving step adds on top of the previous level.
fn level_sum<F>(
    f: &F,
    center: &Float,
    radius: &Float,
    h: &Float,
    odd_only: bool,
    weight_floor: &Float,
    ctx: &PrecisionContext,
) -> Float
where
    F: Fn(&Float) -> Float,
{
    let pi_half = {
        let mut v = ctx.pi();
        v /= 2u32;
        v
    };
    let mut sum = ctx.zero();
    let step = if odd_only { 2u32 } else { 1u32 };
    let mut j = 1u32;
    while j <= MAX_NODES_PER_SIDE {
        let t = ctx.float(h * j);
        // w(t) = (π/2)·cosh(t) / cosh²((π/2)·sinh(t))
        let arg = ctx.float(&pi_half * &t.clone().sinh());
        let cosh_arg = arg.clone().cosh();
        let mut weight = ctx.float(&pi_half * &t.cosh());
        weight /= ctx.float(&cosh_arg * &cosh_arg);
        if weight < *weight_floor {
            break;
        }

        // y = tanh(arg), symmetric nodes x = center ± radius·y
        let y = arg.tanh();
        let offset = ctx.float(radius * &y);
        let x_pos = ctx.float(center + &offset);
        let x_neg = ctx.float(center - &offset);
        let mut contribution = f(&x_pos);
        contribution += f(&x_neg);
        contribution *= &weight;
        sum += contribution;

        j += step;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PrecisionContext {
        PrecisionContext::new(30).unwrap()
    }

    #[test]
    fn test_polynomial() {
        let ctx = ctx();
        let tol = ctx.quadrature_tolerance();
        let breakpoints = [ctx.zero(), ctx.float(1)];
        // ∫₀¹ x² dx = 1/3
        let result = integrate(
            |x| ctx.float(x * x),
            &breakpoints,
            &tol,
            DEFAULT_MAX_LEVELS,
            &ctx,
        )
        .unwrap();
        let third = ctx.float(1) / 3u32;
        let diff = ctx.float(&result - &third).abs();
        assert!(diff < 1e-25f64);
    }

    #[test]
    fn test_sine() {
        let ctx = ctx();
        let tol = ctx.quadrature_tolerance();
        let breakpoints = [ctx.zero(), ctx.pi()];
        // ∫₀^π sin x dx = 2
        let result = integrate(
            |x| x.clone().sin(),
            &breakpoints,
            &tol,
            DEFAULT_MAX_LEVELS,
            &ctx,
        )
        .unwrap();
        let diff = ctx.float(&result - 2u32).abs();
        assert!(diff < 1e-25f64);
    }

    #[test]
    fn test_breakpoints_split_agrees() {
        let ctx = ctx();
        let tol = ctx.quadrature_tolerance();
        let whole = [ctx.zero(), ctx.float(4)];
        let split = [ctx.zero(), ctx.float(0.5), ctx.float(1), ctx.float(4)];
        let f = |x: &Float| (-x.clone()).exp();
        let unsplit = integrate(f, &whole, &tol, DEFAULT_MAX_LEVELS, &ctx).unwrap();
        let chained = integrate(f, &split, &tol, DEFAULT_MAX_LEVELS, &ctx).unwrap();
        let diff = ctx.float(&unsplit - &chained).abs();
        assert!(diff < 1e-25f64);
    }

    #[test]
    fn test_zero_length_panel_skipped() {
        let ctx = ctx();
        let tol = ctx.quadrature_tolerance();
        let breakpoints = [ctx.zero(), ctx.float(1), ctx.float(1)];
        let result = integrate(|x| ctx.float(x * x), &breakpoints, &tol, 10, &ctx).unwrap();
        let third = ctx.float(1) / 3u32;
        let diff = ctx.float(&result - &third).abs();
        assert!(diff < 1e-25f64);
    }

    #[test]
    fn test_level_budget_exhaustion() {
        let ctx = ctx();
        let tol = ctx.quadrature_tolerance();
        let breakpoints = [ctx.zero(), ctx.float(1)];
        // One level cannot reach a 25-digit tolerance
        let result = integrate(|x| x.clone().sin(), &breakpoints, &tol, 1, &ctx);
        assert!(matches!(
            result,
            Err(FormulaError::QuadratureNonConvergence { levels: 1, .. })
        ));
    }
}
