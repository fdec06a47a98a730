//! Primes Term
//!
//! The geometric side's sum over primes and their powers:
//!
//! ```text
//! W_primes(f) = Σ_p ln(p) · Σ_{m≥1} p^{-m/2}·[f(m·ln p) + f(-m·ln p)]
//! ```
//!
//! The p^{-m/2} factor is what makes the inner sum converge regardless
//! of f; the inner loop exits once that factor or the whole term drops
//! below the precision floor, whichever comes first. The outer loop
//! exits once a full prime contribution drops below the floor — sound
//! for rapidly decaying test functions, where contributions shrink
//! monotonically with p, but not a law for arbitrary f; it is a
//! documented precondition on the supported family.

use crate::config::FormulaConfig;
use crate::errors::{FormulaError, FormulaResult};
use crate::testfn::TestFunction;
use rug::Float;
use tracing::debug;
use weil_core::{first_primes, PrecisionContext};

/// Per-prime contributions in ascending-prime insertion order.
///
/// The order is semantically meaningful for inspection and
/// visualization, not incidental: consumers rely on walking the primes
/// the way the summation did. Every prime processed before the early
/// exit is present, including the final one whose contribution fell
/// below the cutoff.
#[derive(Debug, Clone, Default)]
pub struct ContributionRecord {
    entries: Vec<(u64, Float)>,
}

impl ContributionRecord {
    fn push(&mut self, prime: u64, contribution: Float) {
        self.entries.push((prime, contribution));
    }

    /// Number of recorded primes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (prime, contribution) pairs in ascending-prime order.
    pub fn iter(&self) -> impl Iterator<Item = &(u64, Float)> {
        self.entries.iter()
    }

    /// The contribution of one prime, if it was processed.
    pub fn get(&self, prime: u64) -> Option<&Float> {
        self.entries
            .iter()
            .find(|(p, _)| *p == prime)
            .map(|(_, c)| c)
    }

    /// The recorded primes in ascending order.
    pub fn primes(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|(p, _)| *p)
    }
}

/// Compute W_primes(f) over the first `num_primes` primes.
///
/// Returns the accumulated total together with the per-prime record.
///
/// # Errors
/// - `Core(InsufficientPrimes)` if prime generation cannot honor the
///   request;
/// - `SeriesTruncationExceeded` if an inner sum hits the multiplicity
///   cap while still above the precision floor.
pub fn compute<F: TestFunction>(
    f: &F,
    num_primes: usize,
    config: &FormulaConfig,
    ctx: &PrecisionContext,
) -> FormulaResult<(Float, ContributionRecord)> {
    let primes = first_primes(num_primes)?;
    let epsilon = ctx.epsilon();

    let mut total = ctx.zero();
    let mut record = ContributionRecord::default();

    for &p in &primes {
        let log_p = ctx.float(p).ln();
        let inner = inner_sum(f, p, &log_p, &epsilon, config, ctx)?;
        let contribution = ctx.float(&log_p * &inner);
        total += &contribution;

        let vanished = contribution.clone().abs() < epsilon;
        record.push(p, contribution);
        if vanished {
            // Monotone-decay precondition on the test-function family
            break;
        }
    }
    debug!(
        requested = num_primes,
        processed = record.len(),
        "primes term"
    );

    Ok((total, record))
}

/// Inner sum over prime-power multiplicities for one prime.
fn inner_sum<F: TestFunction>(
    f: &F,
    prime: u64,
    log_p: &Float,
    epsilon: &Float,
    config: &FormulaConfig,
    ctx: &PrecisionContext,
) -> FormulaResult<Float> {
    let mut inner = ctx.zero();
    for m in 1..=config.multiplicity_cap {
        // p^{-m/2} = exp(-(m/2)·ln p)
        let mut exponent = ctx.float(log_p * m);
        exponent /= 2u32;
        let p_power = (-exponent).exp();
        if p_power < *epsilon {
            return Ok(inner);
        }

        let u = ctx.float(log_p * m);
        let f_pos = f.evaluate(&u, ctx);
        let f_neg = f.evaluate(&ctx.float(-&u), ctx);
        let mut term = ctx.float(&f_pos + &f_neg);
        term *= &p_power;
        inner += &term;

        if term.clone().abs() < *epsilon {
            return Ok(inner);
        }
    }
    Err(FormulaError::SeriesTruncationExceeded {
        prime,
        cap: config.multiplicity_cap,
    })
}
