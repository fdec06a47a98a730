//! Explicit-Formula Orchestrator
//!
//! Builds the Gaussian test-function/transform pair, invokes the three
//! evaluators, and combines them under the defining identity.
//!
//! ## The two formulations
//!
//! The explicit formula equates a geometric side with a spectral side:
//!
//! ```text
//! geometric = poles - archimedean - primes      (primary definition)
//! spectral  = zeros
//! ```
//!
//! The **geometric side is the primary total**; the spectral side is
//! used strictly as a consistency check, never silently swapped in. The
//! absolute difference between the two is reported as
//! `identity_residual`, and a residual beyond the precision-scaled
//! tolerance is a computation defect (precision, truncation, or formula
//! selection), not a legitimate negative result.
//!
//! ## Positivity
//!
//! `ComputationResult::is_positive` is a numerical regression oracle
//! against the positivity conjecture — an experiment, not a proof.

use crate::config::FormulaConfig;
use crate::errors::{FormulaError, FormulaResult};
use crate::primes_sum::ContributionRecord;
use crate::testfn::GaussianPair;
use crate::zeros::ZeroSequence;
use crate::{archimedean, primes_sum, zeros};
use rug::Float;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info_span, warn};
use weil_core::{PrecisionContext, POSITIVITY_TOLERANCE};

/// Immutable snapshot of one explicit-formula evaluation.
///
/// Produced once per orchestrator call and owned by the caller; every
/// field keeps the full working precision.
#[derive(Debug, Clone)]
pub struct ComputationResult {
    /// Archimedean term W_R(f)
    pub archimedean: Float,
    /// Spectral-side zeros term W_zeros(f)
    pub zeros: Float,
    /// Geometric-side primes term W_primes(f)
    pub primes: Float,
    /// Pole contributions: f̂(i/2) + f̂(-i/2)
    pub poles: Float,
    /// Per-prime contributions in ascending-prime order
    pub per_prime_contributions: ContributionRecord,
    /// Primary total: poles - archimedean - primes
    pub total: Float,
    /// |geometric - spectral|
    pub identity_residual: Float,
    /// Decimal digits of the context the result was computed under
    pub precision_digits: u32,
    /// Gaussian width parameter
    pub sigma: Float,
    /// Number of supplied zero ordinates
    pub zero_count: usize,
    /// Number of primes actually processed (record length)
    pub prime_count: usize,
}

impl ComputationResult {
    /// The positivity criterion: total ≥ -1e-10.
    ///
    /// A numerical pass/fail against the conjecture, meaningful only
    /// when [`Self::ensure_identity`] also passes.
    pub fn is_positive(&self) -> bool {
        self.total >= -POSITIVITY_TOLERANCE
    }

    /// Fail if the two formulations disagree beyond tolerance.
    ///
    /// The tolerance is the precision-scaled 10^{-(digits-5)}. A
    /// positivity verdict drawn from a result that fails this check is
    /// meaningless.
    pub fn ensure_identity(&self, ctx: &PrecisionContext) -> FormulaResult<()> {
        let tolerance = ctx.quadrature_tolerance();
        if self.identity_residual > tolerance {
            return Err(FormulaError::IdentityResidualExceeded {
                residual: self.identity_residual.to_f64(),
                tolerance: tolerance.to_f64(),
            });
        }
        Ok(())
    }

    /// Plain-f64 snapshot for external reporting collaborators.
    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            archimedean: self.archimedean.to_f64(),
            zeros: self.zeros.to_f64(),
            primes: self.primes.to_f64(),
            poles: self.poles.to_f64(),
            total: self.total.to_f64(),
            identity_residual: self.identity_residual.to_f64(),
            precision_digits: self.precision_digits,
            sigma: self.sigma.to_f64(),
            zero_count: self.zero_count,
            prime_count: self.prime_count,
            positive: self.is_positive(),
        }
    }
}

/// Serializable breakdown of a computation, at f64 display precision.
///
/// The full-precision values stay in [`ComputationResult`]; this is the
/// shape handed to dashboards and reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultSummary {
    pub archimedean: f64,
    pub zeros: f64,
    pub primes: f64,
    pub poles: f64,
    pub total: f64,
    pub identity_residual: f64,
    pub precision_digits: u32,
    pub sigma: f64,
    pub zero_count: usize,
    pub prime_count: usize,
    pub positive: bool,
}

impl fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "W_archimedean = {:+.6e}", self.archimedean)?;
        writeln!(f, "W_zeros       = {:+.6e}", self.zeros)?;
        writeln!(f, "W_primes      = {:+.6e}", self.primes)?;
        writeln!(f, "W_poles       = {:+.6e}", self.poles)?;
        writeln!(f, "W_total       = {:+.6e}", self.total)?;
        writeln!(f, "residual      = {:.3e}", self.identity_residual)?;
        write!(
            f,
            "positivity    : {} (sigma = {}, {} zeros, {} primes, {} digits)",
            if self.positive { "POSITIVE" } else { "NEGATIVE" },
            self.sigma,
            self.zero_count,
            self.prime_count,
            self.precision_digits
        )
    }
}

/// Stateless entry point for full explicit-formula evaluations.
pub struct WeilFunctional;

impl WeilFunctional {
    /// Evaluate the formula for a Gaussian of width `sigma` against the
    /// supplied zeros and the first `num_primes` primes.
    ///
    /// Pure: identical inputs and context give bit-identical results.
    ///
    /// # Errors
    /// Any evaluator defect (`InvalidSigma`, `QuadratureNonConvergence`,
    /// `SeriesTruncationExceeded`, `Core`). The identity residual is
    /// reported in the result but not enforced here; see
    /// [`Self::compute_verified`].
    pub fn compute(
        zeros: &ZeroSequence,
        sigma: Float,
        num_primes: usize,
        config: &FormulaConfig,
        ctx: &PrecisionContext,
    ) -> FormulaResult<ComputationResult> {
        let span = info_span!(
            "weil_functional",
            sigma = sigma.to_f64(),
            digits = ctx.digits()
        );
        let _guard = span.enter();

        let pair = GaussianPair::new(sigma)?;

        let w_arch = archimedean::compute(&pair, config, ctx)?;
        debug!(value = w_arch.to_f64(), "archimedean");

        let w_zeros = zeros::compute(zeros, &pair, ctx);
        debug!(value = w_zeros.to_f64(), "zeros");

        let (w_primes, record) = primes_sum::compute(&pair, num_primes, config, ctx)?;
        debug!(value = w_primes.to_f64(), "primes");

        // Pole contributions from s = 0 and s = 1 (t = ±i/2)
        let mut w_poles = pair.pole_value(ctx);
        w_poles *= 2u32;

        // Primary definition: the geometric side
        let mut total = w_poles.clone();
        total -= &w_arch;
        total -= &w_primes;

        // Cross-check against the spectral side
        let identity_residual = ctx.float(&total - &w_zeros).abs();
        if identity_residual > ctx.quadrature_tolerance() {
            warn!(
                residual = identity_residual.to_f64(),
                "formulations disagree beyond tolerance"
            );
        }

        let prime_count = record.len();
        Ok(ComputationResult {
            archimedean: w_arch,
            zeros: w_zeros,
            primes: w_primes,
            poles: w_poles,
            per_prime_contributions: record,
            total,
            identity_residual,
            precision_digits: ctx.digits(),
            sigma: pair.sigma().clone(),
            zero_count: zeros.len(),
            prime_count,
        })
    }

    /// [`Self::compute`] followed by [`ComputationResult::ensure_identity`].
    ///
    /// The recommended entry point when the positivity verdict matters.
    pub fn compute_verified(
        zeros: &ZeroSequence,
        sigma: Float,
        num_primes: usize,
        config: &FormulaConfig,
        ctx: &PrecisionContext,
    ) -> FormulaResult<ComputationResult> {
        let result = Self::compute(zeros, sigma, num_primes, config, ctx)?;
        result.ensure_identity(ctx)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weil_core::REFERENCE_GAMMAS;

    fn ctx() -> PrecisionContext {
        PrecisionContext::new(30).unwrap()
    }

    fn reference_sequence(ctx: &PrecisionContext) -> ZeroSequence {
        let gammas = REFERENCE_GAMMAS
            .iter()
            .map(|s| ctx.parse_float(s).unwrap())
            .collect();
        ZeroSequence::from_ascending(gammas).unwrap()
    }

    #[test]
    fn test_breakdown_consistency() {
        let ctx = ctx();
        let zeros = reference_sequence(&ctx);
        let result = WeilFunctional::compute(
            &zeros,
            ctx.float(1),
            20,
            &FormulaConfig::default(),
            &ctx,
        )
        .unwrap();

        // total must equal poles - archimedean - primes exactly as stored
        let mut recombined = result.poles.clone();
        recombined -= &result.archimedean;
        recombined -= &result.primes;
        assert_eq!(recombined, result.total);

        // residual must equal |total - zeros| as stored
        let residual = ctx.float(&result.total - &result.zeros).abs();
        assert_eq!(residual, result.identity_residual);

        assert_eq!(result.zero_count, 5);
        assert_eq!(result.prime_count, result.per_prime_contributions.len());
        assert_eq!(result.precision_digits, 30);
    }

    #[test]
    fn test_deterministic() {
        let ctx = ctx();
        let zeros = reference_sequence(&ctx);
        let config = FormulaConfig::default();
        let a = WeilFunctional::compute(&zeros, ctx.float(1.5), 10, &config, &ctx).unwrap();
        let b = WeilFunctional::compute(&zeros, ctx.float(1.5), 10, &config, &ctx).unwrap();
        assert_eq!(a.total, b.total);
        assert_eq!(a.identity_residual, b.identity_residual);
        assert_eq!(a.archimedean, b.archimedean);
    }

    #[test]
    fn test_summary_roundtrip() {
        let ctx = ctx();
        let zeros = reference_sequence(&ctx);
        let result = WeilFunctional::compute(
            &zeros,
            ctx.float(1),
            10,
            &FormulaConfig::default(),
            &ctx,
        )
        .unwrap();

        let summary = result.summary();
        assert_eq!(summary.positive, result.is_positive());
        let json = serde_json::to_string(&summary).unwrap();
        let back: ResultSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }

    #[test]
    fn test_invalid_sigma_rejected() {
        let ctx = ctx();
        let zeros = reference_sequence(&ctx);
        let result = WeilFunctional::compute(
            &zeros,
            ctx.float(-2),
            10,
            &FormulaConfig::default(),
            &ctx,
        );
        assert!(matches!(result, Err(FormulaError::InvalidSigma { .. })));
    }

    // End-to-end regression against a real zero table. Needs a local
    // file (one ordinate per line, ascending); point WEIL_ZEROS_FILE at
    // it and run with --ignored.
    #[test]
    #[ignore]
    fn test_positivity_against_zero_table() {
        let path = std::env::var("WEIL_ZEROS_FILE").expect("set WEIL_ZEROS_FILE");
        let ctx = PrecisionContext::new(50).unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        let gammas: Vec<Float> = text
            .lines()
            .filter_map(|line| line.split_whitespace().last())
            .take(10_000)
            .map(|tok| ctx.parse_float(tok).unwrap())
            .collect();
        let zeros = ZeroSequence::from_ascending(gammas).unwrap();
        crate::zeros::verify_leading(&zeros, &ctx).unwrap();

        for sigma in [1.0, 1.5, 2.0] {
            let result = WeilFunctional::compute_verified(
                &zeros,
                ctx.float(sigma),
                500,
                &FormulaConfig::default(),
                &ctx,
            )
            .unwrap();
            assert!(
                result.is_positive(),
                "positivity failed at sigma={sigma}: W={:.6e}",
                result.total.to_f64()
            );
        }
    }
}
