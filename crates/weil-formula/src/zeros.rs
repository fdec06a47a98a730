//! Zeros Term
//!
//! The spectral side of the explicit formula: the sum of the analytic
//! transform over the supplied zero ordinates,
//!
//! ```text
//! W_zeros(f) = Σₙ f̂(γₙ)
//! ```
//!
//! doubled at the end because only the nonnegative ordinates are
//! supplied and the true sequence is symmetric (γ₋ₙ = -γₙ) with an even
//! transform.
//!
//! ## Early-exit precondition
//!
//! Accumulation stops once a term drops below the underflow floor. That
//! is sound only because the sequence ascends and the Gaussian transform
//! is monotone non-increasing in t — every skipped term is no larger
//! than the one that triggered the exit. It is a correctness
//! precondition on the supplied sequence and transform family, not a
//! free-standing optimization.

use crate::errors::{FormulaError, FormulaResult};
use crate::testfn::AnalyticTransform;
use rug::Float;
use tracing::debug;
use weil_core::{PrecisionContext, REFERENCE_GAMMAS, REFERENCE_TOLERANCE};

/// Ascending sequence of nonnegative zero ordinates γₙ.
///
/// Validated once at construction; evaluators can then rely on the
/// ordering invariant without re-checking.
#[derive(Debug, Clone, Default)]
pub struct ZeroSequence {
    gammas: Vec<Float>,
}

impl ZeroSequence {
    /// Build a sequence from strictly ascending, nonnegative ordinates.
    ///
    /// # Errors
    /// `ZeroNegative` or `ZerosNotAscending` at the first offending index.
    pub fn from_ascending(gammas: Vec<Float>) -> FormulaResult<Self> {
        for (index, gamma) in gammas.iter().enumerate() {
            if gamma.is_sign_negative() && !gamma.is_zero() {
                return Err(FormulaError::ZeroNegative { index });
            }
            if index > 0 && gammas[index - 1] >= *gamma {
                return Err(FormulaError::ZerosNotAscending { index });
            }
        }
        Ok(Self { gammas })
    }

    /// Number of supplied ordinates.
    pub fn len(&self) -> usize {
        self.gammas.len()
    }

    /// True when no ordinates were supplied.
    pub fn is_empty(&self) -> bool {
        self.gammas.is_empty()
    }

    /// Ordinates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Float> {
        self.gammas.iter()
    }

    /// The nth ordinate, if present.
    pub fn get(&self, index: usize) -> Option<&Float> {
        self.gammas.get(index)
    }
}

/// Sum the transform over the sequence and double for the negative side.
///
/// An empty sequence yields exactly zero.
pub fn compute<T: AnalyticTransform>(
    zeros: &ZeroSequence,
    transform: &T,
    ctx: &PrecisionContext,
) -> Float {
    let floor = ctx.underflow_floor();
    let mut total = ctx.zero();
    let mut used = 0usize;

    for gamma in zeros.iter() {
        let term = transform.transform(gamma, ctx);
        total += &term;
        used += 1;
        if term.clone().abs() < floor {
            // Monotone decay: everything past this point is smaller still
            break;
        }
    }
    debug!(supplied = zeros.len(), used, "zeros term");

    total *= 2u32;
    total
}

/// Check the leading entries against the reference zero table.
///
/// Verifies up to the first five ordinates within `REFERENCE_TOLERANCE`.
/// The verification half of the external zero-source collaborator: the
/// core never fetches, it only checks what it was handed.
pub fn verify_leading(zeros: &ZeroSequence, ctx: &PrecisionContext) -> FormulaResult<()> {
    let tolerance = ctx.float(REFERENCE_TOLERANCE);
    for (index, reference) in REFERENCE_GAMMAS.iter().enumerate().take(zeros.len()) {
        let expected = ctx.parse_float(reference).map_err(FormulaError::Core)?;
        let got = zeros.get(index).expect("index bounded by take");
        let diff = ctx.float(got - &expected).abs();
        if diff > tolerance {
            return Err(FormulaError::ReferenceZeroMismatch {
                index,
                expected: (*reference).to_string(),
                got: got.to_f64().to_string(),
            });
        }
    }
    Ok(())
}
