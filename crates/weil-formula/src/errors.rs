//! Formula Error Types
//!
//! Every variant is a local computation defect, not a transient fault:
//! none should be retried, and a positivity verdict drawn from a result
//! that produced one of these is meaningless.

use thiserror::Error;
use weil_core::CoreError;

/// Errors from the explicit-formula evaluators and orchestrator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    /// The adaptive quadrature failed to converge within its level budget
    #[error("Quadrature did not converge within {levels} levels (error estimate {estimate:.3e})")]
    QuadratureNonConvergence { estimate: f64, levels: u32 },

    /// The prime-power inner sum hit its multiplicity cap before reaching
    /// the precision floor
    #[error("Prime-power series for p = {prime} still above the precision floor at m = {cap}")]
    SeriesTruncationExceeded { prime: u64, cap: u32 },

    /// The geometric and spectral totals disagree beyond tolerance
    #[error("Identity residual {residual:.3e} exceeds tolerance {tolerance:.3e}")]
    IdentityResidualExceeded { residual: f64, tolerance: f64 },

    /// Supplied zero sequence is not strictly ascending
    #[error("Zero sequence not strictly ascending at index {index}")]
    ZerosNotAscending { index: usize },

    /// Supplied zero sequence contains a negative value
    #[error("Zero sequence contains a negative value at index {index}")]
    ZeroNegative { index: usize },

    /// A leading zero does not match the reference table
    #[error("Zero {index} = {got} does not match reference value {expected}")]
    ReferenceZeroMismatch {
        index: usize,
        expected: String,
        got: String,
    },

    /// Gaussian width parameter must be positive
    #[error("Invalid sigma: {sigma} (must be positive and finite)")]
    InvalidSigma { sigma: f64 },

    /// Error from the precision/prime foundation
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

/// Result type for formula operations
pub type FormulaResult<T> = Result<T, FormulaError>;
