//! # Weil Formula
//!
//! Arbitrary-precision evaluator of the Weil explicit formula for the
//! Gaussian test-function family.
//!
//! The formula decomposes a functional of a smooth, rapidly decaying
//! test function into three terms:
//!
//! - an **archimedean** term — closed form plus a regularized singular
//!   integral ([`archimedean`]);
//! - a **zeros** term — the transform summed over supplied zero
//!   ordinates ([`zeros`]);
//! - a **primes** term — a nested convergent sum over primes and their
//!   powers ([`primes_sum`]);
//!
//! combined by the [`functional::WeilFunctional`] orchestrator into a
//! primary (geometric) total, cross-checked against the spectral side
//! and reported with an identity-consistency residual.
//!
//! Every entry point takes an explicit
//! [`weil_core::PrecisionContext`]; there is no ambient precision
//! state, and every computation is a pure function of its arguments.

pub mod archimedean;
pub mod config;
pub mod errors;
pub mod functional;
pub mod primes_sum;
pub mod quadrature;
pub mod testfn;
pub mod zeros;

pub use config::FormulaConfig;
pub use errors::{FormulaError, FormulaResult};
pub use functional::{ComputationResult, ResultSummary, WeilFunctional};
pub use primes_sum::ContributionRecord;
pub use testfn::{AnalyticTransform, GaussianPair, TestFunction};
pub use zeros::ZeroSequence;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::FormulaConfig;
    pub use crate::errors::{FormulaError, FormulaResult};
    pub use crate::functional::{ComputationResult, ResultSummary, WeilFunctional};
    pub use crate::primes_sum::ContributionRecord;
    pub use crate::testfn::{AnalyticTransform, GaussianPair, TestFunction};
    pub use crate::zeros::ZeroSequence;
    pub use weil_core::prelude::*;
}
