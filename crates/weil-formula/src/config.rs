//! Formula Configuration
//!
//! Tunable loop budgets for the evaluators. The defaults reproduce the
//! named heuristics in `weil_core::constants`; overrides exist mainly for
//! tests that need to force a budget-exhaustion path.

use crate::quadrature::DEFAULT_MAX_LEVELS;
use weil_core::MULTIPLICITY_CAP;

/// Iteration budgets for a formula evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulaConfig {
    /// Hard cap on the prime-power multiplicity m in the inner prime sum.
    pub multiplicity_cap: u32,

    /// Level budget of the tanh-sinh quadrature; each level doubles the
    /// node density.
    pub max_quadrature_levels: u32,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            multiplicity_cap: MULTIPLICITY_CAP,
            max_quadrature_levels: DEFAULT_MAX_LEVELS,
        }
    }
}

impl FormulaConfig {
    /// Override the inner-sum multiplicity cap.
    pub fn with_multiplicity_cap(mut self, cap: u32) -> Self {
        self.multiplicity_cap = cap;
        self
    }

    /// Override the quadrature level budget.
    pub fn with_max_quadrature_levels(mut self, levels: u32) -> Self {
        self.max_quadrature_levels = levels;
        self
    }
}
