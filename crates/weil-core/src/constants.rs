//! Named Numerical Heuristics
//!
//! Every truncation bound, sieve heuristic, and tolerance used by the
//! explicit-formula evaluator, collected here as named items instead of
//! magic literals scattered through the numeric loops.
//!
//! The precision-dependent thresholds (epsilon, integration window,
//! underflow floor) live on [`crate::PrecisionContext`] and are derived
//! from these factors at the moment they are needed.

// =============================================================================
// PRECISION
// =============================================================================

/// Largest accepted decimal working precision.
///
/// MPFR handles far more, but beyond a few thousand digits the sieve and
/// quadrature heuristics below stop being sensible.
pub const MAX_DIGITS: u32 = 10_000;

/// Guard bits added on top of the digits-to-bits conversion.
///
/// Matches mpmath's dps-to-prec slack so intermediate rounding never eats
/// into the requested decimal precision.
pub const GUARD_BITS: u32 = 10;

/// log2(10), used to convert decimal digits to binary precision.
pub const LOG2_10: f64 = 3.321928094887362;

// =============================================================================
// SIEVE HEURISTICS
// =============================================================================

/// Minimum sieve bound for prime generation.
///
/// A sieve up to 15000 holds 1754 primes, enough for every small request
/// without resizing.
pub const SIEVE_MIN_BOUND: u64 = 15_000;

/// Sieve bound per requested prime: bound = max(SIEVE_MIN_BOUND, 20n).
///
/// By the prime number theorem the nth prime is near n·ln(n), so 20n keeps
/// a comfortable margin up to n ≈ 10^7 while keeping sieve cost linear in
/// the request.
pub const SIEVE_PRIME_FACTOR: u64 = 20;

/// First 25 primes, pre-computed for the common small requests.
pub const SMALL_PRIMES: [u64; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67,
    71, 73, 79, 83, 89, 97,
];

// =============================================================================
// SERIES TRUNCATION
// =============================================================================

/// Hard cap on the prime-power multiplicity m in the inner prime sum.
///
/// The p^{-m/2} factor reaches 2^{-50} ≈ 10^{-15} by m = 100 even for
/// p = 2; hitting the cap without crossing the precision floor means the
/// precision budget and the test function are inconsistent, reported as
/// `SeriesTruncationExceeded`.
pub const MULTIPLICITY_CAP: u32 = 100;

/// Integration window per decimal digit: X = 2.3 · digits.
///
/// The archimedean integrand decays like e^{-x}, and e^{-2.3·digits} is
/// just below 10^{-digits}, so the tail past X is under the precision
/// floor.
pub const WINDOW_DIGITS_FACTOR: f64 = 2.3;

/// Cutoff around the removable singularity of the archimedean integrand.
///
/// Fixed, deliberately not precision-derived: inside |x| < 1e-15 the
/// integrand is defined to be exactly zero instead of evaluating the 0/0
/// ratio. The quadrature breakpoints keep nodes away from this region.
pub const SINGULARITY_CUTOFF: f64 = 1e-15;

/// Decimal exponent of the absolute underflow floor in the zero sum.
///
/// The floor is 10^{-max(UNDERFLOW_FLOOR_DIGITS, digits)}: at least the
/// historical 1e-50 cutoff, deeper when the precision budget asks for
/// more.
pub const UNDERFLOW_FLOOR_DIGITS: u32 = 50;

/// Digits of slack allowed between the two total formulations:
/// identity tolerance = 10^{-(digits - RESIDUAL_SLACK_DIGITS)}.
pub const RESIDUAL_SLACK_DIGITS: u32 = 5;

// =============================================================================
// VERIFICATION TOLERANCES
// =============================================================================

/// Tolerance of the positivity verdict: total ≥ -POSITIVITY_TOLERANCE.
pub const POSITIVITY_TOLERANCE: f64 = 1e-10;

/// Tolerance when checking supplied zeros against the reference values.
pub const REFERENCE_TOLERANCE: f64 = 1e-10;

/// Imaginary parts of the first five nontrivial zeta zeros (Odlyzko).
///
/// Kept as decimal strings so they can be parsed at any working precision.
pub const REFERENCE_GAMMAS: [&str; 5] = [
    "14.134725142068005",
    "21.022039638771554",
    "25.010857580145688",
    "30.424876125859513",
    "32.935061587739189",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_primes_ascending() {
        for w in SMALL_PRIMES.windows(2) {
            assert!(w[0] < w[1]);
        }
    }

    #[test]
    fn test_window_covers_floor() {
        // e^{-2.3 d} < 10^{-d} requires 2.3 > ln(10)
        assert!(WINDOW_DIGITS_FACTOR > std::f64::consts::LN_10);
    }

    #[test]
    fn test_reference_gammas_parse() {
        for s in REFERENCE_GAMMAS {
            assert!(s.parse::<f64>().unwrap() > 14.0);
        }
    }
}
