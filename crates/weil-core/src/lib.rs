//! # Weil Core
//!
//! Foundation crate for the Weil explicit-formula evaluator: the
//! immutable precision context, the named numerical heuristics, and
//! prime generation.
//!
//! ## Precision discipline
//!
//! All arithmetic in the workspace runs on `rug::Float` at the binary
//! precision derived from a [`PrecisionContext`]. There is no ambient
//! precision state: every evaluator takes the context as an explicit
//! parameter, and every truncation threshold (ε, integration window,
//! underflow floor) is derived from it at the point of use.

pub mod constants;
pub mod errors;
pub mod precision;
pub mod primes;

pub use constants::*;
pub use errors::{CoreError, CoreResult};
pub use precision::PrecisionContext;
pub use primes::{first_primes, first_primes_with_bound, sieve_bound, sieve_upto};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::constants::*;
    pub use crate::errors::{CoreError, CoreResult};
    pub use crate::precision::PrecisionContext;
    pub use crate::primes::{first_primes, first_primes_with_bound, sieve_bound, sieve_upto};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_and_primes_compose() {
        let ctx = PrecisionContext::new(50).unwrap();
        let primes = first_primes(5).unwrap();
        let two = ctx.float(primes[0]);
        let log_two = two.ln();
        assert!(log_two > 0.693f64 && log_two < 0.6932f64);
    }
}
