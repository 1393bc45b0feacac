//! Adaptive nth-prime search: estimate a bound from the prime-counting
//! approximation, sieve below it, and double the bound until the rank is
//! covered.

use tracing::{debug, trace};

use crate::error::{Result, SieveError};
use crate::sieve::Sieve;

// ─── Configuration ─────────────────────────────────────────────────────────

/// Smallest rank for which `n ln n + n ln ln n` is a valid estimate.
pub const ESTIMATE_MIN_RANK: u64 = 6;

pub const DEFAULT_SMALL_RANK_BOUND: u64 = 15;
pub const DEFAULT_MAX_DOUBLINGS: u32 = 32;
/// 2^34 indices: the finder's sieve holds at most a 2 GiB bit buffer.
pub const DEFAULT_MAX_BOUND: u64 = 1 << 34;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinderConfig {
    /// Retries allowed after the first sieve.
    pub max_doublings: u32,
    /// Largest bound the finder will allocate a sieve for.
    pub max_bound: u64,
    /// Bound used for ranks below [`ESTIMATE_MIN_RANK`].
    pub small_rank_bound: u64,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            max_doublings: DEFAULT_MAX_DOUBLINGS,
            max_bound: DEFAULT_MAX_BOUND,
            small_rank_bound: DEFAULT_SMALL_RANK_BOUND,
        }
    }
}

impl FinderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_doublings(mut self, max_doublings: u32) -> Self {
        self.max_doublings = max_doublings;
        self
    }

    pub fn max_bound(mut self, max_bound: u64) -> Self {
        self.max_bound = max_bound;
        self
    }

    pub fn small_rank_bound(mut self, small_rank_bound: u64) -> Self {
        self.small_rank_bound = small_rank_bound;
        self
    }
}

// ─── Bound estimation ──────────────────────────────────────────────────────

/// Rosser–Schoenfeld: π(x) < 1.25506 x / ln x for every x > 1.
const PI_UPPER_FACTOR: f64 = 1.25506;

/// Initial exclusive bound for the `n`-th prime.
///
/// For `n >= 6`, `p_n < n ln n + n ln ln n`, so the floor plus one is an
/// exclusive bound that already covers rank `n`. Smaller ranks take
/// `fallback`, since `ln ln n` is undefined or negative there. Fails when the
/// estimate does not fit in a `u64`.
pub fn estimate_bound(n: u64, fallback: u64) -> Result<u64> {
    if n < ESTIMATE_MIN_RANK {
        return Ok(fallback);
    }
    let nf = n as f64;
    let ln_n = nf.ln();
    let estimate = nf * ln_n + nf * ln_n.ln();
    trace!(n, estimate, "Estimated nth-prime bound.");
    if estimate >= u64::MAX as f64 {
        return Err(SieveError::ArithmeticOverflow("nth-prime bound"));
    }
    (estimate as u64)
        .checked_add(1)
        .ok_or(SieveError::ArithmeticOverflow("nth-prime bound"))
}

/// Whether a sieve below `bound` could hold `n` primes at all.
fn rank_fits_below(n: u64, bound: u64) -> bool {
    if bound <= 2 {
        return false;
    }
    let bf = bound as f64;
    (n as f64) < PI_UPPER_FACTOR * bf / bf.ln()
}

// ─── Finder ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct NthPrimeFinder {
    config: FinderConfig,
}

impl NthPrimeFinder {
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// The prime of rank `n` (rank 1 is 2).
    ///
    /// Only the bit buffer is held; the prime is read from the sieve's
    /// iterator. The bound never exceeds `max_bound`: an estimate or
    /// doubling past it is clamped, and a sieve at the ceiling that still
    /// misses the rank is `ResourceExhausted`.
    pub fn find(&self, n: u64) -> Result<u64> {
        if n == 0 {
            return Err(SieveError::InvalidArgument(
                "prime rank must be at least 1".to_string(),
            ));
        }
        let estimate = estimate_bound(n, self.config.small_rank_bound)?;
        let rank = usize::try_from(n).map_err(|_| SieveError::ArithmeticOverflow("prime rank"))?;
        let limit = self.config.max_bound;

        if !rank_fits_below(n, limit) && estimate > limit {
            return Err(SieveError::ResourceExhausted {
                doublings: 0,
                bound: estimate,
                limit,
            });
        }

        let mut bound = estimate.min(limit);
        let mut doublings = 0;

        loop {
            let sieve = Sieve::new(bound)?;
            let found = sieve.count();
            if found >= rank {
                if let Some(p) = sieve.primes().nth(rank - 1) {
                    debug!(n, bound, doublings, prime = p, "Found nth prime.");
                    return Ok(p);
                }
            }

            if bound >= limit || doublings >= self.config.max_doublings {
                return Err(SieveError::ResourceExhausted {
                    doublings,
                    bound,
                    limit,
                });
            }
            debug!(n, bound, found, "Bound too small for rank, doubling.");
            bound = bound.saturating_mul(2).min(limit);
            doublings += 1;
        }
    }
}

/// The prime of rank `n` using the default [`FinderConfig`].
pub fn find_nth_prime(n: u64) -> Result<u64> {
    NthPrimeFinder::default().find(n)
}
