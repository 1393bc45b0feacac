//! Bit-packed Sieve of Eratosthenes over every integer below a bound.
//!
//! - 1 bit per index, packed into `u64` words
//! - Marking starts at `p * p`; smaller multiples were struck by smaller primes
//! - Extraction iterates set bits only (clear-lowest-set-bit loop)
//! - Integer square root, no f64 precision ceiling

use tracing::debug;

use crate::error::{Result, SieveError};

// ─── Utilities ─────────────────────────────────────────────────────────────

/// Integer square root, safe for all u64 values.
/// Seeded from f64, then corrected with checked arithmetic.
#[inline]
pub fn isqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as u64;
    while x > 0 && x.checked_mul(x).map_or(true, |sq| sq > n) {
        x -= 1;
    }
    while (x + 1).checked_mul(x + 1).map_or(false, |sq| sq <= n) {
        x += 1;
    }
    x
}

/// Upper bound on π(n) for pre-allocation. Overestimates by ~15%.
#[inline]
pub fn prime_count_upper(n: u64) -> usize {
    if n < 10 {
        return 4;
    }
    let nf = n as f64;
    (nf / nf.ln() * 1.15) as usize + 1
}

fn sieve_len(bound: u64) -> Result<usize> {
    usize::try_from(bound).map_err(|_| SieveError::ArithmeticOverflow("sieve length"))
}

#[inline]
fn bit_is_set(words: &[u64], i: usize) -> bool {
    (words[i >> 6] >> (i & 63)) & 1 == 1
}

#[inline]
fn clear_bit(words: &mut [u64], i: usize) {
    words[i >> 6] &= !(1u64 << (i & 63));
}

fn strike_multiples(words: &mut [u64], p: usize, len: usize) {
    for j in (p * p..len).step_by(p) {
        clear_bit(words, j);
    }
}

/// All bits set below `len`, trailing bits of the last word cleared,
/// indices 0 and 1 cleared.
fn fresh_words(len: usize) -> Vec<u64> {
    let mut words = vec![!0u64; len.div_ceil(64)];
    if len % 64 != 0 {
        if let Some(last) = words.last_mut() {
            *last &= (1u64 << (len % 64)) - 1;
        }
    }
    for i in 0..len.min(2) {
        clear_bit(&mut words, i);
    }
    words
}

// ─── Sieve ─────────────────────────────────────────────────────────────────

/// A completed sieve: bit `i` is set if and only if `i` is prime, for every
/// `i < bound`.
#[derive(Debug, Clone)]
pub struct Sieve {
    words: Vec<u64>,
    bound: u64,
}

impl Sieve {
    pub fn new(bound: u64) -> Result<Self> {
        let len = sieve_len(bound)?;
        let mut words = fresh_words(len);

        // p <= isqrt(bound) < bound, and p * p <= bound cannot overflow.
        let sqrt_n = isqrt(bound) as usize;
        for p in 2..=sqrt_n {
            if bit_is_set(&words, p) {
                strike_multiples(&mut words, p, len);
            }
        }

        Ok(Self { words, bound })
    }

    /// Exclusive upper bound this sieve covers.
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Primality of `i`. Indices at or past the bound report `false`.
    pub fn is_prime(&self, i: u64) -> bool {
        i < self.bound && bit_is_set(&self.words, i as usize)
    }

    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Bytes held by the bit buffer.
    pub fn memory_bytes(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>()
    }

    /// Bytes a sieve below `bound` would hold, without building it.
    pub fn bytes_for(bound: u64) -> Result<usize> {
        Ok(sieve_len(bound)?.div_ceil(64) * std::mem::size_of::<u64>())
    }

    /// Primes in ascending order.
    pub fn primes(&self) -> Primes<'_> {
        Primes {
            words: &self.words,
            word_idx: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }
}

/// Ascending iterator over the set bits of a [`Sieve`].
pub struct Primes<'a> {
    words: &'a [u64],
    word_idx: usize,
    current: u64,
}

impl Iterator for Primes<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        while self.current == 0 {
            self.word_idx += 1;
            self.current = *self.words.get(self.word_idx)?;
        }
        let tz = self.current.trailing_zeros() as usize;
        self.current &= self.current - 1;
        Some(((self.word_idx << 6) + tz) as u64)
    }
}

// ─── Entry points ──────────────────────────────────────────────────────────

/// Every prime strictly below `bound`, ascending.
pub fn sieve_primes_below(bound: u64) -> Result<Vec<u64>> {
    if bound <= 2 {
        return Ok(Vec::new());
    }
    let sieve = Sieve::new(bound)?;
    let mut primes = Vec::with_capacity(prime_count_upper(bound));
    primes.extend(sieve.primes());
    debug!(bound, count = primes.len(), "Sieved primes below bound.");
    Ok(primes)
}

/// π(bound - 1): the number of primes strictly below `bound`.
pub fn count_primes_below(bound: u64) -> Result<usize> {
    if bound <= 2 {
        return Ok(0);
    }
    Ok(Sieve::new(bound)?.count())
}

/// Sum of every prime strictly below `bound`.
///
/// Single forward scan: each surviving index is added to the total as it is
/// reached, and strikes its own multiples if it is at most √bound. No prime
/// list is materialised.
pub fn sum_primes_below(bound: u64) -> Result<u64> {
    if bound <= 2 {
        return Ok(0);
    }
    let len = sieve_len(bound)?;
    let mut words = fresh_words(len);
    let sqrt_n = isqrt(bound) as usize;
    let mut sum: u64 = 0;

    for wi in 0..words.len() {
        let mut w = words[wi];
        while w != 0 {
            let tz = w.trailing_zeros() as usize;
            let p = (wi << 6) + tz;
            sum = sum
                .checked_add(p as u64)
                .ok_or(SieveError::ArithmeticOverflow("prime sum"))?;
            if p <= sqrt_n {
                strike_multiples(&mut words, p, len);
                // Striking may clear later bits of this same word.
                w &= words[wi];
            }
            w &= w - 1;
        }
    }

    debug!(bound, sum, "Summed primes below bound.");
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_primes() {
        assert_eq!(sieve_primes_below(10).unwrap(), vec![2, 3, 5, 7]);
        assert_eq!(
            sieve_primes_below(20).unwrap(),
            vec![2, 3, 5, 7, 11, 13, 17, 19]
        );
    }

    #[test]
    fn test_known_counts() {
        assert_eq!(sieve_primes_below(100).unwrap().len(), 25);
        assert_eq!(sieve_primes_below(1_000).unwrap().len(), 168);
        assert_eq!(sieve_primes_below(10_000).unwrap().len(), 1_229);
        assert_eq!(sieve_primes_below(500_000).unwrap().len(), 41_538);
    }

    #[test]
    fn test_edge_cases() {
        assert_eq!(sieve_primes_below(0).unwrap(), Vec::<u64>::new());
        assert_eq!(sieve_primes_below(1).unwrap(), Vec::<u64>::new());
        assert_eq!(sieve_primes_below(2).unwrap(), Vec::<u64>::new());
        assert_eq!(sieve_primes_below(3).unwrap(), vec![2]);
        assert_eq!(sieve_primes_below(4).unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_bound_is_exclusive() {
        let p = sieve_primes_below(29).unwrap();
        assert_eq!(*p.last().unwrap(), 23);

        let p = sieve_primes_below(30).unwrap();
        assert_eq!(*p.last().unwrap(), 29);

        let p = sieve_primes_below(500_000).unwrap();
        assert_eq!(*p.last().unwrap(), 499_979);
    }

    #[test]
    fn test_word_boundaries() {
        // 61 and 67 straddle the first word; 127 and 131 the second.
        let p = sieve_primes_below(64).unwrap();
        assert_eq!(*p.last().unwrap(), 61);
        let p = sieve_primes_below(65).unwrap();
        assert_eq!(*p.last().unwrap(), 61);
        let p = sieve_primes_below(128).unwrap();
        assert_eq!(*p.last().unwrap(), 127);
        assert_eq!(count_primes_below(128).unwrap(), 31);
    }

    #[test]
    fn test_isqrt_safety() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(4), 2);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(u64::MAX), 4_294_967_295);
        assert_eq!(isqrt(1 << 52), 1 << 26);
    }

    #[test]
    fn test_sieve_membership() {
        let sieve = Sieve::new(50).unwrap();
        assert_eq!(sieve.bound(), 50);
        assert!(!sieve.is_prime(0));
        assert!(!sieve.is_prime(1));
        assert!(sieve.is_prime(2));
        assert!(sieve.is_prime(47));
        assert!(!sieve.is_prime(49));
        assert!(!sieve.is_prime(53));
        assert_eq!(sieve.count(), 15);
        assert_eq!(sieve.memory_bytes(), 8);
    }

    #[test]
    fn test_count_matches_list() {
        for n in [0, 1, 2, 3, 10, 64, 100, 1_000, 65_536] {
            assert_eq!(
                count_primes_below(n).unwrap(),
                sieve_primes_below(n).unwrap().len(),
                "Mismatch at n={}",
                n
            );
        }
    }

    #[test]
    fn test_sum_small() {
        assert_eq!(sum_primes_below(0).unwrap(), 0);
        assert_eq!(sum_primes_below(2).unwrap(), 0);
        assert_eq!(sum_primes_below(3).unwrap(), 2);
        assert_eq!(sum_primes_below(10).unwrap(), 17);
        assert_eq!(sum_primes_below(100).unwrap(), 1_060);
    }

    #[test]
    fn test_sum_matches_list() {
        for n in [5, 64, 129, 1_000, 100_000] {
            let listed: u64 = sieve_primes_below(n).unwrap().iter().sum();
            assert_eq!(sum_primes_below(n).unwrap(), listed, "Mismatch at n={}", n);
        }
    }
}
