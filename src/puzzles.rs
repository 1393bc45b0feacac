//! Small closed-form and scanning puzzles that sit beside the sieve.

use crate::error::{Result, SieveError};

/// The 1000-digit series the largest-product puzzle is posed over.
pub const DIGIT_SERIES: &str = concat!(
    "73167176531330624919225119674426574742355349194934",
    "96983520312774506326239578318016984801869478851843",
    "85861560789112949495459501737958331952853208805511",
    "12540698747158523863050715693290963295227443043557",
    "66896648950445244523161731856403098711121722383113",
    "62229893423380308135336276614282806444486645238749",
    "30358907296290491560440772390713810515859307960866",
    "70172427121883998797908792274921901699720888093776",
    "65727333001053367881220235421809751254540594752243",
    "52584907711670556013604839586446706324415722155397",
    "53697817977846174064955149290862569321978468622482",
    "83972241375657056057490261407972968652414535100474",
    "82166370484403199890008895243450658541227588666881",
    "16427171479924442928230863465674813919123162824586",
    "17866458359124566529476545682848912883142607690042",
    "24219022671055626321111109370544217506941658960408",
    "07198403850962455444362981230987879927244284909188",
    "84580156166097919133875499200524063689912560717606",
    "05886116467109405077541002256983155200055935729725",
    "71636269561882670428252483600823257530420752963450",
);

// ─── Sum square difference ─────────────────────────────────────────────────

/// `(1 + .. + n)^2 - (1^2 + .. + n^2)`, in closed form.
pub fn sum_square_difference(n: u64) -> Result<u64> {
    const OVERFLOW: SieveError = SieveError::ArithmeticOverflow("sum square difference");

    let n = u128::from(n);
    let sum = n * (n + 1) / 2;
    let square_of_sum = sum.checked_mul(sum).ok_or(OVERFLOW)?;
    let sum_of_squares = (n * (n + 1))
        .checked_mul(2 * n + 1)
        .ok_or(OVERFLOW)?
        / 6;
    u64::try_from(square_of_sum - sum_of_squares).map_err(|_| OVERFLOW)
}

// ─── Largest product in a series ───────────────────────────────────────────

fn parse_digits(series: &str) -> Result<Vec<u64>> {
    series
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| {
            c.to_digit(10).map(u64::from).ok_or_else(|| {
                SieveError::InvalidArgument(format!("non-digit character {c:?} in series"))
            })
        })
        .collect()
}

/// Greatest product of `window` adjacent digits in `series`.
///
/// Zeros split the series into runs; within a run the product slides by
/// dividing out the leaving digit and multiplying in the entering one.
pub fn largest_product_in_series(window: usize, series: &str) -> Result<u64> {
    let digits = parse_digits(series)?;
    if window == 0 {
        return Err(SieveError::InvalidArgument(
            "window must be at least 1".to_string(),
        ));
    }
    if window > digits.len() {
        return Err(SieveError::InvalidArgument(format!(
            "window {} is longer than the {}-digit series",
            window,
            digits.len()
        )));
    }

    let mut best = 0;
    for run in digits.split(|&d| d == 0) {
        if run.len() < window {
            continue;
        }

        let mut product: u64 = 1;
        for &d in &run[..window] {
            product = product
                .checked_mul(d)
                .ok_or(SieveError::ArithmeticOverflow("digit product"))?;
        }
        best = best.max(product);

        for i in window..run.len() {
            // Exact: every digit in the run is non-zero.
            product /= run[i - window];
            product = product
                .checked_mul(run[i])
                .ok_or(SieveError::ArithmeticOverflow("digit product"))?;
            best = best.max(product);
        }
    }
    Ok(best)
}

// ─── Pythagorean triplet ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triplet {
    pub a: u64,
    pub b: u64,
    pub c: u64,
}

impl Triplet {
    pub fn product(&self) -> Result<u64> {
        self.a
            .checked_mul(self.b)
            .and_then(|ab| ab.checked_mul(self.c))
            .ok_or(SieveError::ArithmeticOverflow("triplet product"))
    }
}

/// The triplet `a < b < c` with `a^2 + b^2 = c^2` and `a + b + c = perimeter`,
/// smallest `a` first.
///
/// Substituting `c = p - a - b` gives `b = (p^2 - 2pa) / (2p - 2a)`, so only `a`
/// is scanned.
pub fn pythagorean_triplet(perimeter: u64) -> Option<Triplet> {
    let p = u128::from(perimeter);
    let mut a: u128 = 1;
    // b > a > 0 needs p^2 - 2pa > 0, i.e. 2a < p.
    while 2 * a < p {
        let numerator = p * p - 2 * p * a;
        let denominator = 2 * (p - a);
        if numerator % denominator == 0 {
            let b = numerator / denominator;
            if b > a && a + b < p {
                let c = p - a - b;
                return Some(Triplet {
                    a: a as u64,
                    b: b as u64,
                    c: c as u64,
                });
            }
        }
        a += 1;
    }
    None
}
