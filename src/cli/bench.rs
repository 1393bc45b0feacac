//! Sieve benchmark harness.
//! Compares the bit-packed sieve against the `primal` and `primes` crates.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::info;

use super::error::{CliError, Result};
use euler_sieve::sieve::{sieve_primes_below, Sieve};
use euler_sieve::SieveError;

// ─── Implementations under test ────────────────────────────────────────────
//
// Every wrapper returns the primes strictly below `n`.

fn own_sieve(n: u64) -> euler_sieve::Result<Vec<u64>> {
    sieve_primes_below(n)
}

fn primal_crate_sieve(n: u64) -> euler_sieve::Result<Vec<u64>> {
    let limit = usize::try_from(n).map_err(|_| SieveError::ArithmeticOverflow("sieve length"))?;
    let sieve = primal::Sieve::new(limit);
    Ok(sieve
        .primes_from(0)
        .take_while(|&p| p < limit)
        .map(|p| p as u64)
        .collect())
}

fn primes_crate_sieve(n: u64) -> euler_sieve::Result<Vec<u64>> {
    use primes::PrimeSet;
    let mut sieve = primes::Sieve::new();
    Ok(sieve.iter().take_while(|&p| p < n).collect())
}

// ─── Benchmarking machinery ────────────────────────────────────────────────

pub struct BenchResult {
    pub name: String,
    pub prime_count: usize,
    pub times: Vec<Duration>,
    pub sieve_bytes: usize,
}

impl BenchResult {
    pub fn median(&self) -> Duration {
        let mut sorted = self.times.clone();
        sorted.sort();
        sorted.get(sorted.len() / 2).copied().unwrap_or_default()
    }

    pub fn min(&self) -> Duration {
        self.times.iter().min().copied().unwrap_or_default()
    }

    pub fn max(&self) -> Duration {
        self.times.iter().max().copied().unwrap_or_default()
    }

    pub fn mean(&self) -> Duration {
        if self.times.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.times.iter().sum();
        total / self.times.len() as u32
    }
}

impl fmt::Display for BenchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<24} │ {:>10} │ {:>10} │ {:>10} │ {:>10} │ {:>10}",
            self.name,
            format_duration(self.min()),
            format_duration(self.median()),
            format_duration(self.mean()),
            format_duration(self.max()),
            format_bytes(self.sieve_bytes),
        )
    }
}

pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos < 1_000 {
        format!("{} ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.1} µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2} ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2} s", nanos as f64 / 1_000_000_000.0)
    }
}

pub fn format_bytes(b: usize) -> String {
    if b < 1024 {
        format!("{} B", b)
    } else if b < 1024 * 1024 {
        format!("{:.1} KB", b as f64 / 1024.0)
    } else {
        format!("{:.1} MB", b as f64 / (1024.0 * 1024.0))
    }
}

pub fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

fn bench<F>(name: &str, n: u64, iterations: usize, sieve_bytes: usize, f: F) -> Result<BenchResult>
where
    F: Fn(u64) -> euler_sieve::Result<Vec<u64>>,
{
    // Warmup
    f(n)?;

    let mut times = Vec::with_capacity(iterations);
    let mut prime_count = 0;

    for _ in 0..iterations {
        let start = Instant::now();
        let result = f(n)?;
        times.push(start.elapsed());
        prime_count = result.len();
        std::hint::black_box(&result);
    }

    Ok(BenchResult {
        name: name.to_string(),
        prime_count,
        times,
        sieve_bytes,
    })
}

fn header() -> String {
    format!(
        "{:<24} │ {:>10} │ {:>10} │ {:>10} │ {:>10} │ {:>10}\n{}",
        "Implementation",
        "Min",
        "Median",
        "Mean",
        "Max",
        "Sieve",
        "─".repeat(97)
    )
}

/// Runs every implementation at each size and renders a report.
/// Fails if the implementations disagree on π(n).
pub fn run(sizes: &[u64], iterations: usize) -> Result<String> {
    if iterations == 0 {
        return Err(CliError::Argument(
            "iterations must be at least 1".to_string(),
        ));
    }

    let mut lines = Vec::new();
    for &n in sizes {
        info!(n, iterations, "Benchmarking sieves.");
        let own_bytes = Sieve::bytes_for(n)?;

        let results = [
            bench("euler-sieve (bit-packed)", n, iterations, own_bytes, own_sieve)?,
            bench("primal (Sieve::new)", n, iterations, 0, primal_crate_sieve)?,
            bench("primes crate (iter)", n, iterations, 0, primes_crate_sieve)?,
        ];

        let reference = &results[0];
        for other in &results[1..] {
            if other.prime_count != reference.prime_count {
                return Err(CliError::Mismatch {
                    n,
                    detail: format!(
                        "{}={} vs {}={}",
                        reference.name, reference.prime_count, other.name, other.prime_count
                    ),
                });
            }
        }

        lines.push(format!(
            "n = {} ({} iterations), π = {}",
            format_with_commas(n),
            iterations,
            format_with_commas(reference.prime_count as u64)
        ));
        lines.push(header());
        lines.extend(results.iter().map(|r| r.to_string()));
        lines.push(String::new());
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implementations_agree() {
        for n in [2, 3, 10, 100, 1_000, 65_537] {
            let own = own_sieve(n).unwrap();
            assert_eq!(own, primal_crate_sieve(n).unwrap(), "primal mismatch at n={}", n);
            assert_eq!(own, primes_crate_sieve(n).unwrap(), "primes mismatch at n={}", n);
        }
    }

    #[test]
    fn formats_numbers() {
        assert_eq!(format_with_commas(0), "0");
        assert_eq!(format_with_commas(1_000), "1,000");
        assert_eq!(format_with_commas(10_000_000), "10,000,000");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_duration(Duration::from_nanos(999)), "999 ns");
        assert_eq!(format_duration(Duration::from_micros(1_500)), "1.50 ms");
    }

    #[test]
    fn statistics() {
        let result = BenchResult {
            name: "fixture".to_string(),
            prime_count: 0,
            times: vec![
                Duration::from_micros(30),
                Duration::from_micros(10),
                Duration::from_micros(20),
            ],
            sieve_bytes: 0,
        };
        assert_eq!(result.min(), Duration::from_micros(10));
        assert_eq!(result.median(), Duration::from_micros(20));
        assert_eq!(result.mean(), Duration::from_micros(20));
        assert_eq!(result.max(), Duration::from_micros(30));
    }

    #[test]
    fn report_lists_every_implementation() {
        let report = run(&[1_000], 2).unwrap();
        assert!(report.contains("π = 168"));
        assert!(report.contains("euler-sieve (bit-packed)"));
        assert!(report.contains("primal (Sieve::new)"));
        assert!(report.contains("primes crate (iter)"));
    }

    #[test]
    fn zero_iterations_rejected() {
        assert!(matches!(run(&[100], 0), Err(CliError::Argument(_))));
    }

    #[test]
    fn failing_implementation_propagates() {
        let failing = |_: u64| -> euler_sieve::Result<Vec<u64>> {
            Err(SieveError::ArithmeticOverflow("sieve length"))
        };
        assert!(matches!(
            bench("failing", 10, 1, 0, failing),
            Err(CliError::Sieve(SieveError::ArithmeticOverflow(_)))
        ));
    }

    #[test]
    fn reported_bytes_match_built_sieve() {
        for n in [0, 1, 64, 65, 1_000, 1_000_000] {
            assert_eq!(
                Sieve::bytes_for(n).unwrap(),
                Sieve::new(n).unwrap().memory_bytes(),
                "n={}",
                n
            );
        }
    }
}
