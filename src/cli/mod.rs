pub mod bench;
pub mod error;
pub mod logging;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use euler_sieve::nth::{DEFAULT_MAX_BOUND, DEFAULT_MAX_DOUBLINGS};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Prime sieve engine and number puzzles. Prints each answer as a single integer line."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a file in addition to stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every prime below a bound.
    Primes {
        /// Exclusive upper bound.
        #[arg(short, long, value_name = "N")]
        below: u64,
    },
    /// Count the primes below a bound.
    CountPrimes {
        #[arg(short, long, value_name = "N")]
        below: u64,
    },
    /// Sum the primes below a bound.
    SumPrimes {
        #[arg(short, long, value_name = "N", default_value_t = 2_000_000)]
        below: u64,
    },
    /// Find the prime of a given rank (rank 1 is 2).
    NthPrime {
        #[arg(short, long, value_name = "N", default_value_t = 10_001)]
        rank: u64,

        /// Give up after this many bound doublings.
        #[arg(long, value_name = "INT", default_value_t = DEFAULT_MAX_DOUBLINGS)]
        max_doublings: u32,

        /// Refuse to sieve past this bound.
        #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_BOUND)]
        max_bound: u64,
    },
    /// Square of the sum minus the sum of the squares of 1..=N.
    SumSquareDifference {
        #[arg(short, long, value_name = "N", default_value_t = 100)]
        n: u64,
    },
    /// Greatest product of adjacent digits in a series.
    LargestProduct {
        #[arg(short, long, value_name = "INT", default_value_t = 13)]
        window: usize,

        /// Digit series; defaults to the built-in 1000-digit number.
        #[arg(short, long, value_name = "DIGITS")]
        series: Option<String>,
    },
    /// Product a*b*c of the Pythagorean triplet with a + b + c = PERIMETER.
    PythagoreanTriplet {
        #[arg(short, long, value_name = "INT", default_value_t = 1_000)]
        perimeter: u64,
    },
    /// Time the sieve against the `primal` and `primes` crates.
    Bench {
        /// Bounds to benchmark.
        #[arg(
            long,
            value_name = "N",
            value_delimiter = ',',
            default_values_t = [10_000u64, 100_000, 1_000_000, 10_000_000]
        )]
        sizes: Vec<u64>,

        #[arg(long, value_name = "INT", default_value_t = 25)]
        iterations: usize,
    },
}
