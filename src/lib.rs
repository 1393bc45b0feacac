//! Sieve of Eratosthenes engine and the number puzzles built on top of it.
//!
//! - [`sieve`]: bit-packed sieve, listing, counting and summing primes below a bound
//! - [`nth`]: the nth prime via an estimated bound that doubles until it covers the rank
//! - [`puzzles`]: sum-square difference, largest product in a series, Pythagorean triplet

pub mod error;
pub mod nth;
pub mod puzzles;
pub mod sieve;

pub use error::{Result, SieveError};
pub use nth::{estimate_bound, find_nth_prime, FinderConfig, NthPrimeFinder};
pub use puzzles::{
    largest_product_in_series, pythagorean_triplet, sum_square_difference, Triplet, DIGIT_SERIES,
};
pub use sieve::{count_primes_below, isqrt, sieve_primes_below, sum_primes_below, Sieve};
