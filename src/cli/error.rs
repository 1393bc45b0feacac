use euler_sieve::SieveError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Sieve(#[from] SieveError),

    #[error("No solution: {0}")]
    NoSolution(String),

    #[error("Benchmark mismatch at n={n}: {detail}")]
    Mismatch { n: u64, detail: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),
}
