use thiserror::Error;

pub type Result<T> = std::result::Result<T, SieveError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SieveError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Resource limit exceeded after {doublings} doublings (bound {bound}, limit {limit})")]
    ResourceExhausted { doublings: u32, bound: u64, limit: u64 },

    #[error("Arithmetic overflow while computing {0}")]
    ArithmeticOverflow(&'static str),
}
