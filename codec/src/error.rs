//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("truncated input")]
    TruncatedInput,
    #[error("invalid length: {0} > {1}")]
    InvalidLength(usize, usize), // declared, remaining
    #[error("unsupported variant in {0}: {1}")]
    UnsupportedVariant(&'static str, u32), // context, discriminant
    #[error("malformed {0}: {1}")]
    MalformedStructure(&'static str, &'static str), // structure, message
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("{0} out of range: {1}")]
    OutOfRange(&'static str, u64), // field, value
}
