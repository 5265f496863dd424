//! Errors reported by the arithmetic engine.

use thiserror::Error;

/// Errors that may occur in integer and modular arithmetic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Division or remainder with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,
    /// A reducer or modular operation was asked to work with a zero or negative modulus.
    #[error("the modulus must be positive")]
    NonPositiveModulus,
    /// Montgomery reduction needs the modulus to be invertible modulo the word base.
    #[error("Montgomery reduction requires an odd modulus")]
    EvenModulus,
    /// The value shares a factor with the modulus.
    #[error("the value has no inverse modulo the given modulus")]
    NoInverse,
    /// Square root of a negative value.
    #[error("cannot take the square root of a negative value")]
    NegativeRoot,
    /// Modular power with a negative exponent.
    #[error("the exponent must be non-negative")]
    NegativeExponent,
    /// The value does not fit into the requested native type.
    #[error("the value does not fit in {0}")]
    Overflow(&'static str),
    /// Two residues bound to different reducers were combined.
    #[error("the residues are bound to different reducers")]
    ReducerMismatch,
    /// A string could not be parsed as an integer.
    #[error("invalid integer literal: {0:?}")]
    Parse(String),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
