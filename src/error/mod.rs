//! Error handling for the P-256 engine

use core::fmt;

/// The error type for key generation and key agreement operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: &'static str,
        /// Reason why the parameter is invalid
        reason: &'static str,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// A supplied point is not a valid curve point
    InvalidPoint {
        /// Context where the point was rejected
        context: &'static str,
        /// Reason why the point is invalid
        reason: &'static str,
    },

    /// Scalar multiplication produced the point at infinity
    IdentityResult {
        /// Operation that produced the degenerate result
        context: &'static str,
    },

    /// Entropy source failure or insufficient entropy
    Entropy {
        /// Context where entropy was required
        context: &'static str,
        /// Reason for the failure
        reason: &'static str,
    },

    /// The generator reached its reseed interval without being reseeded
    Exhausted {
        /// Generator that ran out of budget
        context: &'static str,
    },

    /// Attempted division by zero in field arithmetic
    ///
    /// Unreachable on valid curve data; observing it indicates corrupted
    /// internal state rather than bad caller input.
    DivisionByZero {
        /// Operation that attempted the inversion
        context: &'static str,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param(name: &'static str, reason: &'static str) -> Self {
        Error::Parameter { name, reason }
    }
}

/// Result type for all operations in this crate
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::InvalidPoint { context, reason } => {
                write!(f, "Invalid point in {}: {}", context, reason)
            }
            Error::IdentityResult { context } => {
                write!(
                    f,
                    "{} produced the point at infinity",
                    context
                )
            }
            Error::Entropy { context, reason } => {
                write!(f, "Entropy failure in {}: {}", context, reason)
            }
            Error::Exhausted { context } => {
                write!(f, "{} reached its reseed interval", context)
            }
            Error::DivisionByZero { context } => {
                write!(f, "Division by zero in {}", context)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

// Include the validation submodule
pub mod validate;

#[cfg(test)]
mod tests;
