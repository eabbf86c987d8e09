//! Errors in the library.
use thiserror::Error;

/// Errors raised by Border crates.
#[derive(Debug, Error)]
pub enum BorderError {
    /// A key was not found in a [`Record`](crate::record::Record).
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// A value in a [`Record`](crate::record::Record) has an unexpected type.
    #[error("Record value type error: expected {0}")]
    RecordValueTypeError(String),

    /// A simulator frame cannot be preprocessed.
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// The input layer of a policy does not match the observation size.
    #[error("Policy expects {expected} inputs, but observations have {actual} elements")]
    PolicyInputMismatch {
        /// The number of inputs of the policy.
        expected: usize,
        /// The number of elements of an observation.
        actual: usize,
    },

    /// The evaluator has released its environment and cannot run again.
    #[error("The evaluator has been closed")]
    EvaluatorClosed,
}
