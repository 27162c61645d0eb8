//! Error types for the synthetic-data crate.
//!
//! Both enums are plain `thiserror` values so callers can match on the
//! variant or render the message directly.

use thiserror::Error;

/// Reasons a string is not a well-formed CPF.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CpfError {
    /// The input does not have exactly eleven characters.
    #[error("CPF must have 11 digits, found {actual}")]
    WrongLength {
        /// Number of characters in the input.
        actual: usize,
    },

    /// A character other than an ASCII digit was found.
    #[error("CPF contains a non-digit character at position {position}")]
    NonDigit {
        /// Zero-based character index of the offending character.
        position: usize,
    },

    /// The trailing check digits do not match the nine-digit body.
    #[error("CPF check digits do not match")]
    ChecksumMismatch,
}

/// Reasons an age range cannot drive birth-date generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgeRangeError {
    /// The lower bound exceeds the upper bound.
    #[error("minimum age {min} exceeds maximum age {max}")]
    Inverted {
        /// Requested minimum age in whole years.
        min: u32,
        /// Requested maximum age in whole years.
        max: u32,
    },

    /// The upper bound is beyond what a calendar date can represent usefully.
    #[error("maximum age {max} exceeds the supported limit of {limit}")]
    TooOld {
        /// Requested maximum age in whole years.
        max: u32,
        /// Largest accepted maximum age.
        limit: u32,
    },
}
