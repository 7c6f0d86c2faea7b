//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration detected at construction time, mesh buffer overflow detected
//! while extracting contours, and checked grid lookups outside the sample lattice.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "contour mesh capacity exceeded at threshold {threshold}: \
         {required} points required, capacity is {capacity}"
    )]
    CapacityExceeded {
        threshold: f32,
        required: usize,
        capacity: usize,
    },

    #[error("sample ({col}, {row}) is outside the {cols}x{rows} grid")]
    IndexOutOfRange {
        col: usize,
        row: usize,
        cols: usize,
        rows: usize,
    },

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn from_str_allocates_owned_message() {
        let err: Error = "issue".into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "issue"));
    }

    #[test]
    fn capacity_exceeded_message_names_threshold_and_counts() {
        let err = Error::CapacityExceeded {
            threshold: 0.5,
            required: 12,
            capacity: 8,
        };
        let msg = err.to_string();
        assert!(msg.contains("0.5"));
        assert!(msg.contains("12 points required"));
        assert!(msg.contains("capacity is 8"));
    }
}
