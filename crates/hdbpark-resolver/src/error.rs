use thiserror::Error;

/// Violations of the reference table invariants, raised while indexing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("reference row {row} has an empty carpark number")]
    EmptyIdentifier { row: usize },

    #[error("duplicate carpark number in reference data: {0}")]
    DuplicateIdentifier(String),
}

/// A query is missing a mandatory field.
///
/// "Nothing matched" is never an error; see [`crate::Miss`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("town or road name cannot be empty")]
    EmptyTown,

    #[error("address cannot be empty")]
    EmptyAddress,

    #[error("carpark number cannot be empty")]
    EmptyIdentifier,
}
