use thiserror::Error;

/// Errors from identifier validation and derivation.
///
/// Variants deliberately carry no fragment of the offending identifier:
/// a rejected input must not be reconstructable from the error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identifier has invalid length")]
    InvalidLength,

    #[error("identifier contains non-digit characters")]
    NonDigit,

    #[error("identifier century digit is out of range")]
    InvalidCentury,

    #[error("identifier encodes an impossible birth date")]
    InvalidBirthDate,

    #[error("identifier checksum mismatch")]
    ChecksumMismatch,
}
