//! Identity hasher — from a verified national identifier to an
//! irreversible pseudonym and a legal-age flag.
//!
//! Everything here is pure and side-effect-free: no I/O, no storage, and
//! no path by which the raw identifier can leak into logs or errors. The
//! rest of the workspace only ever sees the derived `PersonHash`.

pub mod error;
pub mod hasher;
pub mod national_id;

pub use error::IdentityError;
pub use hasher::{derive_is_adult, derive_person_hash};
pub use national_id::NationalId;
