//! Parsing and validation of the 11-digit eID personal code.
//!
//! Format `GYYMMDDSSSC`: century/sex digit, two-digit birth year, month,
//! day, three-digit serial, and a mod-11 checksum over the first ten
//! digits (weights 1234567891, fallback 3456789123, double remainder 10
//! maps to 0).

use crate::error::IdentityError;

const CODE_LEN: usize = 11;
const WEIGHTS_TIER1: [u32; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 1];
const WEIGHTS_TIER2: [u32; 10] = [3, 4, 5, 6, 7, 8, 9, 1, 2, 3];

/// A validated national identifier.
///
/// Constructing one proves the code is well-formed: correct length, all
/// digits, a plausible birth date, and a matching checksum. The type is
/// consumed immediately by the hasher and never stored; it implements
/// neither `Debug` nor `Display`.
pub struct NationalId {
    normalized: String,
    birth: BirthDate,
}

/// Calendar birth date extracted from the identifier.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BirthDate {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

impl NationalId {
    /// Validate a raw identifier string. Surrounding whitespace is the
    /// only tolerated irregularity.
    pub fn parse(raw: &str) -> Result<Self, IdentityError> {
        let trimmed = raw.trim();
        if trimmed.len() != CODE_LEN {
            return Err(IdentityError::InvalidLength);
        }
        let mut digits = [0u32; CODE_LEN];
        for (i, c) in trimmed.chars().enumerate() {
            digits[i] = c.to_digit(10).ok_or(IdentityError::NonDigit)?;
        }

        let birth = decode_birth_date(&digits)?;
        if digits[10] != checksum(&digits[..10]) {
            return Err(IdentityError::ChecksumMismatch);
        }

        Ok(Self {
            normalized: trimmed.to_string(),
            birth,
        })
    }

    /// The normalized digit string, for hashing only.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn birth_date(&self) -> BirthDate {
        self.birth
    }
}

fn decode_birth_date(digits: &[u32; CODE_LEN]) -> Result<BirthDate, IdentityError> {
    let century_base = match digits[0] {
        1 | 2 => 1800,
        3 | 4 => 1900,
        5 | 6 => 2000,
        7 | 8 => 2100,
        _ => return Err(IdentityError::InvalidCentury),
    };
    let year = century_base + digits[1] * 10 + digits[2];
    let month = digits[3] * 10 + digits[4];
    let day = digits[5] * 10 + digits[6];

    if month < 1 || month > 12 || day < 1 || day > days_in_month(year, month) {
        return Err(IdentityError::InvalidBirthDate);
    }
    Ok(BirthDate { year, month, day })
}

fn checksum(first_ten: &[u32]) -> u32 {
    let tier1: u32 = first_ten
        .iter()
        .zip(WEIGHTS_TIER1)
        .map(|(d, w)| d * w)
        .sum::<u32>()
        % 11;
    if tier1 < 10 {
        return tier1;
    }
    let tier2: u32 = first_ten
        .iter()
        .zip(WEIGHTS_TIER2)
        .map(|(d, w)| d * w)
        .sum::<u32>()
        % 11;
    if tier2 < 10 {
        tier2
    } else {
        0
    }
}

fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}
