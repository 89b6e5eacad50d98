//! Pseudonym and legal-age derivation.

use agora_crypto::{person_hash, Pepper};
use agora_types::{PersonHash, Timestamp};

use crate::error::IdentityError;
use crate::national_id::NationalId;

/// Derive the stable pseudonym for a national identifier.
///
/// Pure and deterministic: the same identifier always yields the same
/// `PersonHash` under a given pepper. Callers persist the result; the
/// identifier itself goes no further than this stack frame.
pub fn derive_person_hash(pepper: &Pepper, raw_id: &str) -> Result<PersonHash, IdentityError> {
    let id = NationalId::parse(raw_id)?;
    Ok(PersonHash::new(person_hash(pepper, id.normalized())))
}

/// Whether the identifier's holder has reached `legal_age` full years
/// as of the given instant.
pub fn derive_is_adult(
    raw_id: &str,
    as_of: Timestamp,
    legal_age: u32,
) -> Result<bool, IdentityError> {
    let id = NationalId::parse(raw_id)?;
    let birth = id.birth_date();
    let (y, m, d) = civil_from_unix(as_of.as_secs());

    let mut age = y.saturating_sub(birth.year);
    if (m, d) < (birth.month, birth.day) {
        age = age.saturating_sub(1);
    }
    Ok(age >= legal_age)
}

/// Convert Unix seconds to a (year, month, day) civil date, proleptic
/// Gregorian (Hinnant's algorithm).
fn civil_from_unix(secs: u64) -> (u32, u32, u32) {
    let z = (secs / 86_400) as i64 + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y as u32, m as u32, d as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pepper() -> Pepper {
        Pepper::new([9u8; 32])
    }

    // Noon UTC on the named days.
    const AUG_28_2026: Timestamp = Timestamp::new(1_787_918_400);
    const NOV_01_2026: Timestamp = Timestamp::new(1_793_534_400);
    const NOV_02_2026: Timestamp = Timestamp::new(1_793_620_800);

    #[test]
    fn hash_is_deterministic_and_format_checked() {
        let a = derive_person_hash(&pepper(), "37605030299").unwrap();
        let b = derive_person_hash(&pepper(), " 37605030299 ").unwrap();
        assert_eq!(a, b);
        assert!(derive_person_hash(&pepper(), "37605030298").is_err());
    }

    #[test]
    fn distinct_ids_distinct_hashes() {
        let a = derive_person_hash(&pepper(), "37605030299").unwrap();
        let b = derive_person_hash(&pepper(), "48403150011").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn civil_conversion_known_dates() {
        assert_eq!(civil_from_unix(0), (1970, 1, 1));
        assert_eq!(civil_from_unix(1_709_208_000), (2024, 2, 29));
        assert_eq!(civil_from_unix(1_709_294_400), (2024, 3, 1));
    }

    #[test]
    fn adult_for_1976_birth() {
        assert!(derive_is_adult("37605030299", AUG_28_2026, 18).unwrap());
    }

    #[test]
    fn underage_until_eighteenth_birthday() {
        // Born 2008-11-02: still 17 on 2026-11-01, 18 on the birthday.
        assert!(!derive_is_adult("50811020422", NOV_01_2026, 18).unwrap());
        assert!(derive_is_adult("50811020422", NOV_02_2026, 18).unwrap());
    }

    #[test]
    fn malformed_id_is_rejected_not_aged() {
        assert!(derive_is_adult("not-a-code", AUG_28_2026, 18).is_err());
    }
}
