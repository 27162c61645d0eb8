//! The synthetic identity record and the age bounds used to generate it.

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cpf::Cpf;
use crate::error::AgeRangeError;

/// Default minimum age, in whole years.
pub const DEFAULT_MIN_AGE: u32 = 18;

/// Default maximum age, in whole years.
pub const DEFAULT_MAX_AGE: u32 = 115;

/// Largest maximum age [`AgeRange::new`] accepts.
pub const AGE_LIMIT: u32 = 150;

/// One fake person, shaped like a registration request.
///
/// Field names on the wire follow the registration endpoint, so the record
/// can be posted as-is.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use synthetic_data::{Cpf, SyntheticIdentity};
///
/// let identity = SyntheticIdentity {
///     id: 1,
///     cpf: Cpf::parse("12345678909").expect("valid CPF"),
///     name: "Ada Lovelace".to_owned(),
///     email: "ada@example.org".to_owned(),
///     phone: "555-0100".to_owned(),
///     address: "12 Analytical Row, London".to_owned(),
///     birth_date: NaiveDate::from_ymd_opt(1990, 12, 10).expect("valid date"),
/// };
/// let json = serde_json::to_value(&identity).expect("serialise");
/// assert_eq!(json["nome"], "Ada Lovelace");
/// assert_eq!(json["data_nascimento"], "1990-12-10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticIdentity {
    /// Generator-local sequence number. Receivers assign their own id.
    pub id: u64,
    /// Eleven-digit CPF with valid check digits.
    pub cpf: Cpf,
    /// Full display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number in free-form text.
    #[serde(rename = "telefone")]
    pub phone: String,
    /// Postal address on a single line.
    #[serde(rename = "endereco")]
    pub address: String,
    /// Date of birth, serialised as `YYYY-MM-DD`.
    #[serde(rename = "data_nascimento")]
    pub birth_date: NaiveDate,
}

/// Inclusive bounds on the age of generated identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    min: u32,
    max: u32,
}

impl AgeRange {
    /// Validates and builds an age range.
    ///
    /// # Errors
    ///
    /// Returns [`AgeRangeError::Inverted`] when `min > max` and
    /// [`AgeRangeError::TooOld`] when `max` exceeds [`AGE_LIMIT`].
    pub const fn new(min: u32, max: u32) -> Result<Self, AgeRangeError> {
        if min > max {
            return Err(AgeRangeError::Inverted { min, max });
        }
        if max > AGE_LIMIT {
            return Err(AgeRangeError::TooOld {
                max,
                limit: AGE_LIMIT,
            });
        }
        Ok(Self { min, max })
    }

    /// Lower bound in whole years.
    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Upper bound in whole years.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Returns `true` when `age` lies within the range.
    #[must_use]
    pub fn contains(&self, age: u32) -> bool {
        self.as_range().contains(&age)
    }

    /// The bounds as a standard inclusive range.
    #[must_use]
    pub const fn as_range(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_AGE,
            max: DEFAULT_MAX_AGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn default_matches_documented_bounds() {
        let range = AgeRange::default();
        assert_eq!((range.min(), range.max()), (18, 115));
    }

    #[rstest]
    #[case(18, 18)]
    #[case(0, 150)]
    #[case(30, 40)]
    fn accepts_ordered_bounds(#[case] min: u32, #[case] max: u32) {
        let range = AgeRange::new(min, max).expect("valid range");
        assert!(range.contains(min));
        assert!(range.contains(max));
    }

    #[rstest]
    #[case(41, 40, AgeRangeError::Inverted { min: 41, max: 40 })]
    #[case(18, 151, AgeRangeError::TooOld { max: 151, limit: AGE_LIMIT })]
    fn rejects_unusable_bounds(#[case] min: u32, #[case] max: u32, #[case] expected: AgeRangeError) {
        assert_eq!(AgeRange::new(min, max), Err(expected));
    }

    #[test]
    fn deserialises_wire_names() {
        let json = r#"{
            "id": 7,
            "cpf": "12345678909",
            "nome": "Grace Hopper",
            "email": "grace@example.org",
            "telefone": "555-0199",
            "endereco": "1 Navy Way, Arlington",
            "data_nascimento": "1906-12-09"
        }"#;
        let identity: SyntheticIdentity = serde_json::from_str(json).expect("deserialise");
        assert_eq!(identity.id, 7);
        assert_eq!(identity.name, "Grace Hopper");
        assert_eq!(
            identity.birth_date,
            NaiveDate::from_ymd_opt(1906, 12, 9).expect("valid date")
        );
    }
}
