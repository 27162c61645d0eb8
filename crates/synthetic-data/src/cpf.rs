//! CPF check-digit generation and verification.
//!
//! A CPF is eleven decimal digits: a nine-digit body followed by two check
//! digits derived from it with weighted sums reduced modulo 11.
//!
//! # Check-digit rule
//!
//! - First digit: `S1 = Σ (10 - i) * d[i]` over the body, then
//!   `(S1 * 10) mod 11`, with 10 mapped to 0.
//! - Second digit: `S2 = Σ (11 - i) * d[i] + 2 * first`, then
//!   `(S2 * 10) mod 11`, with 10 mapped to 0.
//!
//! Only the arithmetic is guaranteed. A generated number is self-consistent
//! but is not checked against any real registry.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CpfError;

/// Number of digits in the random body of a CPF.
pub const CPF_BODY_LEN: usize = 9;

/// Total number of digits in a CPF, body plus check digits.
pub const CPF_LEN: usize = 11;

const FIRST_DIGIT_TOP_WEIGHT: u32 = 10;
const SECOND_DIGIT_TOP_WEIGHT: u32 = 11;
const MODULUS: u32 = 11;

/// Computes the two check digits for a nine-digit CPF body.
///
/// Every element of `body` must be in `0..=9`.
///
/// # Examples
///
/// ```
/// use synthetic_data::check_digits;
///
/// assert_eq!(check_digits([1, 2, 3, 4, 5, 6, 7, 8, 9]), [0, 9]);
/// ```
#[must_use]
pub fn check_digits(body: [u8; CPF_BODY_LEN]) -> [u8; 2] {
    debug_assert!(body.iter().all(|digit| *digit <= 9), "CPF body digits must be 0-9");

    let first = reduce(weighted_sum(&body, FIRST_DIGIT_TOP_WEIGHT));
    let second = reduce(
        weighted_sum(&body, SECOND_DIGIT_TOP_WEIGHT).saturating_add(2 * u32::from(first)),
    );
    [first, second]
}

/// Weights run from `top_weight` downwards, one per body digit.
fn weighted_sum(body: &[u8; CPF_BODY_LEN], top_weight: u32) -> u32 {
    body.iter()
        .zip((2..=top_weight).rev())
        .map(|(digit, weight)| u32::from(*digit) * weight)
        .sum()
}

fn reduce(sum: u32) -> u8 {
    let remainder = sum.saturating_mul(10).rem_euclid(MODULUS);
    if remainder >= 10 {
        0
    } else {
        u8::try_from(remainder).unwrap_or_default()
    }
}

/// A CPF whose check digits agree with its body.
///
/// Serialises as a plain 11-digit string. Deserialisation re-validates the
/// check digits.
///
/// # Examples
///
/// ```
/// use synthetic_data::Cpf;
///
/// let cpf = Cpf::parse("12345678909").expect("valid CPF");
/// assert_eq!(cpf.as_ref(), "12345678909");
/// assert!(Cpf::parse("12345678999").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
    /// Builds a CPF from a nine-digit body, appending its check digits.
    #[must_use]
    pub fn from_body(body: [u8; CPF_BODY_LEN]) -> Self {
        let [first, second] = check_digits(body);
        let digits: String = body
            .iter()
            .chain([first, second].iter())
            .map(|digit| char::from(b'0'.saturating_add(*digit)))
            .collect();
        Self(digits)
    }

    /// Parses and verifies an unformatted 11-digit CPF.
    ///
    /// Punctuation such as `123.456.789-09` is rejected, not stripped.
    ///
    /// # Errors
    ///
    /// Returns [`CpfError`] when the input has the wrong length, contains a
    /// non-digit, or carries check digits that do not match its body.
    pub fn parse(raw: &str) -> Result<Self, CpfError> {
        let length = raw.chars().count();
        if length != CPF_LEN {
            return Err(CpfError::WrongLength { actual: length });
        }
        if let Some(position) = raw.chars().position(|c| !c.is_ascii_digit()) {
            return Err(CpfError::NonDigit { position });
        }

        let digits: Vec<u8> = raw.bytes().map(|b| b.saturating_sub(b'0')).collect();
        let (body_digits, check) = digits.split_at(CPF_BODY_LEN);
        let mut body = [0_u8; CPF_BODY_LEN];
        body.copy_from_slice(body_digits);

        let expected = check_digits(body);
        if check != expected.as_slice() {
            return Err(CpfError::ChecksumMismatch);
        }
        Ok(Self(raw.to_owned()))
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Cpf> for String {
    fn from(value: Cpf) -> Self {
        value.0
    }
}

impl TryFrom<String> for Cpf {
    type Error = CpfError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Returns `true` when `raw` is an 11-digit CPF with matching check digits.
///
/// # Examples
///
/// ```
/// use synthetic_data::is_valid_cpf;
///
/// assert!(is_valid_cpf("12345678909"));
/// assert!(!is_valid_cpf("12345678900"));
/// assert!(!is_valid_cpf("123.456.789-09"));
/// ```
#[must_use]
pub fn is_valid_cpf(raw: &str) -> bool {
    Cpf::parse(raw).is_ok()
}

/// Draws nine uniform digits from `rng` and completes them into a CPF.
pub fn generate_cpf<R: Rng + ?Sized>(rng: &mut R) -> Cpf {
    let body: [u8; CPF_BODY_LEN] = std::array::from_fn(|_| rng.random_range(0..=9));
    Cpf::from_body(body)
}

#[cfg(test)]
mod tests {
    //! Covers the check-digit rule, parsing, and random generation.

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    use super::*;

    #[test]
    fn known_body_produces_documented_check_digits() {
        // S1 = 210 -> 2100 mod 11 = 10 -> 0; S2 = 255 -> 2550 mod 11 = 9.
        assert_eq!(check_digits([1, 2, 3, 4, 5, 6, 7, 8, 9]), [0, 9]);
        assert_eq!(
            Cpf::from_body([1, 2, 3, 4, 5, 6, 7, 8, 9]).as_ref(),
            "12345678909"
        );
    }

    #[rstest]
    #[case([0, 0, 0, 0, 0, 0, 0, 0, 0], [0, 0])]
    #[case([1, 1, 1, 4, 4, 4, 7, 7, 7], [3, 5])]
    #[case([5, 2, 9, 9, 8, 2, 2, 4, 7], [2, 5])]
    fn check_digits_match_published_examples(
        #[case] body: [u8; CPF_BODY_LEN],
        #[case] expected: [u8; 2],
    ) {
        assert_eq!(check_digits(body), expected);
    }

    #[test]
    fn remainder_of_ten_maps_to_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut saw_zero_from_ten = false;
        for _ in 0..5_000 {
            let body: [u8; CPF_BODY_LEN] = std::array::from_fn(|_| rng.random_range(0..=9));
            let raw = weighted_sum(&body, FIRST_DIGIT_TOP_WEIGHT)
                .saturating_mul(10)
                .rem_euclid(MODULUS);
            if raw == 10 {
                assert_eq!(check_digits(body)[0], 0);
                saw_zero_from_ten = true;
            }
        }
        assert!(saw_zero_from_ten, "expected at least one body with remainder 10");
    }

    #[test]
    fn check_digits_are_always_single_digits() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10_000 {
            let body: [u8; CPF_BODY_LEN] = std::array::from_fn(|_| rng.random_range(0..=9));
            let [first, second] = check_digits(body);
            assert!(first <= 9 && second <= 9, "body {body:?} gave {first}{second}");
        }
    }

    #[test]
    fn check_digits_are_deterministic() {
        let body = [9, 8, 7, 6, 5, 4, 3, 2, 1];
        assert_eq!(check_digits(body), check_digits(body));
    }

    #[test]
    fn generated_cpfs_verify() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..1_000 {
            let cpf = generate_cpf(&mut rng);
            assert_eq!(cpf.as_ref().len(), CPF_LEN);
            assert!(is_valid_cpf(cpf.as_ref()), "{cpf} should verify");
        }
    }

    #[rstest]
    #[case("1234567899", CpfError::WrongLength { actual: 10 })]
    #[case("123456789091", CpfError::WrongLength { actual: 12 })]
    #[case("1234567890a", CpfError::NonDigit { position: 10 })]
    #[case("12345678900", CpfError::ChecksumMismatch)]
    fn parse_rejects_malformed_input(#[case] raw: &str, #[case] expected: CpfError) {
        assert_eq!(Cpf::parse(raw), Err(expected));
    }

    #[test]
    fn serde_round_trips_as_plain_string() {
        let cpf = Cpf::parse("12345678909").expect("valid CPF");
        let json = serde_json::to_string(&cpf).expect("serialise");
        assert_eq!(json, "\"12345678909\"");
        let back: Cpf = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, cpf);
    }

    #[test]
    fn deserialise_rejects_bad_check_digits() {
        let result = serde_json::from_str::<Cpf>("\"12345678999\"");
        assert!(result.is_err());
    }
}
