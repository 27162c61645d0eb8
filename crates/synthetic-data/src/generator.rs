//! Synthetic identity generation.
//!
//! The generator owns only a sequence counter. Randomness and the reference
//! date are supplied per call so callers control reproducibility.

use chrono::{Datelike, Days, Months, NaiveDate};
use fake::Fake;
use fake::faker::address::raw::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::internet::raw::SafeEmail;
use fake::faker::name::raw::Name;
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::EN;
use rand::Rng;

use crate::cpf::generate_cpf;
use crate::identity::{AgeRange, SyntheticIdentity};

const MONTHS_PER_YEAR: u32 = 12;

/// Produces [`SyntheticIdentity`] values with ages inside a fixed range.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use synthetic_data::{AgeRange, IdentityGenerator, age_on, is_valid_cpf};
///
/// let mut generator = IdentityGenerator::new(AgeRange::default());
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
///
/// let identity = generator.generate(&mut rng, today);
/// assert_eq!(identity.id, 1);
/// assert!(is_valid_cpf(identity.cpf.as_ref()));
/// assert!((18..=115).contains(&age_on(identity.birth_date, today)));
/// ```
#[derive(Debug, Clone)]
pub struct IdentityGenerator {
    ages: AgeRange,
    next_id: u64,
}

impl IdentityGenerator {
    /// Creates a generator whose sequence starts at 1.
    #[must_use]
    pub const fn new(ages: AgeRange) -> Self {
        Self { ages, next_id: 1 }
    }

    /// Age bounds applied to generated birth dates.
    #[must_use]
    pub const fn ages(&self) -> AgeRange {
        self.ages
    }

    /// Generates the next identity, measuring ages against `today`.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R, today: NaiveDate) -> SyntheticIdentity {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);

        let cpf = generate_cpf(rng);
        let name: String = Name(EN).fake_with_rng(rng);
        let email: String = SafeEmail(EN).fake_with_rng(rng);
        let phone: String = PhoneNumber(EN).fake_with_rng(rng);
        let address = generate_address(rng);
        let birth_date = birth_date_in_range(rng, self.ages, today);

        SyntheticIdentity {
            id,
            cpf,
            name,
            email,
            phone,
            address,
            birth_date,
        }
    }
}

impl Default for IdentityGenerator {
    fn default() -> Self {
        Self::new(AgeRange::default())
    }
}

fn generate_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let building: String = BuildingNumber(EN).fake_with_rng(rng);
    let street: String = StreetName(EN).fake_with_rng(rng);
    let city: String = CityName(EN).fake_with_rng(rng);
    let state: String = StateAbbr(EN).fake_with_rng(rng);
    let zip: String = ZipCode(EN).fake_with_rng(rng);
    single_line(&format!("{building} {street}\n{city}, {state} {zip}"))
}

/// Collapses every run of whitespace, newlines included, into one space.
///
/// ```
/// use synthetic_data::single_line;
///
/// assert_eq!(single_line("1 Main St\nSpringfield,  IL"), "1 Main St Springfield, IL");
/// ```
#[must_use]
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whole years elapsed between `birth` and `today`.
///
/// Returns 0 when `birth` is after `today`.
///
/// ```
/// use chrono::NaiveDate;
/// use synthetic_data::age_on;
///
/// let birth = NaiveDate::from_ymd_opt(2000, 6, 15).expect("valid date");
/// let before = NaiveDate::from_ymd_opt(2024, 6, 14).expect("valid date");
/// let on = NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date");
/// assert_eq!(age_on(birth, before), 23);
/// assert_eq!(age_on(birth, on), 24);
/// ```
#[must_use]
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> u32 {
    if birth > today {
        return 0;
    }
    let years = today.year().saturating_sub(birth.year());
    let had_birthday = (today.month(), today.day()) >= (birth.month(), birth.day());
    let age = if had_birthday {
        years
    } else {
        years.saturating_sub(1)
    };
    u32::try_from(age).unwrap_or_default()
}

/// Draws a birth date uniformly from the dates whose age on `today` lies in
/// `ages`.
fn birth_date_in_range<R: Rng + ?Sized>(rng: &mut R, ages: AgeRange, today: NaiveDate) -> NaiveDate {
    let latest = years_before(today, ages.min());
    // The day after turning `max + 1` is the oldest date still aged `max`.
    let earliest = years_before(today, ages.max().saturating_add(1))
        .checked_add_days(Days::new(1))
        .unwrap_or(NaiveDate::MIN);
    if earliest >= latest {
        return latest;
    }
    let span = u64::try_from(latest.signed_duration_since(earliest).num_days()).unwrap_or_default();
    let offset = rng.random_range(0..=span);
    earliest
        .checked_add_days(Days::new(offset))
        .unwrap_or(latest)
}

fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(years.saturating_mul(MONTHS_PER_YEAR)))
        .unwrap_or(NaiveDate::MIN)
}
