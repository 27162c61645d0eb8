//! Synthetic identity data for exercising registration endpoints.
//!
//! The crate produces believable fake people whose CPF numbers carry valid
//! check digits. It performs no I/O: every random draw comes from a
//! caller-supplied [`rand::Rng`], and ages are measured against a
//! caller-supplied date, so output is reproducible under a seeded RNG.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use synthetic_data::{IdentityGenerator, is_valid_cpf};
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let mut generator = IdentityGenerator::default();
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
//!
//! let people: Vec<_> = (0..3).map(|_| generator.generate(&mut rng, today)).collect();
//! assert!(people.iter().all(|p| is_valid_cpf(p.cpf.as_ref())));
//! ```

mod cpf;
mod error;
mod generator;
mod identity;

pub use cpf::{CPF_BODY_LEN, CPF_LEN, Cpf, check_digits, generate_cpf, is_valid_cpf};
pub use error::{AgeRangeError, CpfError};
pub use generator::{IdentityGenerator, age_on, single_line};
pub use identity::{AGE_LIMIT, AgeRange, DEFAULT_MAX_AGE, DEFAULT_MIN_AGE, SyntheticIdentity};
