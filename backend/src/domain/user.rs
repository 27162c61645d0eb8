//! Registered user records.
//!
//! Wire names follow the registration endpoint (`nome`, `telefone`,
//! `endereco`, `data_nascimento`), so the same JSON shape produced by the
//! synthetic identity generator is accepted here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use synthetic_data::{Cpf, CpfError};
use thiserror::Error;
use utoipa::ToSchema;

/// Date layout accepted for `data_nascimento`.
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation failures for user payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// The CPF is malformed or its check digits do not match.
    #[error("cpf is invalid: {0}")]
    InvalidCpf(#[from] CpfError),
    /// The name is empty once trimmed.
    #[error("nome must not be blank")]
    BlankName,
    /// The birth date is not a `YYYY-MM-DD` calendar date.
    #[error("data_nascimento must be a YYYY-MM-DD date, got '{value}'")]
    InvalidBirthDate {
        /// Raw value supplied by the client.
        value: String,
    },
}

impl UserValidationError {
    /// Wire name of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidCpf(_) => "cpf",
            Self::BlankName => "nome",
            Self::InvalidBirthDate { .. } => "data_nascimento",
        }
    }
}

/// Mutable part of a user record. Everything except the id and CPF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    /// Full name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    #[serde(rename = "telefone")]
    pub phone: String,
    /// Postal address.
    #[serde(rename = "endereco")]
    pub address: String,
    /// Date of birth.
    #[serde(rename = "data_nascimento")]
    pub birth_date: NaiveDate,
}

impl UserProfile {
    /// Validate raw request fields into a profile.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::BlankName`] for a blank name and
    /// [`UserValidationError::InvalidBirthDate`] when `birth_date` does not
    /// parse as `YYYY-MM-DD`.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        phone: &str,
        address: &str,
        birth_date: &str,
    ) -> Result<Self, UserValidationError> {
        if name.trim().is_empty() {
            return Err(UserValidationError::BlankName);
        }
        let birth_date = NaiveDate::parse_from_str(birth_date.trim(), BIRTH_DATE_FORMAT).map_err(
            |_| UserValidationError::InvalidBirthDate {
                value: birth_date.to_owned(),
            },
        )?;
        Ok(Self {
            name: name.trim().to_owned(),
            email: email.to_owned(),
            phone: phone.to_owned(),
            address: address.to_owned(),
            birth_date,
        })
    }
}

/// A validated user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// CPF with verified check digits.
    pub cpf: Cpf,
    /// Remaining user fields.
    pub profile: UserProfile,
}

impl NewUser {
    /// Validate a CPF string and pair it with a profile.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::InvalidCpf`] when the CPF fails
    /// verification.
    pub fn try_new(cpf: &str, profile: UserProfile) -> Result<Self, UserValidationError> {
        let cpf = Cpf::parse(cpf.trim())?;
        Ok(Self { cpf, profile })
    }
}

/// A stored user.
///
/// # Examples
/// ```
/// use storefront::domain::{NewUser, User, UserProfile};
///
/// let profile = UserProfile::try_from_parts(
///     "Ada Lovelace",
///     "ada@example.org",
///     "555-0100",
///     "12 Analytical Row",
///     "1815-12-10",
/// )
/// .expect("valid profile");
/// let user = User::from_new(1, NewUser::try_new("12345678909", profile).expect("valid user"));
/// let json = serde_json::to_value(&user).expect("serialise");
/// assert_eq!(json["id"], 1);
/// assert_eq!(json["nome"], "Ada Lovelace");
/// assert_eq!(json["data_nascimento"], "1815-12-10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-assigned identifier.
    pub id: u64,
    /// CPF with verified check digits.
    #[schema(value_type = String, example = "12345678909")]
    pub cpf: Cpf,
    /// Remaining user fields.
    #[serde(flatten)]
    pub profile: UserProfile,
}

impl User {
    /// Attach a store-assigned id to a validated user.
    #[must_use]
    pub fn from_new(id: u64, new_user: NewUser) -> Self {
        Self {
            id,
            cpf: new_user.cpf,
            profile: new_user.profile,
        }
    }
}
