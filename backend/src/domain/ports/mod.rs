//! Domain ports for the hexagonal boundary.
//!
//! Inbound adapters and the registration simulator depend on these traits;
//! `outbound` provides the implementations.

mod macros;
pub(crate) use macros::define_port_error;

mod product_repository;
mod purchase_repository;
mod user_registration;
mod user_repository;

#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{ProductRepository, ProductRepositoryError};
#[cfg(test)]
pub use purchase_repository::MockPurchaseRepository;
pub use purchase_repository::{PurchaseRepository, PurchaseRepositoryError};
#[cfg(test)]
pub use user_registration::MockUserRegistrationClient;
pub use user_registration::{RegistrationError, RegistrationReceipt, UserRegistrationClient};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
