//! In-memory stores.
//!
//! State lives behind a `std::sync::Mutex` and is lost on restart. A
//! poisoned mutex surfaces as the port's `Unavailable` error rather than a
//! panic.

mod purchase_store;
mod user_store;

pub use purchase_store::InMemoryPurchaseRepository;
pub use user_store::InMemoryUserRepository;
