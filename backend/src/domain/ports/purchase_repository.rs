//! Port abstraction for purchase order stores.
use async_trait::async_trait;

use crate::domain::{NewPurchase, Purchase};

use super::define_port_error;

define_port_error! {
    /// Errors raised by purchase store adapters.
    pub enum PurchaseRepositoryError {
        /// The store's shared state could not be accessed.
        Unavailable { message: String } => "purchase store unavailable: {message}",
    }
}

/// Purchase persistence port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    /// Record an order and return it with its assigned id.
    async fn create(&self, order: NewPurchase) -> Result<Purchase, PurchaseRepositoryError>;

    /// All orders in insertion order.
    async fn list(&self) -> Result<Vec<Purchase>, PurchaseRepositoryError>;

    /// Orders placed by `user_id`, possibly none.
    async fn list_by_user(&self, user_id: u64) -> Result<Vec<Purchase>, PurchaseRepositoryError>;

    /// Orders for `product_id`, possibly none.
    async fn list_by_product(
        &self,
        product_id: u64,
    ) -> Result<Vec<Purchase>, PurchaseRepositoryError>;
}
