//! Port abstraction for the product catalogue store.
use async_trait::async_trait;

use crate::domain::{Product, ProductDetails};

use super::define_port_error;

define_port_error! {
    /// Errors raised by product store adapters.
    pub enum ProductRepositoryError {
        /// The store's shared state could not be accessed.
        Unavailable { message: String } => "product store unavailable: {message}",
        /// A change could not be written to durable storage.
        Storage { message: String } => "product store write failed: {message}",
    }
}

/// Product persistence port.
///
/// A mutation that fails with [`ProductRepositoryError::Storage`] leaves the
/// in-memory catalogue unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a validated product and return it with its assigned id.
    async fn create(&self, details: ProductDetails) -> Result<Product, ProductRepositoryError>;

    /// All products in catalogue order.
    async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Fetch a product by id.
    async fn find_by_id(&self, id: u64) -> Result<Option<Product>, ProductRepositoryError>;

    /// Replace every field except the id. Returns `None` when the id is
    /// unknown.
    async fn update(
        &self,
        id: u64,
        details: ProductDetails,
    ) -> Result<Option<Product>, ProductRepositoryError>;

    /// Remove a product. Returns `false` when the id is unknown.
    async fn delete(&self, id: u64) -> Result<bool, ProductRepositoryError>;
}
