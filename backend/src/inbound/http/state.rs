//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ProductRepository, PurchaseRepository, UserRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registered users.
    pub users: Arc<dyn UserRepository>,
    /// Product catalogue.
    pub products: Arc<dyn ProductRepository>,
    /// Purchase orders.
    pub purchases: Arc<dyn PurchaseRepository>,
}

impl HttpState {
    /// Bundle the three stores.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        products: Arc<dyn ProductRepository>,
        purchases: Arc<dyn PurchaseRepository>,
    ) -> Self {
        Self {
            users,
            products,
            purchases,
        }
    }
}
