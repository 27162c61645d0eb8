//! Mutex-guarded purchase order store.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{PurchaseRepository, PurchaseRepositoryError};
use crate::domain::{NewPurchase, Purchase};

#[derive(Debug, Default)]
struct PurchaseStoreState {
    orders: Vec<Purchase>,
    last_id: u64,
}

/// Purchase store keeping orders in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryPurchaseRepository {
    state: Mutex<PurchaseStoreState>,
}

impl InMemoryPurchaseRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, PurchaseStoreState>, PurchaseRepositoryError> {
        self.state
            .lock()
            .map_err(|err| PurchaseRepositoryError::unavailable(err.to_string()))
    }

    fn filtered(
        &self,
        keep: impl Fn(&Purchase) -> bool,
    ) -> Result<Vec<Purchase>, PurchaseRepositoryError> {
        Ok(self
            .lock()?
            .orders
            .iter()
            .filter(|order| keep(order))
            .copied()
            .collect())
    }
}

#[async_trait]
impl PurchaseRepository for InMemoryPurchaseRepository {
    async fn create(&self, order: NewPurchase) -> Result<Purchase, PurchaseRepositoryError> {
        let mut state = self.lock()?;
        state.last_id = state.last_id.saturating_add(1);
        let stored = Purchase::from_new(state.last_id, order);
        state.orders.push(stored);
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Purchase>, PurchaseRepositoryError> {
        self.filtered(|_| true)
    }

    async fn list_by_user(&self, user_id: u64) -> Result<Vec<Purchase>, PurchaseRepositoryError> {
        self.filtered(|order| order.user_id == user_id)
    }

    async fn list_by_product(
        &self,
        product_id: u64,
    ) -> Result<Vec<Purchase>, PurchaseRepositoryError> {
        self.filtered(|order| order.product_id == product_id)
    }
}
