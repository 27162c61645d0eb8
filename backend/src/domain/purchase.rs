//! Purchase orders linking a user to a product.
//!
//! Orders are recorded as given; neither id is checked against the user or
//! product stores.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An order that has not been stored yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewPurchase {
    /// Buyer id.
    pub user_id: u64,
    /// Purchased product id.
    pub product_id: u64,
}

/// A stored purchase order.
///
/// ```
/// use storefront::domain::Purchase;
///
/// let order = Purchase { id: 3, user_id: 1, product_id: 7 };
/// let json = serde_json::to_value(order).expect("serialise");
/// assert_eq!(json["id_user"], 1);
/// assert_eq!(json["id_product"], 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Purchase {
    /// Store-assigned identifier.
    pub id: u64,
    /// Buyer id.
    #[serde(rename = "id_user")]
    pub user_id: u64,
    /// Purchased product id.
    #[serde(rename = "id_product")]
    pub product_id: u64,
}

impl Purchase {
    /// Attach a store-assigned id to a new order.
    #[must_use]
    pub fn from_new(id: u64, order: NewPurchase) -> Self {
        Self {
            id,
            user_id: order.user_id,
            product_id: order.product_id,
        }
    }
}
