//! Purchase order endpoints.
//!
//! ```text
//! POST /purchase/              {"id_user":1,"id_product":7}
//! GET  /purchase/
//! GET  /purchase/product/{id}
//! GET  /historico_user/{id}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::ports::PurchaseRepositoryError;
use crate::domain::{Error, NewPurchase, Purchase};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /purchase/`. Any `id` is ignored.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PurchasePayload {
    /// Client-side id; ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Buyer id.
    #[serde(rename = "id_user")]
    pub user_id: u64,
    /// Purchased product id.
    #[serde(rename = "id_product")]
    pub product_id: u64,
}

impl From<PurchasePayload> for NewPurchase {
    fn from(value: PurchasePayload) -> Self {
        Self {
            user_id: value.user_id,
            product_id: value.product_id,
        }
    }
}

fn map_store_error(err: PurchaseRepositoryError) -> Error {
    error!(error = %err, "purchase store failed");
    Error::internal(err.to_string())
}

/// Record an order. Neither id is checked against the other stores.
#[utoipa::path(
    post,
    path = "/purchase/",
    request_body = PurchasePayload,
    responses(
        (status = 200, description = "Created order", body = Purchase),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["purchases"],
    operation_id = "createPurchase"
)]
#[post("/purchase/")]
pub async fn create_purchase(
    state: web::Data<HttpState>,
    payload: web::Json<PurchasePayload>,
) -> ApiResult<web::Json<Purchase>> {
    let order = state
        .purchases
        .create(payload.into_inner().into())
        .await
        .map_err(map_store_error)?;
    Ok(web::Json(order))
}

/// List every order.
#[utoipa::path(
    get,
    path = "/purchase/",
    responses((status = 200, description = "Orders", body = [Purchase])),
    tags = ["purchases"],
    operation_id = "listPurchases"
)]
#[get("/purchase/")]
pub async fn list_purchases(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Purchase>>> {
    let orders = state.purchases.list().await.map_err(map_store_error)?;
    Ok(web::Json(orders))
}

/// Orders placed by one user, possibly none.
#[utoipa::path(
    get,
    path = "/historico_user/{id}",
    params(("id" = u64, Path, description = "User id")),
    responses((status = 200, description = "Orders by the user", body = [Purchase])),
    tags = ["purchases"],
    operation_id = "purchaseHistory"
)]
#[get("/historico_user/{id}")]
pub async fn purchase_history(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<Vec<Purchase>>> {
    let orders = state
        .purchases
        .list_by_user(path.into_inner())
        .await
        .map_err(map_store_error)?;
    Ok(web::Json(orders))
}

/// Orders for one product, possibly none.
#[utoipa::path(
    get,
    path = "/purchase/product/{id}",
    params(("id" = u64, Path, description = "Product id")),
    responses((status = 200, description = "Orders for the product", body = [Purchase])),
    tags = ["purchases"],
    operation_id = "purchasesByProduct"
)]
#[get("/purchase/product/{id}")]
pub async fn purchases_by_product(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<Vec<Purchase>>> {
    let orders = state
        .purchases
        .list_by_product(path.into_inner())
        .await
        .map_err(map_store_error)?;
    Ok(web::Json(orders))
}
