//! Product catalogue endpoints.
//!
//! ```text
//! POST   /produtos/       {"nome":"Mouse","descricao":"","preco":10.0,"categoria":"Periféricos","tags":[]}
//! GET    /produtos/
//! GET    /produtos/{id}   -> array holding the match
//! PUT    /produtos/{id}
//! DELETE /produtos/{id}   -> confirmation string
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::domain::ports::ProductRepositoryError;
use crate::domain::{Error, Product, ProductDetails, ProductValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for creating or replacing a product. Any `id` is ignored.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ProductPayload {
    /// Client-side id; ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Display name; must not be blank.
    #[serde(rename = "nome")]
    pub name: String,
    /// Free-text description.
    #[serde(rename = "descricao")]
    pub description: String,
    /// Unit price; finite and non-negative.
    #[serde(rename = "preco")]
    pub price: f64,
    /// Category label.
    #[serde(rename = "categoria")]
    pub category: String,
    /// Search tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TryFrom<ProductPayload> for ProductDetails {
    type Error = ProductValidationError;

    fn try_from(value: ProductPayload) -> Result<Self, Self::Error> {
        Self::try_new(
            value.name,
            value.description,
            value.price,
            value.category,
            value.tags,
        )
    }
}

fn map_validation_error(err: ProductValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": err.field() }))
}

fn map_store_error(err: ProductRepositoryError) -> Error {
    error!(error = %err, "product store failed");
    Error::internal(err.to_string())
}

fn not_found(id: u64) -> Error {
    Error::not_found(format!("Produto '{id}' não encontrado"))
}

/// Add a product to the catalogue.
#[utoipa::path(
    post,
    path = "/produtos/",
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Created product", body = Product),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Catalogue file could not be written", body = Error)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/produtos/")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<ProductPayload>,
) -> ApiResult<web::Json<Product>> {
    let details = ProductDetails::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let product = state
        .products
        .create(details)
        .await
        .map_err(map_store_error)?;
    info!(product_id = product.id, "product created");
    Ok(web::Json(product))
}

/// List the catalogue.
#[utoipa::path(
    get,
    path = "/produtos/",
    responses((status = 200, description = "Products", body = [Product])),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/produtos/")]
pub async fn list_products(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Product>>> {
    let products = state.products.list().await.map_err(map_store_error)?;
    Ok(web::Json(products))
}

/// Look up a product. The match is returned inside an array.
#[utoipa::path(
    get,
    path = "/produtos/{id}",
    params(("id" = u64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Matching products", body = [Product]),
        (status = 404, description = "Unknown product", body = Error)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/produtos/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<Vec<Product>>> {
    let id = path.into_inner();
    let product = state
        .products
        .find_by_id(id)
        .await
        .map_err(map_store_error)?
        .ok_or_else(|| not_found(id))?;
    Ok(web::Json(vec![product]))
}

/// Replace every field of a product except its id.
#[utoipa::path(
    put,
    path = "/produtos/{id}",
    params(("id" = u64, Path, description = "Product id")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown product", body = Error)
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[put("/produtos/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    payload: web::Json<ProductPayload>,
) -> ApiResult<web::Json<Product>> {
    let id = path.into_inner();
    let details = ProductDetails::try_from(payload.into_inner()).map_err(map_validation_error)?;
    state
        .products
        .update(id, details)
        .await
        .map_err(map_store_error)?
        .map(web::Json)
        .ok_or_else(|| not_found(id))
}

/// Remove a product and confirm with a message.
#[utoipa::path(
    delete,
    path = "/produtos/{id}",
    params(("id" = u64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Confirmation message", body = String),
        (status = 404, description = "Unknown product", body = Error)
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/produtos/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<String>> {
    let id = path.into_inner();
    if state.products.delete(id).await.map_err(map_store_error)? {
        info!(product_id = id, "product deleted");
        Ok(web::Json(format!("Produto '{id}' deletado com sucesso.")))
    } else {
        Err(not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::ports::{
        MockProductRepository, MockPurchaseRepository, MockUserRepository,
        ProductRepositoryError,
    };
    use crate::inbound::http::test_utils::{seeded_state, send, state_with};

    fn headset() -> Value {
        json!({
            "id": 2148,
            "nome": "test_",
            "descricao": "produto de teste",
            "preco": 0.99,
            "categoria": "test",
            "tags": ["test1", "test2", "testapi"]
        })
    }

    #[actix_web::test]
    async fn lists_seed_catalogue() {
        let (state, _temp) = seeded_state();

        let body: Value = actix_test::read_body_json(
            send(&state, actix_test::TestRequest::get().uri("/produtos/")).await,
        )
        .await;

        assert_eq!(body.as_array().map(Vec::len), Some(2));
    }

    #[actix_web::test]
    async fn get_returns_match_wrapped_in_array() {
        let (state, _temp) = seeded_state();

        let body: Value = actix_test::read_body_json(
            send(&state, actix_test::TestRequest::get().uri("/produtos/1")).await,
        )
        .await;

        assert_eq!(body[0]["id"], 1);
        assert_eq!(body[0]["nome"], "Samsung Galaxy S23");
        assert_eq!(body[0]["categoria"], "Smartphones");
    }

    #[actix_web::test]
    async fn create_echoes_fields_with_next_id() {
        let (state, _temp) = seeded_state();

        let response = send(
            &state,
            actix_test::TestRequest::post()
                .uri("/produtos/")
                .set_json(headset()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["id"], 3);
        assert_eq!(body["nome"], "test_");
        assert_eq!(body["preco"], 0.99);
        assert_eq!(body["tags"], json!(["test1", "test2", "testapi"]));
    }

    #[rstest]
    #[case::negative_price("preco", json!(-1.0), "preco")]
    #[case::blank_name("nome", json!(""), "nome")]
    #[actix_web::test]
    async fn create_rejects_invalid_fields(
        #[case] key: &str,
        #[case] value: Value,
        #[case] field: &str,
    ) {
        let (state, _temp) = seeded_state();
        let mut body = headset();
        body[key] = value;

        let response = send(
            &state,
            actix_test::TestRequest::post().uri("/produtos/").set_json(body),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload: Value = actix_test::read_body_json(response).await;
        assert_eq!(payload["details"]["field"], field);
    }

    #[actix_web::test]
    async fn update_then_delete_with_original_messages() {
        let (state, _temp) = seeded_state();

        let put_response = send(
            &state,
            actix_test::TestRequest::put()
                .uri("/produtos/2")
                .set_json(headset()),
        )
        .await;
        assert_eq!(put_response.status(), StatusCode::OK);
        let updated: Value = actix_test::read_body_json(put_response).await;
        assert_eq!(updated["id"], 2);
        assert_eq!(updated["nome"], "test_");

        let delete_response =
            send(&state, actix_test::TestRequest::delete().uri("/produtos/2")).await;
        let message: Value = actix_test::read_body_json(delete_response).await;
        assert_eq!(message, json!("Produto '2' deletado com sucesso."));

        let get_response = send(&state, actix_test::TestRequest::get().uri("/produtos/2")).await;
        assert_eq!(get_response.status(), StatusCode::NOT_FOUND);
        let payload: Value = actix_test::read_body_json(get_response).await;
        assert_eq!(payload["message"], "Produto '2' não encontrado");
    }

    #[actix_web::test]
    async fn storage_failure_is_internal_error() {
        let mut products = MockProductRepository::new();
        products
            .expect_create()
            .returning(|_| Err(ProductRepositoryError::storage("disk full")));
        let state = state_with(
            Arc::new(MockUserRepository::new()),
            Arc::new(products),
            Arc::new(MockPurchaseRepository::new()),
        );

        let response = send(
            &state,
            actix_test::TestRequest::post()
                .uri("/produtos/")
                .set_json(headset()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
