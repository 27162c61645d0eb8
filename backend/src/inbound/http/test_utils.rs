//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::{App, test as actix_test, web};
use tempfile::TempDir;

use super::state::HttpState;
use crate::domain::ports::{ProductRepository, PurchaseRepository, UserRepository};
use crate::outbound::memory::{InMemoryPurchaseRepository, InMemoryUserRepository};
use crate::outbound::product_file::JsonFileProductRepository;

/// Two-product catalogue used by handler tests.
pub const PRODUCT_SEED: &str = r#"[
    {"id": 1, "nome": "Samsung Galaxy S23", "descricao": "Smartphone", "preco": 4999.0, "categoria": "Smartphones", "tags": ["android", "5g"]},
    {"id": 2, "nome": "Fone Bluetooth", "descricao": "Sem fio", "preco": 199.9, "categoria": "Áudio", "tags": []}
]"#;

/// Handler state over real in-memory stores and a temporary product file.
///
/// Keep the returned [`TempDir`] alive for as long as the state is used.
pub fn seeded_state() -> (HttpState, TempDir) {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("products.json");
    std::fs::write(&path, PRODUCT_SEED).expect("seed product file");
    let products = JsonFileProductRepository::open(&path).expect("open product file");
    let state = HttpState::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(products),
        Arc::new(InMemoryPurchaseRepository::new()),
    );
    (state, temp)
}

/// State whose stores are supplied by the caller, typically mocks.
pub fn state_with(
    users: Arc<dyn UserRepository>,
    products: Arc<dyn ProductRepository>,
    purchases: Arc<dyn PurchaseRepository>,
) -> HttpState {
    HttpState::new(users, products, purchases)
}

/// Run one request through an app wired with the full route table.
pub async fn send(state: &HttpState, request: actix_test::TestRequest) -> ServiceResponse {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(super::configure),
    )
    .await;
    actix_test::call_service(&app, request.to_request()).await
}
