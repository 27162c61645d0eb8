//! HTTP inbound adapter exposing the storefront REST endpoints.
//!
//! Paths and field names follow the established Portuguese wire contract
//! (`/usuarios/`, `/produtos/`, `nome`, `preco`, ...).

use actix_web::web;

pub mod error;
pub mod health;
pub mod home;
pub mod products;
pub mod purchases;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
pub use health::HealthState;
pub use state::HttpState;

/// Register every storefront route plus the JSON and path extractor error
/// handlers.
///
/// Health probes read `web::Data<HealthState>`, which the caller provides.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(home::home)
        .service(health::ready)
        .service(health::live)
        .service(users::create_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(products::create_product)
        .service(products::list_products)
        .service(products::get_product)
        .service(products::update_product)
        .service(products::delete_product)
        .service(purchases::create_purchase)
        .service(purchases::list_purchases)
        .service(purchases::purchase_history)
        .service(purchases::purchases_by_product);
}
