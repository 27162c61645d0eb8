//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every storefront endpoint together with the domain
//! and payload schemas they exchange. The document backs Swagger UI in debug
//! builds and is exported by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, Product, ProductDetails, Purchase, User, UserProfile};
use crate::inbound::http::home::HomeResponse;
use crate::inbound::http::products::ProductPayload;
use crate::inbound::http::purchases::PurchasePayload;
use crate::inbound::http::users::{UserPayload, UserProfilePayload};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        description = "Users, products and purchases for the product recommendation storefront."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::home::home,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::purchases::create_purchase,
        crate::inbound::http::purchases::list_purchases,
        crate::inbound::http::purchases::purchase_history,
        crate::inbound::http::purchases::purchases_by_product,
    ),
    components(schemas(
        User,
        UserProfile,
        Product,
        ProductDetails,
        Purchase,
        Error,
        ErrorCode,
        UserPayload,
        UserProfilePayload,
        ProductPayload,
        PurchasePayload,
        HomeResponse,
    )),
    tags(
        (name = "users", description = "User registration and maintenance"),
        (name = "products", description = "Product catalogue"),
        (name = "purchases", description = "Purchase records and history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
