//! Landing endpoint.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Greeting returned by `GET /`.
pub const HOME_MESSAGE: &str = "Bem-vindo à API de Recomendação de Produtos";

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HomeResponse {
    /// Greeting text.
    #[serde(rename = "mensagem")]
    pub message: String,
}

/// Confirm the server is up.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting", body = HomeResponse)),
    tags = ["home"],
    operation_id = "home"
)]
#[get("/")]
pub async fn home() -> web::Json<HomeResponse> {
    web::Json(HomeResponse {
        message: HOME_MESSAGE.to_owned(),
    })
}
