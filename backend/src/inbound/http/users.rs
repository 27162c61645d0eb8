//! User endpoints.
//!
//! ```text
//! POST   /usuarios/       {"cpf":"12345678909","nome":"Ada",...}
//! GET    /usuarios/
//! GET    /usuarios/{id}
//! PUT    /usuarios/{id}
//! DELETE /usuarios/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::domain::ports::UserRepositoryError;
use crate::domain::{Error, NewUser, User, UserProfile, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `PUT /usuarios/{id}`. A `cpf` or `id` in the body is
/// ignored.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UserProfilePayload {
    /// Full name; must not be blank.
    #[serde(rename = "nome")]
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    #[serde(rename = "telefone")]
    pub phone: String,
    /// Postal address.
    #[serde(rename = "endereco")]
    pub address: String,
    /// Date of birth as `YYYY-MM-DD`.
    #[serde(rename = "data_nascimento")]
    #[schema(example = "1990-01-31")]
    pub birth_date: String,
}

/// Request body for `POST /usuarios/`.
///
/// The synthetic registration traffic sends exactly this shape, including
/// its own `id`, which the store replaces.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UserPayload {
    /// Client-side id; ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Unformatted 11-digit CPF.
    #[schema(example = "12345678909")]
    pub cpf: String,
    /// Remaining fields.
    #[serde(flatten)]
    pub profile: UserProfilePayload,
}

impl TryFrom<UserProfilePayload> for UserProfile {
    type Error = UserValidationError;

    fn try_from(value: UserProfilePayload) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.name,
            &value.email,
            &value.phone,
            &value.address,
            &value.birth_date,
        )
    }
}

impl TryFrom<UserPayload> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: UserPayload) -> Result<Self, Self::Error> {
        let profile = UserProfile::try_from(value.profile)?;
        Self::try_new(&value.cpf, profile)
    }
}

fn map_validation_error(err: UserValidationError) -> Error {
    let code = match err {
        UserValidationError::InvalidCpf(_) => "invalid_cpf",
        UserValidationError::BlankName => "blank_name",
        UserValidationError::InvalidBirthDate { .. } => "invalid_birth_date",
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": code,
    }))
}

fn map_store_error(err: UserRepositoryError) -> Error {
    error!(error = %err, "user store failed");
    Error::internal(err.to_string())
}

fn not_found(id: u64) -> Error {
    Error::not_found(format!("Usuário '{id}' não encontrado"))
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/usuarios/",
    request_body = UserPayload,
    responses(
        (status = 200, description = "Created user", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/usuarios/")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<User>> {
    let new_user = NewUser::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let user = state.users.create(new_user).await.map_err(map_store_error)?;
    info!(user_id = user.id, "user registered");
    Ok(web::Json(user))
}

/// List users in registration order.
#[utoipa::path(
    get,
    path = "/usuarios/",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/usuarios/")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list().await.map_err(map_store_error)?;
    Ok(web::Json(users))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/usuarios/{id}",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/usuarios/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<User>> {
    let id = path.into_inner();
    state
        .users
        .find_by_id(id)
        .await
        .map_err(map_store_error)?
        .map(web::Json)
        .ok_or_else(|| not_found(id))
}

/// Replace a user's profile. The id and CPF never change.
#[utoipa::path(
    put,
    path = "/usuarios/{id}",
    params(("id" = u64, Path, description = "User id")),
    request_body = UserProfilePayload,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/usuarios/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    payload: web::Json<UserProfilePayload>,
) -> ApiResult<web::Json<User>> {
    let id = path.into_inner();
    let profile = UserProfile::try_from(payload.into_inner()).map_err(map_validation_error)?;
    state
        .users
        .update(id, profile)
        .await
        .map_err(map_store_error)?
        .map(web::Json)
        .ok_or_else(|| not_found(id))
}

/// Remove a user.
#[utoipa::path(
    delete,
    path = "/usuarios/{id}",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 204, description = "User removed"),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/usuarios/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    if state.users.delete(id).await.map_err(map_store_error)? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(not_found(id))
    }
}

#[cfg(test)]
mod tests;
