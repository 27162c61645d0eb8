//! Handler tests for the user endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::ports::{
    MockProductRepository, MockPurchaseRepository, MockUserRepository, UserRepositoryError,
};
use crate::inbound::http::test_utils::{seeded_state, send, state_with};

fn ada() -> Value {
    json!({
        "id": 0,
        "cpf": "12345678909",
        "nome": "Ada Lovelace",
        "email": "ada@example.org",
        "telefone": "555-0100",
        "endereco": "12 Analytical Row London",
        "data_nascimento": "1815-12-10"
    })
}

async fn post_user(state: &crate::inbound::http::state::HttpState, body: &Value) -> (StatusCode, Value) {
    let response = send(
        state,
        actix_test::TestRequest::post().uri("/usuarios/").set_json(body),
    )
    .await;
    let status = response.status();
    (status, actix_test::read_body_json(response).await)
}

#[actix_web::test]
async fn create_assigns_sequential_ids_and_ignores_body_id() {
    let (state, _temp) = seeded_state();

    let (status, first) = post_user(&state, &ada()).await;
    let (_, second) = post_user(&state, &ada()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], 1);
    assert_eq!(second["id"], 2);
    assert_eq!(first["cpf"], "12345678909");
    assert_eq!(first["nome"], "Ada Lovelace");
    assert_eq!(first["data_nascimento"], "1815-12-10");
}

#[rstest]
#[case::bad_checksum("cpf", "12345678900", "cpf", "invalid_cpf")]
#[case::formatted_cpf("cpf", "123.456.789-09", "cpf", "invalid_cpf")]
#[case::blank_name("nome", "   ", "nome", "blank_name")]
#[case::bad_date("data_nascimento", "10/12/1815", "data_nascimento", "invalid_birth_date")]
#[actix_web::test]
async fn create_rejects_invalid_fields(
    #[case] key: &str,
    #[case] value: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let (state, _temp) = seeded_state();
    let mut body = ada();
    body[key] = json!(value);

    let (status, payload) = post_user(&state, &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["code"], "invalid_request");
    assert_eq!(payload["details"]["field"], field);
    assert_eq!(payload["details"]["code"], code);
}

#[actix_web::test]
async fn malformed_json_uses_shared_error_shape() {
    let (state, _temp) = seeded_state();

    let response = send(
        &state,
        actix_test::TestRequest::post()
            .uri("/usuarios/")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"cpf\":"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: Value = actix_test::read_body_json(response).await;
    assert_eq!(payload["code"], "invalid_request");
}

#[actix_web::test]
async fn list_get_update_delete_round_trip() {
    let (state, _temp) = seeded_state();
    post_user(&state, &ada()).await;

    let listed: Value = actix_test::read_body_json(
        send(&state, actix_test::TestRequest::get().uri("/usuarios/")).await,
    )
    .await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let update = json!({
        "cpf": "11144477735",
        "nome": "Augusta Ada King",
        "email": "countess@example.org",
        "telefone": "555-0199",
        "endereco": "Ockham Park",
        "data_nascimento": "1815-12-10"
    });
    let put_response = send(
        &state,
        actix_test::TestRequest::put().uri("/usuarios/1").set_json(&update),
    )
    .await;
    assert_eq!(put_response.status(), StatusCode::OK);
    let updated: Value = actix_test::read_body_json(put_response).await;
    assert_eq!(updated["nome"], "Augusta Ada King");
    assert_eq!(updated["cpf"], "12345678909", "cpf never changes");

    let delete_response = send(&state, actix_test::TestRequest::delete().uri("/usuarios/1")).await;
    assert_eq!(delete_response.status(), StatusCode::NO_CONTENT);

    let get_response = send(&state, actix_test::TestRequest::get().uri("/usuarios/1")).await;
    assert_eq!(get_response.status(), StatusCode::NOT_FOUND);
    let payload: Value = actix_test::read_body_json(get_response).await;
    assert_eq!(payload["message"], "Usuário '1' não encontrado");
}

#[rstest]
#[case::update(actix_test::TestRequest::put().uri("/usuarios/7").set_json(json!({
    "nome": "x", "email": "", "telefone": "", "endereco": "", "data_nascimento": "2000-01-01"
})))]
#[case::delete(actix_test::TestRequest::delete().uri("/usuarios/7"))]
#[case::get(actix_test::TestRequest::get().uri("/usuarios/7"))]
#[actix_web::test]
async fn unknown_ids_are_not_found(#[case] request: actix_test::TestRequest) {
    let (state, _temp) = seeded_state();

    let response = send(&state, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn non_numeric_id_is_a_bad_request() {
    let (state, _temp) = seeded_state();

    let response = send(&state, actix_test::TestRequest::get().uri("/usuarios/abc")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn store_failure_is_redacted_internal_error() {
    let mut users = MockUserRepository::new();
    users
        .expect_list()
        .returning(|| Err(UserRepositoryError::unavailable("poisoned")));
    let state = state_with(
        Arc::new(users),
        Arc::new(MockProductRepository::new()),
        Arc::new(MockPurchaseRepository::new()),
    );

    let response = send(&state, actix_test::TestRequest::get().uri("/usuarios/")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload: Value = actix_test::read_body_json(response).await;
    assert_eq!(payload["message"], "Internal server error");
}
