mod common;

use adopet_server::entities::adotante;
use axum::http::StatusCode;
use common::*;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn create_adotante_returns_201() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![adotante(1)]])
            .into_connection(),
    );

    let (status, value) = send(
        test_app(db),
        json_request(
            "POST",
            "/api/adotantes",
            json!({"nome": "Maria Souza", "email": "maria@example.com"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(value["id"], 1);
    assert_eq!(value["email"], "maria@example.com");
}

#[tokio::test]
async fn create_adotante_rejects_bad_email() {
    let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let (status, value) = send(
        test_app(db),
        json_request("POST", "/api/adotantes", json!({"nome": "Maria", "email": "maria"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "Informe um e-mail válido.");
}

#[tokio::test]
async fn list_adotantes() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![adotante(1), adotante(2)]])
            .into_connection(),
    );

    let (status, value) = send(test_app(db), empty_request("GET", "/api/adotantes")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn get_missing_adotante_is_404() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<adotante::Model>::new()])
            .into_connection(),
    );

    let (status, value) = send(test_app(db), empty_request("GET", "/api/adotantes/9")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value, json!({"error": "Adotante não encontrado."}));
}

#[tokio::test]
async fn update_adotante_propagates_db_failure_as_500() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("timeout".into())])
            .into_connection(),
    );

    let (status, value) = send(
        test_app(db),
        json_request("PUT", "/api/adotantes/1", json!({"telefone": "11 99999-0000"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["error"], "Erro ao atualizar o adotante.");
}

#[tokio::test]
async fn delete_adotante_recounts_cascaded_adoptions() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection(),
    );

    let (status, _) = send(test_app(db.clone()), empty_request("DELETE", "/api/adotantes/1")).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    let log = transaction_log(db);
    assert!(log.contains(r#"DELETE FROM \"adotantes\""#));
    assert!(log.contains(r#"FROM \"adocoes\""#));
}
