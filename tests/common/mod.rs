#![allow(dead_code)]

use adopet_server::config::Config;
use adopet_server::db::Db;
use adopet_server::entities::{adocao, adotante, pet, pet::PetStatus};
use adopet_server::routes;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 7)
        .unwrap()
        .and_hms_opt(9, 5, 30)
        .unwrap()
}

pub fn pet(id: i32, status: PetStatus) -> pet::Model {
    pet::Model {
        id,
        nome: "Thor".into(),
        especie: "cachorro".into(),
        raca: Some("vira-lata".into()),
        idade: Some(3),
        descricao: None,
        status,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn adotante(id: i32) -> adotante::Model {
    adotante::Model {
        id,
        nome: "Maria Souza".into(),
        email: "maria@example.com".into(),
        telefone: None,
        endereco: None,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn adocao(id: i32, adotante_id: i32, pet_id: i32) -> adocao::Model {
    adocao::Model {
        id,
        adotante_id,
        pet_id,
        data_adocao: timestamp(),
    }
}

pub fn test_app(db: Db) -> Router {
    let config = Config {
        port: 3000,
        database_url: "postgres://mock/adopet".into(),
        cors_origin: None,
        run_migrations: false,
    };
    routes::app(db, &config)
}

/// Debug rendering of every statement the mock saw. Call only after the
/// routers sharing `db` have been dropped.
pub fn transaction_log(db: Db) -> String {
    let db = Arc::try_unwrap(db).expect("router still holds the connection");
    format!("{:?}", db.into_transaction_log())
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn call(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

/// Sends the request and decodes a JSON body (`Value::Null` when empty).
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = call(app, request).await;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    (status, serde_json::from_slice(&bytes).unwrap())
}
