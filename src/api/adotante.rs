use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::{
    ActiveModelTrait, EntityTrait, IntoActiveModel, QueryOrder, Set,
};
use tracing::Span;

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::{Json, Path};
use crate::db::Db;
use crate::entities::adotante;
use crate::metrics;

const NOT_FOUND: &str = "Adotante não encontrado.";

#[derive(serde::Deserialize)]
pub struct CreateAdotanteRequest {
    nome: String,
    email: String,
    telefone: Option<String>,
    endereco: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct UpdateAdotanteRequest {
    nome: Option<String>,
    email: Option<String>,
    telefone: Option<String>,
    endereco: Option<String>,
}

fn validate_nome(nome: &str) -> ApiResult<()> {
    if nome.trim().is_empty() {
        return Err(ApiError::BadRequest("O campo 'nome' é obrigatório.".into()));
    }
    Ok(())
}

fn validate_email(email: &str) -> ApiResult<()> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::BadRequest("Informe um e-mail válido.".into()));
    }
    Ok(())
}

pub async fn create_adotante(
    Extension(db): Extension<Db>,
    Json(payload): Json<CreateAdotanteRequest>,
) -> ApiResult<impl IntoResponse> {
    Span::current()
        .record("table", "adotantes")
        .record("action", "create_adotante");

    validate_nome(&payload.nome)?;
    validate_email(&payload.email)?;

    let now = chrono::Utc::now().naive_utc();
    let created = adotante::ActiveModel {
        nome: Set(payload.nome),
        email: Set(payload.email.trim().to_string()),
        telefone: Set(payload.telefone),
        endereco: Set(payload.endereco),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db.as_ref())
    .await
    .map_err(ApiError::internal("Erro ao cadastrar o adotante."))?;

    Span::current()
        .record("adotante_id", created.id)
        .record("business_event", "Adopter registered");
    metrics::record_adotante_created();

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_adotantes(
    Extension(db): Extension<Db>,
) -> ApiResult<Json<Vec<adotante::Model>>> {
    Span::current()
        .record("table", "adotantes")
        .record("action", "list_adotantes");

    adotante::Entity::find()
        .order_by_asc(adotante::Column::Id)
        .all(db.as_ref())
        .await
        .map(Json)
        .map_err(ApiError::internal("Erro ao buscar os adotantes."))
}

pub async fn get_adotante(
    Extension(db): Extension<Db>,
    Path(adotante_id): Path<i32>,
) -> ApiResult<Json<adotante::Model>> {
    Span::current()
        .record("table", "adotantes")
        .record("action", "get_adotante")
        .record("adotante_id", adotante_id);

    adotante::Entity::find_by_id(adotante_id)
        .one(db.as_ref())
        .await
        .map_err(ApiError::internal("Erro ao buscar o adotante."))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))
}

pub async fn update_adotante(
    Extension(db): Extension<Db>,
    Path(adotante_id): Path<i32>,
    Json(payload): Json<UpdateAdotanteRequest>,
) -> ApiResult<Json<adotante::Model>> {
    const FAILED: &str = "Erro ao atualizar o adotante.";
    Span::current()
        .record("table", "adotantes")
        .record("action", "update_adotante")
        .record("adotante_id", adotante_id);

    if let Some(nome) = &payload.nome {
        validate_nome(nome)?;
    }
    if let Some(email) = &payload.email {
        validate_email(email)?;
    }

    let adotante = adotante::Entity::find_by_id(adotante_id)
        .one(db.as_ref())
        .await
        .map_err(ApiError::internal(FAILED))?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;

    let mut active = adotante.into_active_model();
    if let Some(nome) = payload.nome {
        active.nome = Set(nome);
    }
    if let Some(email) = payload.email {
        active.email = Set(email.trim().to_string());
    }
    if let Some(telefone) = payload.telefone {
        active.telefone = Set(Some(telefone));
    }
    if let Some(endereco) = payload.endereco {
        active.endereco = Set(Some(endereco));
    }
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    active
        .update(db.as_ref())
        .await
        .map(Json)
        .map_err(ApiError::internal(FAILED))
}

pub async fn delete_adotante(
    Extension(db): Extension<Db>,
    Path(adotante_id): Path<i32>,
) -> ApiResult<StatusCode> {
    Span::current()
        .record("table", "adotantes")
        .record("action", "delete_adotante")
        .record("adotante_id", adotante_id);

    let res = adotante::Entity::delete_by_id(adotante_id)
        .exec(db.as_ref())
        .await
        .map_err(ApiError::internal("Erro ao excluir o adotante."))?;
    if res.rows_affected == 0 {
        return Err(ApiError::NotFound(NOT_FOUND.into()));
    }

    metrics::refresh_gauges(db.as_ref()).await;
    Ok(StatusCode::NO_CONTENT)
}
