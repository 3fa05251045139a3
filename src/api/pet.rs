use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use tracing::Span;

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::{Json, Path, Query};
use crate::db::Db;
use crate::entities::{pet, pet::PetStatus};
use crate::metrics;

const NOT_FOUND: &str = "Pet não encontrado.";

#[derive(serde::Deserialize)]
pub struct CreatePetRequest {
    nome: String,
    especie: String,
    raca: Option<String>,
    idade: Option<i32>,
    descricao: Option<String>,
    status: Option<PetStatus>,
}

#[derive(serde::Deserialize)]
pub struct UpdatePetRequest {
    nome: Option<String>,
    especie: Option<String>,
    raca: Option<String>,
    idade: Option<i32>,
    descricao: Option<String>,
    status: Option<PetStatus>,
}

#[derive(serde::Deserialize)]
pub struct ListPetsQuery {
    status: Option<PetStatus>,
}

fn require(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("O campo '{field}' é obrigatório.")));
    }
    Ok(())
}

pub async fn create_pet(
    Extension(db): Extension<Db>,
    Json(payload): Json<CreatePetRequest>,
) -> ApiResult<impl IntoResponse> {
    Span::current()
        .record("table", "pets")
        .record("action", "create_pet");

    require("nome", &payload.nome)?;
    require("especie", &payload.especie)?;
    if payload.idade.is_some_and(|idade| idade < 0) {
        return Err(ApiError::BadRequest("A idade não pode ser negativa.".into()));
    }

    let now = chrono::Utc::now().naive_utc();
    let new_pet = pet::ActiveModel {
        nome: Set(payload.nome),
        especie: Set(payload.especie),
        raca: Set(payload.raca),
        idade: Set(payload.idade),
        descricao: Set(payload.descricao),
        status: Set(payload.status.unwrap_or(PetStatus::Disponivel)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = new_pet
        .insert(db.as_ref())
        .await
        .map_err(ApiError::internal("Erro ao cadastrar o pet."))?;

    Span::current()
        .record("pet_id", created.id)
        .record("business_event", "Pet registered");
    metrics::record_pet_created(created.status);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_pets(
    Extension(db): Extension<Db>,
    Query(query): Query<ListPetsQuery>,
) -> ApiResult<Json<Vec<pet::Model>>> {
    Span::current()
        .record("table", "pets")
        .record("action", "list_pets");

    let mut select = pet::Entity::find().order_by_asc(pet::Column::Id);
    if let Some(status) = query.status {
        select = select.filter(pet::Column::Status.eq(status));
    }

    let pets = select
        .all(db.as_ref())
        .await
        .map_err(ApiError::internal("Erro ao buscar os pets."))?;
    Ok(Json(pets))
}

pub async fn get_pet(
    Extension(db): Extension<Db>,
    Path(pet_id): Path<i32>,
) -> ApiResult<Json<pet::Model>> {
    Span::current()
        .record("table", "pets")
        .record("action", "get_pet")
        .record("pet_id", pet_id);

    pet::Entity::find_by_id(pet_id)
        .one(db.as_ref())
        .await
        .map_err(ApiError::internal("Erro ao buscar o pet."))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))
}

pub async fn update_pet(
    Extension(db): Extension<Db>,
    Path(pet_id): Path<i32>,
    Json(payload): Json<UpdatePetRequest>,
) -> ApiResult<Json<pet::Model>> {
    const FAILED: &str = "Erro ao atualizar o pet.";
    Span::current()
        .record("table", "pets")
        .record("action", "update_pet")
        .record("pet_id", pet_id);

    if let Some(nome) = &payload.nome {
        require("nome", nome)?;
    }
    if let Some(especie) = &payload.especie {
        require("especie", especie)?;
    }

    let pet = pet::Entity::find_by_id(pet_id)
        .one(db.as_ref())
        .await
        .map_err(ApiError::internal(FAILED))?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;
    let status_changed = payload.status.is_some_and(|status| status != pet.status);

    let mut active_pet = pet.into_active_model();
    if let Some(nome) = payload.nome { active_pet.nome = Set(nome); }
    if let Some(especie) = payload.especie { active_pet.especie = Set(especie); }
    if let Some(raca) = payload.raca { active_pet.raca = Set(Some(raca)); }
    if let Some(idade) = payload.idade { active_pet.idade = Set(Some(idade)); }
    if let Some(descricao) = payload.descricao { active_pet.descricao = Set(Some(descricao)); }
    if let Some(status) = payload.status { active_pet.status = Set(status); }
    active_pet.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = active_pet
        .update(db.as_ref())
        .await
        .map_err(ApiError::internal(FAILED))?;

    if status_changed {
        metrics::refresh_gauges(db.as_ref()).await;
    }
    Ok(Json(updated))
}

pub async fn delete_pet(
    Extension(db): Extension<Db>,
    Path(pet_id): Path<i32>,
) -> ApiResult<StatusCode> {
    Span::current()
        .record("table", "pets")
        .record("action", "delete_pet")
        .record("pet_id", pet_id);

    let res = pet::Entity::delete_by_id(pet_id)
        .exec(db.as_ref())
        .await
        .map_err(ApiError::internal("Erro ao excluir o pet."))?;
    if res.rows_affected == 0 {
        return Err(ApiError::NotFound(NOT_FOUND.into()));
    }

    metrics::refresh_gauges(db.as_ref()).await;
    Ok(StatusCode::NO_CONTENT)
}
