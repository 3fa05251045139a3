use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::Span;

use crate::adoption::{self, AdocaoDetalhada, AdoptionError};
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::{Json, Path};
use crate::db::Db;
use crate::dates::format_date;
use crate::entities::{adocao, adotante, pet};
use crate::metrics;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdocaoRequest {
    adotante_id: i32,
    pet_id: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdocaoResponse {
    pub id: i32,
    pub adotante_id: i32,
    pub pet_id: i32,
    pub data_adocao: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adotante: Option<adotante::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet: Option<pet::Model>,
}

impl From<adocao::Model> for AdocaoResponse {
    fn from(model: adocao::Model) -> Self {
        Self {
            id: model.id,
            adotante_id: model.adotante_id,
            pet_id: model.pet_id,
            data_adocao: format_date(model.data_adocao),
            adotante: None,
            pet: None,
        }
    }
}

impl From<AdocaoDetalhada> for AdocaoResponse {
    fn from(detalhada: AdocaoDetalhada) -> Self {
        Self {
            adotante: detalhada.adotante,
            pet: detalhada.pet,
            ..detalhada.adocao.into()
        }
    }
}

fn to_api_error(err: AdoptionError, internal: &'static str) -> ApiError {
    match err {
        AdoptionError::Db(db_err) => ApiError::internal(internal)(db_err),
        other @ AdoptionError::PetAlreadyAdopted => {
            Span::current().record("error", "pet_already_adopted");
            ApiError::Conflict(other.to_string())
        }
        other => {
            Span::current().record("error", "reference_not_found");
            ApiError::NotFound(other.to_string())
        }
    }
}

// POST /adocoes
pub async fn create_adocao(
    Extension(db): Extension<Db>,
    Json(payload): Json<AdocaoRequest>,
) -> ApiResult<impl IntoResponse> {
    Span::current()
        .record("table", "adocoes")
        .record("action", "create_adocao")
        .record("pet_id", payload.pet_id)
        .record("adotante_id", payload.adotante_id);

    let created = adoption::create(db.as_ref(), payload.adotante_id, payload.pet_id)
        .await
        .map_err(|e| to_api_error(e, "Erro ao criar a adoção."))?;

    Span::current()
        .record("adocao_id", created.id)
        .record("business_event", "Pet adopted");
    metrics::record_adoption_created();

    Ok((StatusCode::CREATED, Json(AdocaoResponse::from(created))))
}

// GET /adocoes
pub async fn list_adocoes(
    Extension(db): Extension<Db>,
) -> ApiResult<Json<Vec<AdocaoResponse>>> {
    Span::current()
        .record("table", "adocoes")
        .record("action", "list_adocoes");

    let rows = adoption::find_all(db.as_ref()).await.map_err(ApiError::internal(
        "Erro ao buscar as adoções. Verifique se pet ou adotante existe.",
    ))?;
    Ok(Json(rows.into_iter().map(AdocaoResponse::from).collect()))
}

// GET /adocoes/:id
pub async fn get_adocao(
    Extension(db): Extension<Db>,
    Path(id): Path<i32>,
) -> ApiResult<Json<AdocaoResponse>> {
    Span::current()
        .record("table", "adocoes")
        .record("action", "get_adocao")
        .record("adocao_id", id);

    match adoption::find_by_id(db.as_ref(), id)
        .await
        .map_err(ApiError::internal("Erro ao buscar a adoção."))?
    {
        Some(found) => Ok(Json(found.into())),
        None => Err(ApiError::NotFound(AdoptionError::AdocaoNotFound.to_string())),
    }
}

// PUT /adocoes/:id
pub async fn update_adocao(
    Extension(db): Extension<Db>,
    Path(id): Path<i32>,
    Json(payload): Json<AdocaoRequest>,
) -> ApiResult<Json<AdocaoResponse>> {
    Span::current()
        .record("table", "adocoes")
        .record("action", "update_adocao")
        .record("adocao_id", id)
        .record("pet_id", payload.pet_id)
        .record("adotante_id", payload.adotante_id);

    let updated = adoption::update(db.as_ref(), id, payload.adotante_id, payload.pet_id)
        .await
        .map_err(|e| to_api_error(e, "Erro ao atualizar a adoção."))?;
    Ok(Json(updated.into()))
}

// DELETE /adocoes/:id
pub async fn delete_adocao(
    Extension(db): Extension<Db>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    Span::current()
        .record("table", "adocoes")
        .record("action", "delete_adocao")
        .record("adocao_id", id);

    const FAILED: &str = "Erro ao excluir a adoção.";
    match adoption::delete(db.as_ref(), id).await {
        Ok(()) => {
            metrics::record_adoption_deleted();
            Ok(StatusCode::NO_CONTENT)
        }
        // An unknown id is a failed delete, not a 404.
        Err(AdoptionError::AdocaoNotFound) => {
            tracing::error!(adocao_id = id, "no adoption row to delete");
            Err(ApiError::Internal(FAILED))
        }
        Err(err) => Err(to_api_error(err, FAILED)),
    }
}

// GET /adotantes/:id/adocoes
pub async fn list_adocoes_by_adotante(
    Extension(db): Extension<Db>,
    Path(adotante_id): Path<i32>,
) -> ApiResult<Json<Vec<AdocaoResponse>>> {
    Span::current()
        .record("table", "adocoes")
        .record("action", "list_adocoes_by_adotante")
        .record("adotante_id", adotante_id);

    let rows = adoption::find_by_adotante(db.as_ref(), adotante_id)
        .await
        .map_err(ApiError::internal(
            "Erro ao buscar adoções para o adotante especificado.",
        ))?;
    Ok(Json(rows.into_iter().map(AdocaoResponse::from).collect()))
}
