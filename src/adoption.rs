//! Adoption workflow: reference checks, the one-adoption-per-pet rule and
//! the pet status flip.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Set, TransactionTrait, Unchanged,
};
use thiserror::Error;

use crate::db::is_unique_violation;
use crate::entities::{adocao, adotante, pet, pet::PetStatus};
use crate::lookup::Lookup;

#[derive(Debug, Error)]
pub enum AdoptionError {
    #[error("Pet não encontrado.")]
    PetNotFound,
    #[error("Adotante não encontrado.")]
    AdotanteNotFound,
    #[error("Adoção não encontrada.")]
    AdocaoNotFound,
    #[error("Este pet já foi adotado.")]
    PetAlreadyAdopted,
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// An adoption together with the rows it points at.
#[derive(Clone, Debug, PartialEq)]
pub struct AdocaoDetalhada {
    pub adocao: adocao::Model,
    pub pet: Option<pet::Model>,
    pub adotante: Option<adotante::Model>,
}

async fn check_references<C>(conn: &C, adotante_id: i32, pet_id: i32) -> Result<(), AdoptionError>
where
    C: ConnectionTrait,
{
    let pet_exists = pet::Entity::exists(conn, pet_id).await?;
    let adotante_exists = adotante::Entity::exists(conn, adotante_id).await?;

    if !pet_exists {
        return Err(AdoptionError::PetNotFound);
    }
    if !adotante_exists {
        return Err(AdoptionError::AdotanteNotFound);
    }
    Ok(())
}

fn adopted_on_unique_violation(err: DbErr) -> AdoptionError {
    if is_unique_violation(&err) {
        AdoptionError::PetAlreadyAdopted
    } else {
        AdoptionError::Db(err)
    }
}

/// Records an adoption and marks the pet as adopted, both or neither.
pub async fn create(
    db: &DatabaseConnection,
    adotante_id: i32,
    pet_id: i32,
) -> Result<adocao::Model, AdoptionError> {
    let txn = db.begin().await?;

    check_references(&txn, adotante_id, pet_id).await?;

    let existing = adocao::Entity::find()
        .filter(adocao::Column::PetId.eq(pet_id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(AdoptionError::PetAlreadyAdopted);
    }

    let now = Utc::now().naive_utc();
    let created = adocao::ActiveModel {
        adotante_id: Set(adotante_id),
        pet_id: Set(pet_id),
        data_adocao: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(adopted_on_unique_violation)?;

    let flipped = pet::Entity::update_many()
        .col_expr(pet::Column::Status, Expr::value(PetStatus::Adotado))
        .col_expr(pet::Column::UpdatedAt, Expr::value(now))
        .filter(pet::Column::Id.eq(pet_id))
        .exec(&txn)
        .await?;
    if flipped.rows_affected == 0 {
        return Err(AdoptionError::PetNotFound);
    }

    txn.commit().await?;
    Ok(created)
}

/// Points an adoption at another adopter and/or pet.
///
/// The pets' status flags are left untouched.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    adotante_id: i32,
    pet_id: i32,
) -> Result<adocao::Model, AdoptionError> {
    check_references(db, adotante_id, pet_id).await?;

    let changes = adocao::ActiveModel {
        id: Unchanged(id),
        adotante_id: Set(adotante_id),
        pet_id: Set(pet_id),
        ..Default::default()
    };

    match changes.update(db).await {
        Ok(model) => Ok(model),
        Err(DbErr::RecordNotUpdated) => Err(AdoptionError::AdocaoNotFound),
        Err(err) => Err(adopted_on_unique_violation(err)),
    }
}

/// Removes an adoption. The pet keeps its adopted status.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), AdoptionError> {
    let res = adocao::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(AdoptionError::AdocaoNotFound);
    }
    Ok(())
}

async fn with_relations<C>(
    conn: &C,
    rows: Vec<adocao::Model>,
) -> Result<Vec<AdocaoDetalhada>, DbErr>
where
    C: ConnectionTrait,
{
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let pets = rows.load_one(pet::Entity, conn).await?;
    let adotantes = rows.load_one(adotante::Entity, conn).await?;

    Ok(rows
        .into_iter()
        .zip(pets)
        .zip(adotantes)
        .map(|((adocao, pet), adotante)| AdocaoDetalhada {
            adocao,
            pet,
            adotante,
        })
        .collect())
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<AdocaoDetalhada>, DbErr> {
    let rows = adocao::Entity::find()
        .order_by_asc(adocao::Column::Id)
        .all(db)
        .await?;
    with_relations(db, rows).await
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<AdocaoDetalhada>, DbErr> {
    let Some(row) = adocao::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    Ok(with_relations(db, vec![row]).await?.pop())
}

/// Every adoption made by one adopter; empty when there are none.
pub async fn find_by_adotante(
    db: &DatabaseConnection,
    adotante_id: i32,
) -> Result<Vec<AdocaoDetalhada>, DbErr> {
    let rows = adocao::Entity::find()
        .filter(adocao::Column::AdotanteId.eq(adotante_id))
        .order_by_asc(adocao::Column::Id)
        .all(db)
        .await?;
    with_relations(db, rows).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_pet_insert_means_already_adopted() {
        let err = DbErr::Custom(
            "duplicate key value violates unique constraint \"adocoes_pet_id_key\"".into(),
        );
        assert!(matches!(
            adopted_on_unique_violation(err),
            AdoptionError::PetAlreadyAdopted
        ));
    }

    #[test]
    fn other_insert_failures_stay_database_errors() {
        let err = DbErr::Custom("connection reset".into());
        assert!(matches!(adopted_on_unique_violation(err), AdoptionError::Db(_)));
    }
}
