use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One adopter taking one pet. `pet_id` is unique at the database level,
/// so a pet can appear in at most one row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "adocoes")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub adotante_id: i32,
    #[sea_orm(unique)]
    pub pet_id: i32,
    pub data_adocao: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::adotante::Entity",
        from = "Column::AdotanteId",
        to = "super::adotante::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Adotante,
    #[sea_orm(
        belongs_to = "super::pet::Entity",
        from = "Column::PetId",
        to = "super::pet::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Pet,
}

impl Related<super::adotante::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Adotante.def()
    }
}

impl Related<super::pet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
