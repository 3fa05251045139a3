use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Adoption state of a pet, stored as a one-character flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Deserialize, Serialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum PetStatus {
    #[sea_orm(string_value = "0")]
    #[serde(rename = "0")]
    Disponivel,
    #[sea_orm(string_value = "1")]
    #[serde(rename = "1")]
    Adotado,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "pets")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nome: String,
    pub especie: String,
    pub raca: Option<String>,
    pub idade: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub descricao: Option<String>,
    pub status: PetStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::adocao::Entity")]
    Adocao,
}

impl Related<super::adocao::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Adocao.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
