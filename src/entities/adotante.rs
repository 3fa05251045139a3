use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "adotantes")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nome: String,
    pub email: String,
    pub telefone: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub endereco: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::adocao::Entity")]
    Adocao,
}

impl Related<super::adocao::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Adocao.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
