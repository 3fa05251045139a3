use sea_orm_migration::prelude::*;

mod m20240601_000001_create_pets_and_adotantes;
mod m20240601_000002_create_adocoes;
mod m20240601_000003_create_usuarios;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_pets_and_adotantes::Migration),
            Box::new(m20240601_000002_create_adocoes::Migration),
            Box::new(m20240601_000003_create_usuarios::Migration),
        ]
    }
}
