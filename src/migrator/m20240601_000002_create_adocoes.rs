use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Adocoes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Adocoes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Adocoes::AdotanteId).integer().not_null())
                    // A pet can be adopted once; concurrent inserts fail here.
                    .col(
                        ColumnDef::new(Adocoes::PetId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Adocoes::DataAdocao)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_adocoes_adotante")
                            .from(Adocoes::Table, Adocoes::AdotanteId)
                            .to(Adotantes::Table, Adotantes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_adocoes_pet")
                            .from(Adocoes::Table, Adocoes::PetId)
                            .to(Pets::Table, Pets::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_adocoes_adotante_id")
                    .table(Adocoes::Table)
                    .col(Adocoes::AdotanteId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Adocoes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Adocoes {
    Table,
    Id,
    AdotanteId,
    PetId,
    DataAdocao,
}

#[derive(DeriveIden)]
enum Adotantes {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Pets {
    Table,
    Id,
}
