use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create Pets Table
        manager
            .create_table(
                Table::create()
                    .table(Pets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pets::Nome).string().not_null())
                    .col(ColumnDef::new(Pets::Especie).string().not_null())
                    .col(ColumnDef::new(Pets::Raca).string())
                    .col(ColumnDef::new(Pets::Idade).integer())
                    .col(ColumnDef::new(Pets::Descricao).text())
                    .col(
                        ColumnDef::new(Pets::Status)
                            .string_len(1)
                            .not_null()
                            .default("0"),
                    )
                    .col(ColumnDef::new(Pets::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Pets::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create Adotantes Table
        manager
            .create_table(
                Table::create()
                    .table(Adotantes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Adotantes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Adotantes::Nome).string().not_null())
                    .col(ColumnDef::new(Adotantes::Email).string().not_null())
                    .col(ColumnDef::new(Adotantes::Telefone).string())
                    .col(ColumnDef::new(Adotantes::Endereco).text())
                    .col(ColumnDef::new(Adotantes::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Adotantes::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pets_status")
                    .table(Pets::Table)
                    .col(Pets::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Adotantes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Pets {
    Table,
    Id,
    Nome,
    Especie,
    Raca,
    Idade,
    Descricao,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Adotantes {
    Table,
    Id,
    Nome,
    Email,
    Telefone,
    Endereco,
    CreatedAt,
    UpdatedAt,
}
