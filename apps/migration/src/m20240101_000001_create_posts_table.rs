use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Posts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Posts::Nome).string_len(50).not_null())
                    .col(ColumnDef::new(Posts::Imagem).string_len(100).null())
                    .col(ColumnDef::new(Posts::Cor).string_len(20).not_null())
                    .col(ColumnDef::new(Posts::Comentario).text().not_null())
                    .col(
                        ColumnDef::new(Posts::DataCriacao)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Posts::Liked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // Feed sort key
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_posts_data_criacao")
                    .table(Posts::Table)
                    .col(Posts::DataCriacao)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Nome,
    Imagem,
    Cor,
    Comentario,
    DataCriacao,
    Liked,
}
