use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ids are chosen by the caller, so the key is a plain integer
        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(big_integer(Movie::Id).primary_key())
                    .col(string_len(Movie::Name, 30).unique_key())
                    .col(big_integer(Movie::ImdbRating))
                    .col(string_len(Movie::Genre, 30))
                    .col(string_len(Movie::Actors, 150))
                    .col(string_len(Movie::Director, 100))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movie::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Id,
    Name,
    ImdbRating,
    Genre,
    Actors,
    Director,
}
