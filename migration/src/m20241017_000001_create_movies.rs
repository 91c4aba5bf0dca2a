use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(string(Movies::ImdbId))
                    .col(string(Movies::Title))
                    .col(string(Movies::ReleaseDate))
                    .col(string(Movies::TrailerLink))
                    .col(string(Movies::Poster))
                    .col(json(Movies::Backdrops))
                    .col(json(Movies::Genres))
                    .to_owned(),
            )
            .await?;

        // imdb_id is a lookup key, uniqueness is left to callers
        manager
            .create_index(
                Index::create()
                    .name("idx_movies_imdb_id")
                    .table(Movies::Table)
                    .col(Movies::ImdbId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    ImdbId,
    Title,
    ReleaseDate,
    TrailerLink,
    Poster,
    Backdrops,
    Genres,
}
