pub use sea_orm_migration::prelude::*;

mod m20241017_000001_create_movies;
mod m20241017_000002_create_reviews;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241017_000001_create_movies::Migration),
            Box::new(m20241017_000002_create_reviews::Migration),
        ]
    }
}
