use sea_orm::{FromJsonQueryResult, entity::prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub imdb_id: String,
    pub title: String,
    pub release_date: String,
    pub trailer_link: String,
    pub poster: String,
    #[sea_orm(column_type = "Json")]
    pub backdrops: StringList,
    #[sea_orm(column_type = "Json")]
    pub genres: StringList,
}

/// Ordered list of strings stored as a JSON array column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
