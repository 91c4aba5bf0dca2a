use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::entities::{movie, review};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i32,
    pub imdb_id: String,
    pub title: String,
    pub release_date: String,
    pub trailer_link: String,
    pub poster: String,
    pub backdrops: Vec<String>,
    pub genres: Vec<String>,
    pub reviews: Vec<Review>,
}

impl Movie {
    pub fn from_model(model: movie::Model, reviews: Vec<Review>) -> Self {
        Self {
            id: model.id,
            imdb_id: model.imdb_id,
            title: model.title,
            release_date: model.release_date,
            trailer_link: model.trailer_link,
            poster: model.poster,
            backdrops: model.backdrops.0,
            genres: model.genres.0,
            reviews,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i32,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<review::Model> for Review {
    type Error = jiff::Error;

    fn try_from(model: review::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            body: model.body,
            created_at: Timestamp::from_millisecond(model.created_at)?,
            updated_at: Timestamp::from_millisecond(model.updated_at)?,
        })
    }
}

/// Movie payload accepted on create. Missing fields default to empty values;
/// `id` and `reviews` are not part of it, so client-sent ones are dropped.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewMovie {
    pub imdb_id: String,
    pub title: String,
    pub release_date: String,
    pub trailer_link: String,
    pub poster: String,
    pub backdrops: Vec<String>,
    pub genres: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct NewReview {
    pub imdb_id: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub review_body: String,
    pub imdb_id: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
