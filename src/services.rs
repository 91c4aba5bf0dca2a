use jiff::Timestamp;
use tracing::debug;

use crate::{
    models::{Movie, NewMovie, NewReview, Review},
    repository::{MovieRepository, ReviewRepository, StoreResult},
};

#[derive(Clone)]
pub struct MovieService {
    repository: MovieRepository,
}

impl MovieService {
    pub fn new(repository: MovieRepository) -> Self {
        Self { repository }
    }

    pub async fn find_all_movies(&self) -> StoreResult<Vec<Movie>> {
        let movies = self.repository.find_all().await?;
        debug!(count = movies.len(), "loaded movies");
        Ok(movies)
    }

    /// Absence is a normal outcome, not an error.
    pub async fn find_movie_by_imdb_id(&self, imdb_id: &str) -> StoreResult<Option<Movie>> {
        let movie = self.repository.find_by_imdb_id(imdb_id).await?;
        debug!(imdb_id = %imdb_id, found = movie.is_some(), "looked up movie");
        Ok(movie)
    }

    /// Always inserts; equal payloads produce separate records.
    pub async fn save_movie(&self, movie: NewMovie) -> StoreResult<Movie> {
        let saved = self.repository.insert(movie).await?;
        debug!(id = saved.id, imdb_id = %saved.imdb_id, "saved movie");
        Ok(saved)
    }
}

#[derive(Clone)]
pub struct ReviewService {
    repository: ReviewRepository,
}

impl ReviewService {
    pub fn new(repository: ReviewRepository) -> Self {
        Self { repository }
    }

    /// Stores a review against `imdb_id`. The movie is not required to exist.
    pub async fn create_review(&self, body: String, imdb_id: String) -> StoreResult<Review> {
        let now = Timestamp::now();
        let review = self
            .repository
            .insert(NewReview { imdb_id, body, created_at: now, updated_at: now })
            .await?;
        debug!(id = review.id, "created review");
        Ok(review)
    }
}
