use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::{
    entities::{movie, review},
    models::{Movie, NewMovie, NewReview, Review},
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
    #[error("invalid stored timestamp: {0}")]
    Timestamp(#[from] jiff::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Bind variables per review lookup, well under SQLite's limit.
const REVIEW_LOOKUP_CHUNK: usize = 500;

#[derive(Clone)]
pub struct MovieRepository {
    db: DatabaseConnection,
}

impl MovieRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> StoreResult<Vec<Movie>> {
        let rows = movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?;
        self.with_reviews(rows).await
    }

    /// Earliest inserted movie carrying `imdb_id`, if any.
    pub async fn find_by_imdb_id(&self, imdb_id: &str) -> StoreResult<Option<Movie>> {
        let Some(row) = movie::Entity::find()
            .filter(movie::Column::ImdbId.eq(imdb_id))
            .order_by_asc(movie::Column::Id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(self.with_reviews(vec![row]).await?.pop())
    }

    pub async fn insert(&self, movie: NewMovie) -> StoreResult<Movie> {
        let model = movie::ActiveModel {
            id: NotSet,
            imdb_id: Set(movie.imdb_id),
            title: Set(movie.title),
            release_date: Set(movie.release_date),
            trailer_link: Set(movie.trailer_link),
            poster: Set(movie.poster),
            backdrops: Set(movie::StringList(movie.backdrops)),
            genres: Set(movie::StringList(movie.genres)),
        }
        .insert(&self.db)
        .await?;

        Ok(self.with_reviews(vec![model]).await?.remove(0))
    }

    async fn with_reviews(&self, rows: Vec<movie::Model>) -> StoreResult<Vec<Movie>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut imdb_ids: Vec<String> = rows.iter().map(|m| m.imdb_id.clone()).collect();
        imdb_ids.sort();
        imdb_ids.dedup();

        let mut by_movie: HashMap<String, Vec<Review>> = HashMap::new();
        for chunk in imdb_ids.chunks(REVIEW_LOOKUP_CHUNK) {
            let reviews = review::Entity::find()
                .filter(review::Column::ImdbId.is_in(chunk.iter().cloned()))
                .order_by_asc(review::Column::Id)
                .all(&self.db)
                .await?;

            // chunks partition imdb_ids, so each movie's reviews come from one query
            for row in reviews {
                let imdb_id = row.imdb_id.clone();
                by_movie.entry(imdb_id).or_default().push(Review::try_from(row)?);
            }
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let reviews = by_movie.get(&row.imdb_id).cloned().unwrap_or_default();
                Movie::from_model(row, reviews)
            })
            .collect())
    }
}

#[derive(Clone)]
pub struct ReviewRepository {
    db: DatabaseConnection,
}

impl ReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, review: NewReview) -> StoreResult<Review> {
        let model = review::ActiveModel {
            id: NotSet,
            imdb_id: Set(review.imdb_id),
            body: Set(review.body),
            created_at: Set(review.created_at.as_millisecond()),
            updated_at: Set(review.updated_at.as_millisecond()),
        }
        .insert(&self.db)
        .await?;

        Ok(Review::try_from(model)?)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use sea_orm::ConnectionTrait;

    use super::*;
    use crate::db::connect_in_memory;

    fn sample(imdb_id: &str, title: &str) -> NewMovie {
        NewMovie {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            release_date: "2021-01-01".to_string(),
            trailer_link: "https://trailerlink1.com".to_string(),
            poster: "https://poster1.com".to_string(),
            backdrops: vec!["backdrop1.jpg".to_string(), "backdrop2.jpg".to_string()],
            genres: vec!["Action".to_string(), "Adventure".to_string()],
        }
    }

    fn review_for(imdb_id: &str, body: &str) -> NewReview {
        let now = Timestamp::now();
        NewReview {
            imdb_id: imdb_id.to_string(),
            body: body.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn insert_assigns_key_and_keeps_fields() {
        let db = connect_in_memory().await.unwrap();
        let repo = MovieRepository::new(db);

        let saved = repo.insert(sample("tt123456", "Movie One")).await.unwrap();

        assert!(saved.id > 0);
        assert_eq!(saved.imdb_id, "tt123456");
        assert_eq!(saved.title, "Movie One");
        assert_eq!(saved.backdrops, vec!["backdrop1.jpg", "backdrop2.jpg"]);
        assert_eq!(saved.genres, vec!["Action", "Adventure"]);
        assert!(saved.reviews.is_empty());
    }

    #[tokio::test]
    async fn find_all_returns_every_inserted_movie() {
        let db = connect_in_memory().await.unwrap();
        let repo = MovieRepository::new(db);

        assert!(repo.find_all().await.unwrap().is_empty());

        let first = repo.insert(sample("tt123456", "Movie One")).await.unwrap();
        let second = repo.insert(sample("tt654321", "Movie Two")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn find_by_imdb_id_present_and_absent() {
        let db = connect_in_memory().await.unwrap();
        let repo = MovieRepository::new(db);
        let saved = repo.insert(sample("tt123456", "Movie One")).await.unwrap();

        assert_eq!(repo.find_by_imdb_id("tt123456").await.unwrap(), Some(saved));
        assert_eq!(repo.find_by_imdb_id("nonexistent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_imdb_id_yields_distinct_records() {
        let db = connect_in_memory().await.unwrap();
        let repo = MovieRepository::new(db);

        let a = repo.insert(sample("tt123456", "Movie One")).await.unwrap();
        let b = repo.insert(sample("tt123456", "Movie One")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
        assert_eq!(repo.find_by_imdb_id("tt123456").await.unwrap().map(|m| m.id), Some(a.id));
    }

    #[tokio::test]
    async fn reviews_attach_by_imdb_id_in_creation_order() {
        let db = connect_in_memory().await.unwrap();
        let movies = MovieRepository::new(db.clone());
        let reviews = ReviewRepository::new(db);

        movies.insert(sample("tt123456", "Movie One")).await.unwrap();
        movies.insert(sample("tt654321", "Movie Two")).await.unwrap();

        let first = reviews.insert(review_for("tt123456", "Great movie!")).await.unwrap();
        let second = reviews.insert(review_for("tt123456", "Loved it")).await.unwrap();

        let one = movies.find_by_imdb_id("tt123456").await.unwrap().unwrap();
        assert_eq!(one.reviews, vec![first, second]);

        let two = movies.find_by_imdb_id("tt654321").await.unwrap().unwrap();
        assert!(two.reviews.is_empty());
    }

    #[tokio::test]
    async fn orphan_review_attaches_once_movie_exists() {
        let db = connect_in_memory().await.unwrap();
        let movies = MovieRepository::new(db.clone());
        let reviews = ReviewRepository::new(db);

        let orphan = reviews.insert(review_for("tt999999", "Early review")).await.unwrap();
        let saved = movies.insert(sample("tt999999", "Late Movie")).await.unwrap();

        assert_eq!(saved.reviews, vec![orphan]);
    }

    #[tokio::test]
    async fn find_all_handles_more_movies_than_sqlite_bind_limit() {
        let db = connect_in_memory().await.unwrap();
        let movies = MovieRepository::new(db.clone());
        let reviews = ReviewRepository::new(db.clone());

        db.execute_unprepared(
            "WITH RECURSIVE seq(n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < 40000) \
             INSERT INTO movies (imdb_id, title, release_date, trailer_link, poster, backdrops, genres) \
             SELECT 'tt' || n, 'Movie ' || n, '', '', '', '[]', '[]' FROM seq",
        )
        .await
        .unwrap();

        let early = reviews.insert(review_for("tt1", "First!")).await.unwrap();
        let late = reviews.insert(review_for("tt39999", "Last one")).await.unwrap();

        let all = movies.find_all().await.unwrap();
        assert_eq!(all.len(), 40000);
        assert_eq!(all[0].imdb_id, "tt1");
        assert_eq!(all[0].reviews, vec![early]);
        assert_eq!(all[39998].imdb_id, "tt39999");
        assert_eq!(all[39998].reviews, vec![late]);
        assert_eq!(all.iter().map(|m| m.reviews.len()).sum::<usize>(), 2);
    }

    #[tokio::test]
    async fn review_timestamps_survive_storage_at_millisecond_precision() {
        let db = connect_in_memory().await.unwrap();
        let reviews = ReviewRepository::new(db);

        let input = review_for("tt123456", "Great movie!");
        let saved = reviews.insert(input.clone()).await.unwrap();

        assert_eq!(saved.body, "Great movie!");
        assert_eq!(saved.created_at.as_millisecond(), input.created_at.as_millisecond());
        assert_eq!(saved.created_at, saved.updated_at);
    }
}
