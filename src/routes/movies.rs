use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    AppState,
    error::AppResult,
    models::{Movie, NewMovie},
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/movies", get(get_movies).post(create_movie))
        .route("/api/v1/movies/{imdb_id}", get(get_single_movie))
}

pub async fn get_movies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Movie>>> {
    Ok(Json(state.movies.find_all_movies().await?))
}

/// A miss is still 200, with a JSON `null` body.
pub async fn get_single_movie(
    State(state): State<Arc<AppState>>,
    Path(imdb_id): Path<String>,
) -> AppResult<Json<Option<Movie>>> {
    Ok(Json(state.movies.find_movie_by_imdb_id(&imdb_id).await?))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(movie): Json<NewMovie>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let created = state.movies.save_movie(movie).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
