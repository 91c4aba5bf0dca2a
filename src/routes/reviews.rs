use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};

use crate::{
    AppState,
    error::AppResult,
    models::{Review, ReviewRequest},
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/v1/reviews", post(create_review))
}

pub async fn create_review(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<Json<Review>> {
    let review = state.reviews.create_review(req.review_body, req.imdb_id).await?;
    Ok(Json(review))
}
