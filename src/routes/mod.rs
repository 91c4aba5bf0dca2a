pub mod health;
pub mod movies;
pub mod reviews;

use std::sync::Arc;

use axum::Router;

use crate::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(movies::routes())
        .merge(reviews::routes())
        .with_state(state)
}
