mod config;
mod db;
mod entities;
mod error;
mod models;
mod repository;
mod routes;
mod services;

use std::sync::Arc;

use sea_orm::{ConnectOptions, DatabaseConnection};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    repository::{MovieRepository, ReviewRepository},
    services::{MovieService, ReviewService},
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub movies: MovieService,
    pub reviews: ReviewService,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let movies = MovieService::new(MovieRepository::new(db.clone()));
        let reviews = ReviewService::new(ReviewRepository::new(db.clone()));
        Self { db, movies, reviews }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,moviereviews=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let mut options = ConnectOptions::new(config.database_url.clone());
    options.max_connections(config.db_max_connections).sqlx_logging(false);
    let db = db::connect_and_migrate(options).await?;

    let state = Arc::new(AppState::new(db));

    let app = routes::router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
