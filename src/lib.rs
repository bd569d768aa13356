pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod templates;
pub mod tmdb;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, store::MovieStore, tmdb::TmdbClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: MovieStore,
    pub tmdb: Arc<TmdbClient>,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/search", get(routes::search))
        .route("/add-movie", post(routes::add_movie))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
