use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::tmdb::TmdbError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Rating must be between 1 and 5")]
    InvalidRating,
    #[error("that movie is already in your list")]
    DuplicateMovie,
    #[error(transparent)]
    Tmdb(#[from] TmdbError),
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRating => StatusCode::BAD_REQUEST,
            AppError::DuplicateMovie => StatusCode::CONFLICT,
            AppError::Tmdb(err) => err.status(),
            AppError::Db(_) | AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = crate::templates::error_page(self.to_string());
        (self.status(), Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
