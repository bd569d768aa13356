use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    response::{Html, Redirect},
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{AddMovieForm, SearchParams},
    store::NewMovie,
    templates,
};

pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let movies = state.store.list_all().await?;
    Ok(Html(templates::index_page(&movies)))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> AppResult<Html<String>> {
    let query = params.query.trim();
    let movies = state.tmdb.search(query).await?;
    Ok(Html(templates::search_page(query, &movies)))
}

pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddMovieForm>,
) -> AppResult<Redirect> {
    if !(1..=5).contains(&form.rating) {
        return Err(AppError::InvalidRating);
    }

    // Empty optional form fields arrive as "" rather than absent.
    state
        .store
        .add(NewMovie {
            id: form.movie_id,
            title: form.title,
            year: form.year.filter(|s| !s.is_empty()),
            poster_path: form.poster_path.filter(|s| !s.is_empty()),
            rating: form.rating,
        })
        .await?;

    Ok(Redirect::to("/"))
}
