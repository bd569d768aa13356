use serde::{Deserialize, Serialize};

/// A movie as shown to the user, with or without a rating.
///
/// Search results carry no rating; persisted entries always do.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: Option<String>,
    pub poster_path: Option<String>,
    pub rating: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct AddMovieForm {
    pub movie_id: i32,
    pub title: String,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    pub rating: i32,
}
