use std::{sync::Arc, time::Duration};

use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
use axum_test::TestServer;
use serde_json::{Value, json};
use tempfile::TempDir;

use reelgrade::{
    AppState, app, config::Config, db, store::MovieStore, tmdb::TmdbClient,
};

async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn test_app(tmdb_base_url: &str) -> (TestServer, MovieStore, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let database_url = format!("sqlite://{}?mode=rwc", dir.path().join("movies.db").display());
    let db = db::connect_and_migrate(&database_url).await.unwrap();
    let store = MovieStore::new(db);

    let http = reqwest::Client::builder().timeout(Duration::from_secs(2)).build().unwrap();
    let tmdb = TmdbClient::new(http, "test-key".to_string(), tmdb_base_url.to_string(), 100);

    let config = Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        tmdb_api_key: "test-key".to_string(),
        tmdb_base_url: tmdb_base_url.to_string(),
        database_url,
        tmdb_rps: 100,
        http_timeout_secs: 2,
    };

    let state = Arc::new(AppState {
        config: Arc::new(config),
        store: store.clone(),
        tmdb: Arc::new(tmdb),
    });

    (TestServer::new(app(state)).unwrap(), store, dir)
}

fn add_form(movie_id: &str, title: &str, rating: &str) -> Vec<(&'static str, String)> {
    vec![
        ("movie_id", movie_id.to_string()),
        ("title", title.to_string()),
        ("year", "2024".to_string()),
        ("poster_path", "/new_poster.jpg".to_string()),
        ("rating", rating.to_string()),
    ]
}

#[tokio::test]
async fn home_shows_empty_list() {
    let (server, _store, _dir) = test_app("http://127.0.0.1:1").await;

    let resp = server.get("/").await;
    resp.assert_status_ok();
    assert!(resp.text().contains("Movie Ratings"));
    assert!(resp.text().contains("No movies rated yet."));
}

#[tokio::test]
async fn add_movie_redirects_and_persists() {
    let (server, store, _dir) = test_app("http://127.0.0.1:1").await;

    let resp = server.post("/add-movie").form(&add_form("123", "New Movie", "5")).await;
    resp.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(resp.header("location"), "/");

    let movies = store.list_all().await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].id, 123);
    assert_eq!(movies[0].title, "New Movie");
    assert_eq!(movies[0].year.as_deref(), Some("2024"));
    assert_eq!(movies[0].poster_path.as_deref(), Some("/new_poster.jpg"));
    assert_eq!(movies[0].rating, 5);

    let home = server.get("/").await;
    home.assert_status_ok();
    assert!(home.text().contains("New Movie"));
    assert!(home.text().contains("2024"));
}

#[tokio::test]
async fn add_movie_rejects_out_of_range_ratings() {
    let (server, store, _dir) = test_app("http://127.0.0.1:1").await;

    for rating in ["0", "6", "-1"] {
        let resp = server.post("/add-movie").form(&add_form("124", "Bad Rating", rating)).await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert!(resp.text().contains("Rating must be between 1 and 5"));
    }

    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn add_movie_rejects_duplicate_id() {
    let (server, store, _dir) = test_app("http://127.0.0.1:1").await;

    server
        .post("/add-movie")
        .form(&add_form("7", "First", "4"))
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let resp = server.post("/add-movie").form(&add_form("7", "Second", "2")).await;
    resp.assert_status(StatusCode::CONFLICT);

    let movies = store.list_all().await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "First");
    assert_eq!(movies[0].rating, 4);
}

#[tokio::test]
async fn search_maps_and_caps_results() {
    async fn results(Query(params): Query<Vec<(String, String)>>) -> Json<Value> {
        let get = |key: &str| {
            params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
        };
        assert_eq!(get("api_key"), Some("test-key"));
        assert_eq!(get("language"), Some("en-US"));
        assert_eq!(get("page"), Some("1"));
        assert_eq!(get("query"), Some("found"));

        let results: Vec<Value> = (0..20)
            .map(|i| {
                json!({
                    "id": 1000 + i,
                    "title": format!("Found Movie {i}"),
                    "release_date": "2019-07-04",
                    "poster_path": format!("/found{i}.jpg"),
                })
            })
            .collect();
        Json(json!({ "results": results }))
    }

    let base = spawn_upstream(Router::new().route("/search/movie", get(results))).await;
    let (server, _store, _dir) = test_app(&base).await;

    let resp = server.get("/search").add_query_param("query", "found").await;
    resp.assert_status_ok();

    let body = resp.text();
    assert_eq!(body.matches("name=\"movie_id\"").count(), 5);
    assert!(body.contains("Found Movie 0"));
    assert!(body.contains("Found Movie 4"));
    assert!(!body.contains("Found Movie 5"));
    assert!(body.contains("https://image.tmdb.org/t/p/w500/found0.jpg"));
    assert!(body.contains("(2019)"));
}

#[tokio::test]
async fn search_handles_missing_year_and_poster() {
    async fn results() -> Json<Value> {
        Json(json!({
            "results": [
                { "id": 1, "title": "Dated", "release_date": "1972-03-24", "poster_path": "/dated.jpg" },
                { "id": 2, "title": "Undated", "release_date": "", "poster_path": null },
            ]
        }))
    }

    let base = spawn_upstream(Router::new().route("/search/movie", get(results))).await;
    let (server, _store, _dir) = test_app(&base).await;

    let resp = server.get("/search").add_query_param("query", "any").await;
    resp.assert_status_ok();

    let body = resp.text();
    assert!(body.contains("(1972)"));
    assert!(body.contains("Undated"));
    assert!(!body.contains("w500null"));
}

#[tokio::test]
async fn search_with_zero_matches_is_a_success() {
    async fn results() -> Json<Value> {
        Json(json!({ "results": [] }))
    }

    let base = spawn_upstream(Router::new().route("/search/movie", get(results))).await;
    let (server, _store, _dir) = test_app(&base).await;

    let resp = server.get("/search").add_query_param("query", "nothing").await;
    resp.assert_status_ok();
    assert!(resp.text().contains("No results found."));
}

#[tokio::test]
async fn unreachable_catalog_yields_service_unavailable() {
    // Bind then drop so the port is known to refuse connections.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (server, _store, _dir) = test_app(&format!("http://{addr}")).await;

    let resp = server.get("/search").add_query_param("query", "fail").await;
    resp.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert!(resp.text().contains("try again later"));
}

#[tokio::test]
async fn upstream_failure_status_is_forwarded() {
    async fn unauthorized() -> (StatusCode, Json<Value>) {
        (StatusCode::UNAUTHORIZED, Json(json!({ "status_message": "Invalid API key" })))
    }

    let base = spawn_upstream(Router::new().route("/search/movie", get(unauthorized))).await;
    let (server, _store, _dir) = test_app(&base).await;

    let resp = server.get("/search").add_query_param("query", "apifail").await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_results_key_yields_server_error() {
    async fn no_results() -> Json<Value> {
        Json(json!({ "page": 1, "total_results": 0 }))
    }

    let base = spawn_upstream(Router::new().route("/search/movie", get(no_results))).await;
    let (server, _store, _dir) = test_app(&base).await;

    let resp = server.get("/search").add_query_param("query", "odd").await;
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}
