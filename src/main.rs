use std::{sync::Arc, time::Duration};

use reelgrade::{AppState, app, config::Config, db, store::MovieStore, tmdb::TmdbClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,reelgrade=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let http = reqwest::Client::builder()
        .user_agent("reelgrade/0.1")
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let store = MovieStore::new(db);

    let tmdb = TmdbClient::new(
        http,
        config.tmdb_api_key.clone(),
        config.tmdb_base_url.clone(),
        config.tmdb_rps,
    );

    let state = Arc::new(AppState { config: config.clone(), store, tmdb: Arc::new(tmdb) });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
