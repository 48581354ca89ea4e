mod config;
mod error;

pub use config::{Config, ConfigError};
pub use error::{ApiError, ErrorBody};

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use dish_search::{DbCatalog, RankedResult, Ranker};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
pub struct AppState {
    ranker: Arc<Ranker<DbCatalog>>,
}

impl AppState {
    pub fn new(ranker: Ranker<DbCatalog>) -> Self {
        Self {
            ranker: Arc::new(ranker),
        }
    }
}

/// Raw `/search/dishes` query string; validation happens in the core.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub name: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub restaurants: Vec<RankedResult>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/search/dishes", get(search_dishes))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "Restaurant Dish Search API is running",
        "healthCheck": "/health",
        "searchSample": "/search/dishes?name=biryani&minPrice=150&maxPrice=300",
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

async fn search_dishes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let restaurants = state
        .ranker
        .search(
            params.name.as_deref(),
            params.min_price.as_deref(),
            params.max_price.as_deref(),
        )
        .await?;

    Ok(Json(SearchResponse { restaurants }))
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}

/// Open the pool and bring the schema up to date.
pub async fn connect(config: &Config) -> Result<DatabaseConnection, sea_orm::DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(false);
    if config.database_url.starts_with("sqlite::memory:") {
        // each pooled connection would otherwise open its own empty database
        options.max_connections(1);
    }

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;

    if config.seed_demo_data {
        migration::seed_catalog(&db).await?;
    }

    Ok(db)
}

#[tokio::main]
async fn start() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sea_orm=warn,sqlx=warn")),
        )
        .init();

    let config = Config::from_env()?;
    let db = connect(&config).await?;
    let ranker = Ranker::new(DbCatalog::new(db)).with_top_n(config.top_n);

    let listener = tokio::net::TcpListener::bind(config.server_url()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    tracing::info!("routes: /health, /search/dishes");

    axum::serve(listener, router(AppState::new(ranker))).await?;

    Ok(())
}

pub fn main() {
    let result = start();

    if let Some(err) = result.err() {
        tracing::error!("{err:#}");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
