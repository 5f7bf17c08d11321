use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod db;
mod error;
mod pricing;
mod routes;
mod state;

#[cfg(test)]
mod integration_tests;

use state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting DairyDesk backend...");

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://dairydesk.db".to_string());

    let pool = match db::init_pool(&database_url).await {
        Ok(pool) => {
            tracing::info!("Database connection established");
            if let Err(e) = db::init_database(&pool).await {
                tracing::error!("Failed to run migrations: {}", e);
                return;
            }
            pool
        }
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            return;
        }
    };

    let app_state = AppState::new(pool);

    let app = routes::create_router()
        .route("/", axum::routing::get(root))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state);

    let addr_str = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8517".to_string());
    let addr = addr_str.parse::<SocketAddr>().expect("Invalid BIND_ADDR");

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn root() -> &'static str {
    "DairyDesk backend is running"
}
