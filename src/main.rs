mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod services;
mod state;
mod utils;

use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::services::persistence::{DbStorage, MemoryStorage, Storage};
use crate::state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    let storage: Arc<dyn Storage> = match &config.database_url {
        Some(url) => {
            info!("Connecting to database...");
            let db = db::establish_connection(url).await.map_err(io::Error::other)?;
            info!("Database connected");
            Arc::new(DbStorage::new(db))
        }
        None => {
            warn!("DATABASE_URL not set, data will only live as long as the process");
            Arc::new(MemoryStorage::default())
        }
    };

    let bind = (config.host.clone(), config.port);
    let state = web::Data::new(AppState::build(config, storage).await.map_err(io::Error::other)?);

    info!("Starting server on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::configure_routes)
    })
        .bind(bind)?
        .run()
        .await
}
