use std::io;
use std::sync::Arc;

use actix_web::HttpServer;
use taskboard::config::{Config, StorageKind};
use taskboard::store::{MemoryStore, PgStore, Store};
use taskboard::{build_app, AppState};

fn to_io_error<E: std::fmt::Display>(context: &str, error: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, error))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| to_io_error("Invalid configuration", e))?;

    let (store, pg): (Arc<dyn Store>, Option<PgStore>) = match config.storage {
        StorageKind::Postgres => {
            let url = config.database_url.as_deref().unwrap_or_default();
            let pg = PgStore::connect(url, config.database_max_connections)
                .await
                .map_err(|e| to_io_error("Failed to connect to database", e))?;
            (Arc::new(pg.clone()), Some(pg))
        }
        StorageKind::Memory => {
            log::warn!("Using in-memory storage; data is lost on shutdown");
            (Arc::new(MemoryStore::new()), None)
        }
    };

    let state = AppState::from_config(store, &config)
        .map_err(|e| to_io_error("Failed to initialise services", e))?;

    log::info!("Starting taskboard server at {}", config.server_url());
    HttpServer::new(move || build_app(state.clone()))
        .bind((config.server_host.as_str(), config.server_port))?
        .run()
        .await?;

    if let Some(pg) = pg {
        pg.close().await;
        log::info!("Database pool closed");
    }
    Ok(())
}
