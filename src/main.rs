use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod rooms;
mod web;

use config::{AppConfig, StorageConfig};
use rooms::{InMemoryRoomRepository, RoomRepository, SqliteRoomRepository};
use web::controller::RoomController;
use web::render::Views;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let config = AppConfig::from_env()?;

  let repository: Arc<dyn RoomRepository> = match &config.storage {
    StorageConfig::Memory => {
      tracing::warn!("using in-memory room storage; rooms are lost on restart");
      Arc::new(InMemoryRoomRepository::new())
    }
    StorageConfig::Sqlite { database_url } => {
      tracing::info!("using sqlite room storage at {database_url}");
      Arc::new(SqliteRoomRepository::connect(database_url).await?)
    }
  };

  let controller = RoomController::builder().repository(repository).build()?;
  let views = Views::new()?;
  let app = web::router(Arc::new(controller), Arc::new(views));

  let address = format!("0.0.0.0:{}", config.port);
  tracing::info!("listening on {address}");

  let listener = tokio::net::TcpListener::bind(&address).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
