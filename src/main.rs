// src/main.rs

use std::sync::Arc;

use chrono::Utc;
use chrono_tz::Tz;
use tokio::{net::TcpListener, sync::Mutex};
use tracing_subscriber::EnvFilter;

use crate::{
    calendar::CalendarSession,
    catalog::CatalogCell,
    config::{Config, StoreBackend},
    store::{BookingStore, PgStore, RestStore},
};

mod bookings;
mod calendar;
mod catalog;
mod config;
mod db;
#[cfg(test)]
mod fixtures;
mod models;
mod routes;
mod stats;
mod store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    pub catalog: Arc<CatalogCell>,
    pub session: Arc<Mutex<CalendarSession>>,
    /// Zone used to split bookings into calendar days.
    pub time_zone: Tz,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn BookingStore> = match &config.store {
        StoreBackend::Postgres { database_url, max_connections } => {
            let pool = db::connect(database_url, *max_connections).await?;
            Arc::new(PgStore::new(pool))
        }
        StoreBackend::Rest { base_url, api_key, timeout } => {
            tracing::info!(%base_url, "using REST store");
            Arc::new(RestStore::new(base_url.clone(), api_key.clone(), *timeout)?)
        }
    };

    let state = AppState {
        store,
        catalog: Arc::new(CatalogCell::default()),
        session: Arc::new(Mutex::new(CalendarSession::new(Utc::now()))),
        time_zone: config.time_zone,
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, time_zone = %config.time_zone, "API listening");

    axum::serve(listener, routes::router(state).into_make_service()).await?;
    Ok(())
}
