// src/routes/health.rs

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResp {
    pub status: &'static str,
    pub version: &'static str,
    pub catalog_loaded: bool,
    pub calendar_generation: u64,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResp> {
    let calendar_generation = state.session.lock().await.snapshot().generation;
    Json(HealthResp {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        catalog_loaded: state.catalog.is_loaded(),
        calendar_generation,
    })
}
