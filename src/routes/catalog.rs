// src/routes/catalog.rs

use axum::{extract::{Path, State}, Json};
use uuid::Uuid;

use crate::{AppState, models::{ApiResponse, Client, Service, Technician}};

pub async fn list_services(State(state): State<AppState>) -> Json<ApiResponse<Vec<Service>>> {
    let res = state.catalog.get(state.store.as_ref()).await.map(|c| c.services.clone());
    Json(res.into())
}

pub async fn list_technicians(State(state): State<AppState>) -> Json<ApiResponse<Vec<Technician>>> {
    let res = state.catalog.get(state.store.as_ref()).await.map(|c| c.technicians.clone());
    Json(res.into())
}

pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Json<ApiResponse<Client>> {
    Json(state.store.get_client(id).await.into())
}
