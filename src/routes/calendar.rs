// src/routes/calendar.rs

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    AppState,
    calendar::{load_events, CalendarOptions, CalendarSnapshot, RefreshTicket, Viewport},
    models::{ApiResponse, Service},
    stats::TechnicianStats,
};

#[derive(Deserialize)]
pub struct SelectionBody {
    pub technician_ids: Vec<Uuid>,
}

// Fetch without holding the session lock, then apply if still current.
// Runs detached so the refresh settles even if the caller goes away.
async fn finish_refresh(
    state: &AppState,
    services: Vec<Service>,
    ticket: RefreshTicket,
) -> Result<CalendarSnapshot, String> {
    let task_state = state.clone();
    let task_ticket = ticket.clone();
    let task = tokio::spawn(async move {
        let outcome = load_events(task_state.store.as_ref(), &services, &task_ticket).await;
        let mut session = task_state.session.lock().await;
        session.complete_refresh(&task_ticket, outcome);
        session.snapshot()
    });

    match task.await {
        Ok(snapshot) => Ok(snapshot),
        Err(e) => {
            let error = format!("refresh task failed: {e}");
            state.session.lock().await.complete_refresh(&ticket, Err(error.clone()));
            Err(error)
        }
    }
}

/// GET /api/v1/calendar/options
pub async fn get_options(State(state): State<AppState>) -> Json<CalendarOptions> {
    let view = state.session.lock().await.viewport().view_type;
    Json(CalendarOptions::new(view))
}

/// PUT /api/v1/calendar/selection
pub async fn put_selection(
    State(state): State<AppState>,
    Json(b): Json<SelectionBody>,
) -> Json<ApiResponse<CalendarSnapshot>> {
    let catalog = match state.catalog.get(state.store.as_ref()).await {
        Ok(c) => c,
        Err(e) => return Json(ApiResponse::failed(e.to_string())),
    };
    let technicians = catalog.technicians_by_id(&b.technician_ids);
    let services = catalog.services.clone();
    let ticket = state.session.lock().await.select_technicians(technicians);
    Json(finish_refresh(&state, services, ticket).await.into())
}

/// PUT /api/v1/calendar/dates — the widget's `datesSet` callback.
pub async fn put_dates(
    State(state): State<AppState>,
    Json(viewport): Json<Viewport>,
) -> Json<ApiResponse<CalendarSnapshot>> {
    let catalog = match state.catalog.get(state.store.as_ref()).await {
        Ok(c) => c,
        Err(e) => return Json(ApiResponse::failed(e.to_string())),
    };
    let services = catalog.services.clone();
    let ticket = state.session.lock().await.set_dates(viewport);
    Json(finish_refresh(&state, services, ticket).await.into())
}

/// GET /api/v1/calendar/events
pub async fn get_events(State(state): State<AppState>) -> Json<CalendarSnapshot> {
    Json(state.session.lock().await.snapshot())
}

/// GET /api/v1/calendar/statistics
pub async fn get_statistics(State(state): State<AppState>) -> Json<Vec<TechnicianStats>> {
    Json(state.session.lock().await.statistics(state.time_zone))
}
