// src/routes/mod.rs

use axum::{routing::{get, put}, Router};
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};

use crate::AppState;

pub mod health;
pub mod catalog;
pub mod bookings;
pub mod calendar;

pub fn router(state: AppState) -> Router {
    // The admin page is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        // reference data
        .route("/api/v1/services", get(catalog::list_services))
        .route("/api/v1/technicians", get(catalog::list_technicians))
        .route("/api/v1/clients/:id", get(catalog::get_client))
        // bookings
        .route("/api/v1/bookings", get(bookings::list_bookings))
        // calendar session
        .route("/api/v1/calendar/options", get(calendar::get_options))
        .route("/api/v1/calendar/selection", put(calendar::put_selection))
        .route("/api/v1/calendar/dates", put(calendar::put_dates))
        .route("/api/v1/calendar/events", get(calendar::get_events))
        .route("/api/v1/calendar/statistics", get(calendar::get_statistics))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
