// src/routes/bookings.rs

use axum::{extract::{rejection::QueryRejection, Query, State}, Json};

use crate::{
    AppState,
    bookings::{fetch_bookings, FetchRequest},
    models::{ApiResponse, BookingQuery, BookingView},
};

/// GET /api/v1/bookings?from=&to=&technician_id=
pub async fn list_bookings(
    State(state): State<AppState>,
    q: Result<Query<BookingQuery>, QueryRejection>,
) -> Json<ApiResponse<Vec<BookingView>>> {
    let Query(q) = match q {
        Ok(q) => q,
        Err(rejection) => return Json(ApiResponse::failed(rejection.body_text())),
    };
    let catalog = match state.catalog.get(state.store.as_ref()).await {
        Ok(c) => c,
        Err(e) => return Json(ApiResponse::failed(e.to_string())),
    };

    let technician = q.technician_id
        .and_then(|id| catalog.technicians.iter().find(|t| t.id == id));

    let res = fetch_bookings(state.store.as_ref(), FetchRequest {
        technician_id: q.technician_id,
        technician_name: technician.map_or("", |t| t.name.as_str()),
        color: technician.and_then(|t| t.color.as_deref()),
        services: &catalog.services,
        from: q.from,
        to: q.to,
    })
    .await;
    Json(res.into())
}
