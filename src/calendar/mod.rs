// src/calendar/mod.rs

use futures::future::join_all;

use crate::bookings::{fetch_bookings, FetchRequest};
use crate::models::{BookingView, Service};
use crate::store::BookingStore;

pub mod session;
pub mod widget;

pub use session::{CalendarSession, CalendarSnapshot, RefreshTicket, Viewport};
pub use widget::CalendarOptions;

/// Fetches the ticket's window for every selected technician concurrently.
///
/// Events come back grouped by technician in selection order. If any single
/// fetch fails the whole refresh fails, with one message per failed technician.
pub async fn load_events(
    store: &dyn BookingStore,
    services: &[Service],
    ticket: &RefreshTicket,
) -> Result<Vec<BookingView>, String> {
    let fetches = ticket.technicians.iter().map(|t| {
        fetch_bookings(store, FetchRequest {
            technician_id: Some(t.id),
            technician_name: &t.name,
            color: t.color.as_deref(),
            services,
            from: Some(ticket.from),
            to: Some(ticket.to),
        })
    });
    let results = join_all(fetches).await;

    let mut events = Vec::new();
    let mut errors = Vec::new();
    for (tech, res) in ticket.technicians.iter().zip(results) {
        match res {
            Ok(mut rows) => events.append(&mut rows),
            Err(e) => errors.push(format!("{}: {e}", tech.name)),
        }
    }

    if errors.is_empty() {
        tracing::debug!(generation = ticket.generation, events = events.len(), "calendar window loaded");
        Ok(events)
    } else {
        Err(errors.join("; "))
    }
}
