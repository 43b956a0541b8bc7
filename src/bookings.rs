// src/bookings.rs
//
// Booking fetch-and-reshape: one filtered read, then the client, technician
// and service names are joined into calendar view-models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Booking, BookingQuery, BookingView, Service};
use crate::store::{BookingStore, StoreError};

pub struct FetchRequest<'a> {
    /// `None` reads every technician's bookings.
    pub technician_id: Option<Uuid>,
    pub technician_name: &'a str,
    pub color: Option<&'a str>,
    pub services: &'a [Service],
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Names of the catalog services referenced by `ids`, in catalog order.
/// Ids missing from the catalog are dropped.
pub fn services_names(ids: &[Uuid], catalog: &[Service]) -> Vec<String> {
    catalog
        .iter()
        .filter(|s| ids.contains(&s.id))
        .map(|s| s.name.clone())
        .collect()
}

pub fn to_view(b: Booking, technician_name: &str, color: Option<&str>, catalog: &[Service]) -> BookingView {
    let services_names = services_names(&b.services, catalog);
    BookingView {
        id: b.id,
        technician_id: b.technician_id,
        client_id: b.client_id,
        services: b.services,
        duration: b.duration,
        price: b.price,
        datetime: b.datetime,
        client_name: b.client_name.unwrap_or_default(),
        client_phone: b.client_phone,
        client_email: b.client_email,
        technician_name: technician_name.to_string(),
        color: color.map(str::to_string),
        services_names,
    }
}

pub async fn fetch_bookings(
    store: &dyn BookingStore,
    req: FetchRequest<'_>,
) -> Result<Vec<BookingView>, StoreError> {
    let query = BookingQuery { from: req.from, to: req.to, technician_id: req.technician_id };
    let rows = store.list_bookings(&query).await.map_err(|e| {
        tracing::warn!(technician_id = ?req.technician_id, error = %e, "booking fetch failed");
        e
    })?;

    Ok(rows
        .into_iter()
        .map(|b| to_view(b, req.technician_name, req.color, req.services))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{at, booking, service};
    use crate::models::ApiResponse;
    use crate::store::memory::MemoryStore;

    fn catalog() -> Vec<Service> {
        vec![service(1, "Haircut"), service(2, "Massage"), service(3, "Nails")]
    }

    #[test]
    fn names_follow_catalog_order_and_drop_unknown_ids() {
        let ids = [Uuid::from_u128(3), Uuid::from_u128(99), Uuid::from_u128(1)];
        assert_eq!(services_names(&ids, &catalog()), vec!["Haircut", "Nails"]);
        assert!(services_names(&[], &catalog()).is_empty());
    }

    #[tokio::test]
    async fn unbounded_fetch_returns_all_of_one_technician_ascending() {
        let store = MemoryStore {
            bookings: vec![
                booking(10, 1, 100, &[2], at(2024, 6, 3, 9, 0)),
                booking(11, 2, 101, &[1], at(2024, 6, 1, 9, 0)),
                booking(12, 1, 102, &[1, 2], at(2023, 1, 1, 9, 0)),
                booking(13, 1, 100, &[], at(2025, 2, 1, 9, 0)),
            ],
            ..Default::default()
        };
        let services = catalog();

        let rows = fetch_bookings(&store, FetchRequest {
            technician_id: Some(Uuid::from_u128(1)),
            technician_name: "Xena",
            color: Some("#f00"),
            services: &services,
            from: None,
            to: None,
        })
        .await
        .unwrap();

        let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Uuid::from_u128(12), Uuid::from_u128(10), Uuid::from_u128(13)]);
        assert!(rows.iter().all(|r| r.technician_name == "Xena" && r.color.as_deref() == Some("#f00")));
        assert_eq!(rows[0].services_names, vec!["Haircut", "Massage"]);
        assert_eq!(rows[0].client_name, "Client 102");
    }

    #[tokio::test]
    async fn window_bounds_are_inclusive() {
        let store = MemoryStore {
            bookings: vec![
                booking(1, 1, 100, &[], at(2024, 6, 1, 0, 0)),
                booking(2, 1, 100, &[], at(2024, 6, 7, 23, 59)),
                booking(3, 1, 100, &[], at(2024, 6, 8, 0, 0)),
            ],
            ..Default::default()
        };

        let rows = fetch_bookings(&store, FetchRequest {
            technician_id: None,
            technician_name: "",
            color: None,
            services: &[],
            from: Some(at(2024, 6, 1, 0, 0)),
            to: Some(at(2024, 6, 7, 23, 59)),
        })
        .await
        .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn store_error_is_a_tagged_failure() {
        let store = MemoryStore { bookings: vec![booking(1, 1, 100, &[], at(2024, 6, 1, 0, 0))], ..Default::default() };
        store.fail_with("network error");

        let res = fetch_bookings(&store, FetchRequest {
            technician_id: None,
            technician_name: "",
            color: None,
            services: &[],
            from: None,
            to: None,
        })
        .await;
        let tagged: ApiResponse<Vec<BookingView>> = res.into();
        assert_eq!(tagged, ApiResponse::failed("network error"));
    }
}
