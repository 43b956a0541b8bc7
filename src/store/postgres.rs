// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{query_as, Pool, Postgres};
use uuid::Uuid;

use super::{BookingStore, StoreError};
use crate::models::{Booking, BookingQuery, Client, Service, Technician};

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn list_services(&self) -> Result<Vec<Service>, StoreError> {
        let rows = query_as::<_, Service>(
            r#"SELECT id, name, price::float8 AS price, duration::int4 AS duration, active
               FROM public.services WHERE active = TRUE"#)
            .fetch_all(&self.pool).await?;
        tracing::debug!(rows = rows.len(), "services fetched");
        Ok(rows)
    }

    async fn list_technicians(&self) -> Result<Vec<Technician>, StoreError> {
        let rows = query_as::<_, Technician>(
            r#"SELECT id, name, email, role, active, color
               FROM public.technicians WHERE active = TRUE"#)
            .fetch_all(&self.pool).await?;
        tracing::debug!(rows = rows.len(), "technicians fetched");
        Ok(rows)
    }

    async fn get_client(&self, id: Uuid) -> Result<Client, StoreError> {
        query_as::<_, Client>(
            r#"SELECT id, name, email, phone FROM public.clients WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool).await?
            .ok_or_else(|| StoreError::NotFound(format!("client {id}")))
    }

    async fn list_bookings(&self, q: &BookingQuery) -> Result<Vec<Booking>, StoreError> {
        let rows = query_as::<_, Booking>(
            r#"
            SELECT b.id, b.technician_id, b.client_id, b.services,
                   b.duration::int4 AS duration, b.price::float8 AS price, b.datetime,
                   c.name AS client_name, c.phone AS client_phone, c.email AS client_email
              FROM public.bookings b
              LEFT JOIN public.clients c ON c.id = b.client_id
             WHERE ($1::timestamptz IS NULL OR b.datetime >= $1)
               AND ($2::timestamptz IS NULL OR b.datetime <= $2)
               AND ($3::uuid IS NULL OR b.technician_id = $3)
             ORDER BY b.datetime ASC
            "#
        )
        .bind(q.from)
        .bind(q.to)
        .bind(q.technician_id)
        .fetch_all(&self.pool)
        .await?;
        tracing::debug!(rows = rows.len(), technician_id = ?q.technician_id, "bookings fetched");
        Ok(rows)
    }
}
