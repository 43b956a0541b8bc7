// src/store/mod.rs
//
// Read access to the hosted booking data. Every backend answers the same four
// queries; callers never see which one is wired in.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Booking, BookingQuery, Client, Service, Technician};

#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod rest;

pub use postgres::PgStore;
pub use rest::RestStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store accepted the request and reported an error.
    #[error("{0}")]
    Query(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected payload: {0}")]
    Decode(String),
    #[error("{0} not found")]
    NotFound(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound("row".into()),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::Decode(e.to_string())
            }
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Transport(e.to_string())
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            StoreError::Decode(e.to_string())
        } else {
            StoreError::Transport(e.to_string())
        }
    }
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Active services only.
    async fn list_services(&self) -> Result<Vec<Service>, StoreError>;

    /// Active technicians only.
    async fn list_technicians(&self) -> Result<Vec<Technician>, StoreError>;

    async fn get_client(&self, id: Uuid) -> Result<Client, StoreError>;

    /// Bookings matching `query`, ascending by datetime, client columns joined.
    async fn list_bookings(&self, query: &BookingQuery) -> Result<Vec<Booking>, StoreError>;
}
