// src/store/memory.rs
//
// In-process store used by the tests. Applies the same filters and ordering
// as the real backends and can be switched into a failing mode.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::{BookingStore, StoreError};
use crate::models::{Booking, BookingQuery, Client, Service, Technician};

#[derive(Default)]
pub struct MemoryStore {
    pub services: Vec<Service>,
    pub technicians: Vec<Technician>,
    pub clients: Vec<Client>,
    pub bookings: Vec<Booking>,
    pub(crate) fail_with: Mutex<Option<String>>,
    pub(crate) failing_technicians: Mutex<Vec<Uuid>>,
}

impl MemoryStore {
    pub fn fail_with(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    /// Only booking reads for `id` fail.
    pub fn fail_technician(&self, id: Uuid) {
        self.failing_technicians.lock().unwrap().push(id);
    }

    fn check(&self) -> Result<(), StoreError> {
        match self.fail_with.lock().unwrap().clone() {
            Some(message) => Err(StoreError::Query(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn list_services(&self) -> Result<Vec<Service>, StoreError> {
        self.check()?;
        Ok(self.services.iter().filter(|s| s.active).cloned().collect())
    }

    async fn list_technicians(&self) -> Result<Vec<Technician>, StoreError> {
        self.check()?;
        Ok(self.technicians.iter().filter(|t| t.active).cloned().collect())
    }

    async fn get_client(&self, id: Uuid) -> Result<Client, StoreError> {
        self.check()?;
        self.clients
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("client {id}")))
    }

    async fn list_bookings(&self, q: &BookingQuery) -> Result<Vec<Booking>, StoreError> {
        self.check()?;
        if let Some(tech) = q.technician_id {
            if self.failing_technicians.lock().unwrap().contains(&tech) {
                return Err(StoreError::Query(format!("bookings unavailable for {tech}")));
            }
        }
        let mut rows: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| q.from.map_or(true, |from| b.datetime >= from))
            .filter(|b| q.to.map_or(true, |to| b.datetime <= to))
            .filter(|b| q.technician_id.map_or(true, |t| b.technician_id == t))
            .cloned()
            .collect();
        rows.sort_by_key(|b| b.datetime);
        Ok(rows)
    }
}
