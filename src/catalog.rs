// src/catalog.rs
//
// Services and technicians are read once and then shared read-only.

use std::collections::HashSet;

use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::models::{Service, Technician};
use crate::store::{BookingStore, StoreError};

#[derive(Debug, Clone)]
pub struct Catalog {
    pub services: Vec<Service>,
    pub technicians: Vec<Technician>,
}

impl Catalog {
    pub async fn load(store: &dyn BookingStore) -> Result<Self, StoreError> {
        let (services, technicians) =
            tokio::try_join!(store.list_services(), store.list_technicians())?;
        tracing::info!(
            services = services.len(),
            technicians = technicians.len(),
            "catalog loaded"
        );
        Ok(Self { services, technicians })
    }

    /// Technicians for `ids`, in the order given. Unknown and repeated ids are skipped.
    pub fn technicians_by_id(&self, ids: &[Uuid]) -> Vec<Technician> {
        let mut seen = HashSet::new();
        ids.iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| {
                let found = self.technicians.iter().find(|t| t.id == *id);
                if found.is_none() {
                    tracing::warn!(%id, "unknown technician in selection");
                }
                found.cloned()
            })
            .collect()
    }
}

/// Loads the catalog on first use. A failed load is retried by the next caller.
#[derive(Default)]
pub struct CatalogCell {
    cell: OnceCell<Catalog>,
}

impl CatalogCell {
    pub async fn get(&self, store: &dyn BookingStore) -> Result<&Catalog, StoreError> {
        self.cell.get_or_try_init(|| Catalog::load(store)).await
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}
