// src/store/rest.rs
//
// PostgREST client for the hosted backend (`/rest/v1/<table>`).

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Deserialize};
use uuid::Uuid;

use super::{BookingStore, StoreError};
use crate::models::{Booking, BookingQuery, Client, Service, Technician};

#[derive(Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

// PostgREST error body, e.g. {"code":"42P01","message":"relation ... does not exist"}
#[derive(Deserialize)]
struct RestErrorBody {
    message: Option<String>,
}

#[derive(Deserialize)]
struct ClientColumns {
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
}

// `select=*,clients(name,phone,email)` nests the joined client under `clients`
#[derive(Deserialize)]
struct BookingRow {
    id: Uuid,
    technician_id: Uuid,
    client_id: Option<Uuid>,
    #[serde(default)]
    services: Vec<Uuid>,
    #[serde(default)]
    duration: i32,
    #[serde(default)]
    price: f64,
    datetime: DateTime<Utc>,
    clients: Option<ClientColumns>,
}

impl From<BookingRow> for Booking {
    fn from(r: BookingRow) -> Self {
        let (client_name, client_phone, client_email) = match r.clients {
            Some(c) => (c.name, c.phone, c.email),
            None => (None, None, None),
        };
        Booking {
            id: r.id,
            technician_id: r.technician_id,
            client_id: r.client_id,
            services: r.services,
            duration: r.duration,
            price: r.price,
            datetime: r.datetime,
            client_name,
            client_phone,
            client_email,
        }
    }
}

fn iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl RestStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport(format!("reqwest build error: {e}")))?;
        Ok(Self { client, base_url: base_url.into(), api_key: api_key.into() })
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let resp = self.client.get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(params)
            .send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<RestErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("{status}: {body}"));
            tracing::warn!(table, %status, %message, "store query failed");
            return Err(StoreError::Query(message));
        }

        let rows: Vec<T> = resp.json().await?;
        tracing::debug!(table, rows = rows.len(), "rows fetched");
        Ok(rows)
    }
}

#[async_trait]
impl BookingStore for RestStore {
    async fn list_services(&self) -> Result<Vec<Service>, StoreError> {
        self.select("services", &[
            ("select", "id,name,price,duration,active".into()),
            ("active", "eq.true".into()),
        ]).await
    }

    async fn list_technicians(&self) -> Result<Vec<Technician>, StoreError> {
        self.select("technicians", &[
            ("select", "id,name,email,role,active,color".into()),
            ("active", "eq.true".into()),
        ]).await
    }

    async fn get_client(&self, id: Uuid) -> Result<Client, StoreError> {
        let rows: Vec<Client> = self.select("clients", &[
            ("select", "id,name,email,phone".into()),
            ("id", format!("eq.{id}")),
        ]).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("client {id}")))
    }

    async fn list_bookings(&self, q: &BookingQuery) -> Result<Vec<Booking>, StoreError> {
        let mut params = vec![
            ("select", "*,clients(name,phone,email)".to_string()),
            ("order", "datetime.asc".to_string()),
        ];
        if let Some(from) = q.from {
            params.push(("datetime", format!("gte.{}", iso(from))));
        }
        if let Some(to) = q.to {
            params.push(("datetime", format!("lte.{}", iso(to))));
        }
        if let Some(tech) = q.technician_id {
            params.push(("technician_id", format!("eq.{tech}")));
        }

        let rows: Vec<BookingRow> = self.select("bookings", &params).await?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }
}
