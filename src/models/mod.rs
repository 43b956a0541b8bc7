// src/models/mod.rs

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ───────────────────────────────────────
// Reference data (loaded once per process)
// ───────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub duration: i32,            // minutes
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Technician {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub active: bool,
    pub color: Option<String>,    // calendar display color
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

// ───────────────────────────────────────
// Bookings
// ───────────────────────────────────────

/// Booking row as stored, with the client columns joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub technician_id: Uuid,
    pub client_id: Option<Uuid>,
    pub services: Vec<Uuid>,      // uuid[] → services.id
    pub duration: i32,
    pub price: f64,
    pub datetime: DateTime<Utc>,
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
}

/// Booking as shown on the calendar and fed to the statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingView {
    pub id: Uuid,
    pub technician_id: Uuid,
    pub client_id: Option<Uuid>,
    pub services: Vec<Uuid>,
    pub duration: i32,
    pub price: f64,
    pub datetime: DateTime<Utc>,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub technician_name: String,
    pub color: Option<String>,
    pub services_names: Vec<String>,
}

/// Filters for a booking read; `None` leaves that side unbounded.
/// A blank query parameter (`?from=`) counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookingQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub to: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub technician_id: Option<Uuid>,
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(<D::Error as de::Error>::custom),
    }
}

// ───────────────────────────────────────
// Tagged result returned by every read endpoint
// ───────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()) }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for ApiResponse<T> {
    fn from(res: Result<T, E>) -> Self {
        match res {
            Ok(data) => Self::ok(data),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_response_serializes_without_data() {
        let res: ApiResponse<Vec<BookingView>> = Err::<Vec<BookingView>, _>("network error").into();
        assert_eq!(
            serde_json::to_value(&res).unwrap(),
            serde_json::json!({"success": false, "error": "network error"})
        );
    }

    #[test]
    fn blank_bounds_are_unbounded() {
        let q: BookingQuery = serde_json::from_value(serde_json::json!({
            "from": "", "to": "  ", "technician_id": ""
        }))
        .unwrap();
        assert_eq!(q, BookingQuery::default());

        let q: BookingQuery = serde_json::from_value(serde_json::json!({
            "from": "2024-06-03T00:00:00.000Z"
        }))
        .unwrap();
        assert!(q.from.is_some());
        assert!(q.to.is_none());

        assert!(serde_json::from_value::<BookingQuery>(serde_json::json!({"to": "yesterday"})).is_err());
    }

    #[test]
    fn ok_response_carries_data() {
        let res: ApiResponse<u32> = Ok::<_, String>(3).into();
        assert_eq!(
            serde_json::to_value(&res).unwrap(),
            serde_json::json!({"success": true, "data": 3})
        );
    }
}
