// src/fixtures.rs
//
// Test data builders shared by the unit tests.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{Booking, BookingView, Service, Technician};

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn service(n: u128, name: &str) -> Service {
    Service { id: Uuid::from_u128(n), name: name.into(), price: 20.0, duration: 30, active: true }
}

pub fn technician(n: u128, name: &str) -> Technician {
    Technician {
        id: Uuid::from_u128(n),
        name: name.into(),
        email: Some(format!("{}@salon.test", name.to_lowercase())),
        role: Some("technician".into()),
        active: true,
        color: Some("#ffcc00".into()),
    }
}

pub fn booking(n: u128, tech: u128, client: u128, services: &[u128], when: DateTime<Utc>) -> Booking {
    Booking {
        id: Uuid::from_u128(n),
        technician_id: Uuid::from_u128(tech),
        client_id: Some(Uuid::from_u128(client)),
        services: services.iter().copied().map(Uuid::from_u128).collect(),
        duration: 30,
        price: 20.0,
        datetime: when,
        client_name: Some(format!("Client {client}")),
        client_phone: None,
        client_email: None,
    }
}

pub fn view(tech: u128, client: u128, names: &[&str], when: DateTime<Utc>) -> BookingView {
    BookingView {
        id: Uuid::new_v4(),
        technician_id: Uuid::from_u128(tech),
        client_id: Some(Uuid::from_u128(client)),
        services: Vec::new(),
        duration: 30,
        price: 20.0,
        datetime: when,
        client_name: format!("Client {client}"),
        client_phone: None,
        client_email: None,
        technician_name: "Tech".into(),
        color: None,
        services_names: names.iter().map(|s| s.to_string()).collect(),
    }
}
