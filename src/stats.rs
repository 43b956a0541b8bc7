// src/stats.rs

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{BookingView, Technician};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceCount {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicianStats {
    pub technician_id: Uuid,
    pub technician_name: String,
    pub working_days: usize,
    pub total_minutes: i64,
    pub working_time: String,
    pub total_money: f64,
    pub unique_clients: usize,
    pub event_count: usize,
    /// Most frequent first; ties keep the order they were first seen in.
    pub service_counts: Vec<ServiceCount>,
}

/// Per-technician figures over the bookings inside `[start, end]`.
///
/// One record per technician, in the given order. Days are counted by local
/// date in `tz`. Every entry of a booking's `services_names` is counted, so a
/// service listed twice on one booking counts twice.
pub fn aggregate(
    technicians: &[Technician],
    events: &[BookingView],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    tz: Tz,
) -> Vec<TechnicianStats> {
    technicians
        .iter()
        .map(|t| technician_stats(t, events, start, end, tz))
        .collect()
}

fn technician_stats(
    tech: &Technician,
    events: &[BookingView],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    tz: Tz,
) -> TechnicianStats {
    let mine: Vec<&BookingView> = events
        .iter()
        .filter(|e| e.technician_id == tech.id && e.datetime >= start && e.datetime <= end)
        .collect();

    let days: HashSet<NaiveDate> = mine.iter().map(|e| e.datetime.with_timezone(&tz).date_naive()).collect();
    let clients: HashSet<Option<Uuid>> = mine.iter().map(|e| e.client_id).collect();
    let total_minutes: i64 = mine.iter().map(|e| i64::from(e.duration)).sum();
    let total_money: f64 = mine.iter().map(|e| e.price).sum();

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut service_counts: Vec<ServiceCount> = Vec::new();
    for name in mine.iter().flat_map(|e| e.services_names.iter()) {
        match index.get(name.as_str()) {
            Some(&i) => service_counts[i].count += 1,
            None => {
                index.insert(name.as_str(), service_counts.len());
                service_counts.push(ServiceCount { name: name.clone(), count: 1 });
            }
        }
    }
    // stable: equal counts stay in encounter order
    service_counts.sort_by(|a, b| b.count.cmp(&a.count));

    TechnicianStats {
        technician_id: tech.id,
        technician_name: tech.name.clone(),
        working_days: days.len(),
        total_minutes,
        working_time: format_minutes(total_minutes),
        total_money,
        unique_clients: clients.len(),
        event_count: mine.len(),
        service_counts,
    }
}

/// `"45 mins"`, `"1 hr 15 mins"`, `"2 hrs 1 min"`.
pub fn format_minutes(minutes: i64) -> String {
    if minutes < 60 {
        return format!("{minutes} mins");
    }
    let hrs = minutes / 60;
    let mins = minutes % 60;
    format!(
        "{hrs} hr{} {mins} min{}",
        if hrs > 1 { "s" } else { "" },
        if mins != 1 { "s" } else { "" },
    )
}
