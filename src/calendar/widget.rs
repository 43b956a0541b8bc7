// src/calendar/widget.rs
//
// Events in the shape the calendar widget consumes, plus the widget
// configuration the admin page boots with.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::BookingView;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedProps {
    pub tech_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: Uuid,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub color: Option<String>,
    pub text_color: &'static str,
    pub extended_props: ExtendedProps,
}

impl From<&BookingView> for CalendarEvent {
    fn from(b: &BookingView) -> Self {
        let initial: String = b.technician_name.chars().take(1).collect();
        CalendarEvent {
            id: b.id,
            title: format!("{initial} | {} | {}", b.client_name, b.services_names.join(", ")),
            start: b.datetime,
            end: b.datetime + Duration::minutes(i64::from(b.duration)),
            color: b.color.clone(),
            text_color: "black",
            extended_props: ExtendedProps { tech_id: b.technician_id },
        }
    }
}

pub trait CalendarWidget {
    fn remove_all_events(&mut self);
    fn add_event(&mut self, event: CalendarEvent);
    fn events(&self) -> &[CalendarEvent];
}

/// Event list held server-side and handed to the page on request.
#[derive(Debug, Default)]
pub struct EventBoard {
    events: Vec<CalendarEvent>,
}

impl CalendarWidget for EventBoard {
    fn remove_all_events(&mut self) {
        self.events.clear();
    }

    fn add_event(&mut self, event: CalendarEvent) {
        self.events.push(event);
    }

    fn events(&self) -> &[CalendarEvent] {
        &self.events
    }
}

/// Replaces everything on the widget with one event per booking.
pub fn sync_widget<W: CalendarWidget + ?Sized>(widget: &mut W, bookings: &[BookingView]) {
    widget.remove_all_events();
    for b in bookings {
        widget.add_event(CalendarEvent::from(b));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewType {
    DayGridMonth,
    #[default]
    TimeGridWeek,
    TimeGridDay,
    ListWeek,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHours {
    pub days_of_week: Vec<u8>,    // 0 = Sunday
    pub start_time: &'static str,
    pub end_time: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderToolbar {
    pub left: &'static str,
    pub center: &'static str,
    pub right: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeFormat {
    pub hour: &'static str,
    pub minute: &'static str,
    pub hour12: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarOptions {
    pub initial_view: ViewType,
    pub title_format: &'static str,
    pub business_hours: BusinessHours,
    pub first_day: u8,
    pub header_toolbar: HeaderToolbar,
    pub now_indicator: bool,
    pub height: &'static str,
    pub editable: bool,
    pub selectable: bool,
    pub select_mirror: bool,
    pub day_max_events: bool,
    pub slot_label_format: TimeFormat,
    pub event_time_format: TimeFormat,
}

impl CalendarOptions {
    pub fn new(initial_view: ViewType) -> Self {
        let hm = || TimeFormat { hour: "numeric", minute: "2-digit", hour12: false };
        Self {
            initial_view,
            title_format: "d LLLL yyyy",
            business_hours: BusinessHours {
                days_of_week: (0..7).collect(),
                start_time: "10:00",
                end_time: "18:00",
            },
            first_day: 1, // Monday
            header_toolbar: HeaderToolbar {
                left: "prev,next today",
                center: "title",
                right: "dayGridMonth,timeGridWeek,timeGridDay,listWeek",
            },
            now_indicator: true,
            height: "auto",
            editable: true,
            selectable: true,
            select_mirror: true,
            day_max_events: true,
            slot_label_format: hm(),
            event_time_format: hm(),
        }
    }
}
