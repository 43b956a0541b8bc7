// src/calendar/session.rs

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::widget::{sync_widget, CalendarEvent, CalendarWidget, EventBoard, ViewType};
use crate::models::{BookingView, Technician};
use crate::stats::{aggregate, TechnicianStats};

/// What the calendar shows. `active_*` is the rendered range (used for
/// fetching), `current_*` the nominal period (used for statistics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub active_start: DateTime<Utc>,
    pub active_end: DateTime<Utc>,
    pub current_start: DateTime<Utc>,
    pub current_end: DateTime<Utc>,
    #[serde(alias = "type", default)]
    pub view_type: ViewType,
}

impl Viewport {
    pub fn collapsed(at: DateTime<Utc>) -> Self {
        Self {
            active_start: at,
            active_end: at,
            current_start: at,
            current_end: at,
            view_type: ViewType::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FetchStatus {
    Idle,
    Loading,
    Empty,
    Ready { count: usize },
    Failed { error: String },
}

/// Handed out when a refresh starts; the fetch result is only applied if no
/// newer refresh was started in the meantime.
#[derive(Debug, Clone)]
pub struct RefreshTicket {
    pub generation: u64,
    pub technicians: Vec<Technician>,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarSnapshot {
    pub generation: u64,
    pub status: FetchStatus,
    pub viewport: Viewport,
    pub events: Vec<CalendarEvent>,
}

/// Calendar state for the admin page. Every write goes through one of the
/// methods below.
pub struct CalendarSession<W: CalendarWidget = EventBoard> {
    selected: Vec<Technician>,
    viewport: Viewport,
    events: Vec<BookingView>,
    generation: u64,
    status: FetchStatus,
    widget: W,
}

impl CalendarSession<EventBoard> {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self::with_widget(now, EventBoard::default())
    }
}

impl<W: CalendarWidget> CalendarSession<W> {
    pub fn with_widget(now: DateTime<Utc>, widget: W) -> Self {
        Self {
            selected: Vec::new(),
            viewport: Viewport::collapsed(now),
            events: Vec::new(),
            generation: 0,
            status: FetchStatus::Idle,
            widget,
        }
    }

    pub fn select_technicians(&mut self, technicians: Vec<Technician>) -> RefreshTicket {
        self.selected = technicians;
        self.begin_refresh()
    }

    /// The widget reported a new date range or view.
    pub fn set_dates(&mut self, viewport: Viewport) -> RefreshTicket {
        self.viewport = viewport;
        self.begin_refresh()
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.generation += 1;
        self.status = FetchStatus::Loading;
        RefreshTicket {
            generation: self.generation,
            technicians: self.selected.clone(),
            from: self.viewport.active_start,
            to: self.viewport.active_end,
        }
    }

    /// Applies a finished fetch. Returns `false` when the ticket is stale.
    pub fn complete_refresh(
        &mut self,
        ticket: &RefreshTicket,
        outcome: Result<Vec<BookingView>, String>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding superseded refresh"
            );
            return false;
        }

        match outcome {
            Ok(events) => {
                self.status = if events.is_empty() {
                    FetchStatus::Empty
                } else {
                    FetchStatus::Ready { count: events.len() }
                };
                self.events = events;
            }
            Err(error) => {
                tracing::warn!(generation = ticket.generation, %error, "calendar refresh failed");
                self.status = FetchStatus::Failed { error };
                self.events.clear();
            }
        }
        sync_widget(&mut self.widget, &self.events);
        true
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn events(&self) -> &[BookingView] {
        &self.events
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn statistics(&self, tz: Tz) -> Vec<TechnicianStats> {
        aggregate(
            &self.selected,
            &self.events,
            self.viewport.current_start,
            self.viewport.current_end,
            tz,
        )
    }

    pub fn snapshot(&self) -> CalendarSnapshot {
        CalendarSnapshot {
            generation: self.generation,
            status: self.status.clone(),
            viewport: self.viewport,
            events: self.widget.events().to_vec(),
        }
    }
}
