//! Month calendar backed by an events endpoint.
//!
//! The calendar shows one month as a Monday-first grid. Moving to another
//! month fetches that month's events (`?year=Y&month=M`, one-based month) and
//! rebuilds the whole grid from the response. Construction renders an empty
//! grid and does not fetch.
//!
//! Navigation does not cancel earlier requests. Each fetch carries a sequence
//! number; a response older than the newest request is still rendered, with a
//! warning.

mod event;
mod matrix;
mod render;

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde_json::Value;
use thiserror::Error;

use crate::dom::{Document, NodeId};
use crate::resource::{Resource, ResourceError, Verb};
use crate::view::{ApiDescriptor, ApiFuture, HandlerTable, Renderer, View, ViewError, Widget};

pub use event::CalendarEvent;
pub use matrix::{build_matrix, CalendarState, DayCell, Matrix, Week};
pub use render::{GridRenderer, WEEKDAY_LABELS};

/// Name of the endpoint that lists a month's events.
pub const EVENTS_ENDPOINT: &str = "getEvents";

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("Events request failed: {0}")]
    Resource(#[from] ResourceError),

    #[error("Events response is not a list of events: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    View(#[from] ViewError),
}

/// An issued month request.
pub struct MonthFetch {
    pub sequence: u64,
    pub year: i32,
    /// One-based month.
    pub month: u32,
    pub query: String,
    pub response: ApiFuture,
}

impl fmt::Debug for MonthFetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonthFetch")
            .field("sequence", &self.sequence)
            .field("year", &self.year)
            .field("month", &self.month)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

/// Decodes an events response. `null` is an empty month.
pub fn decode_events(response: Value) -> Result<Vec<CalendarEvent>, CalendarError> {
    if response.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(response)?)
}

pub struct Calendar<R = GridRenderer> {
    view: View<R, Self>,
    state: CalendarState,
    today: NaiveDate,
    issued: u64,
    applied: Option<u64>,
}

impl<R> Widget for Calendar<R> {
    type Renderer = R;

    fn view(&self) -> &View<R, Self> {
        &self.view
    }
}

impl<R> Calendar<R>
where
    R: for<'a> Renderer<Matrix<'a>>,
{
    /// Creates a calendar showing the current local month.
    pub fn new(
        document: Document,
        root_id: &str,
        events_api_url: &str,
        resource: Arc<dyn Resource>,
        renderer: R,
    ) -> Result<Self, CalendarError> {
        let today = Local::now().date_naive();
        Self::with_reference(document, root_id, events_api_url, resource, renderer, today)
    }

    /// Creates a calendar showing the month of `reference`, which is also
    /// treated as today.
    pub fn with_reference(
        document: Document,
        root_id: &str,
        events_api_url: &str,
        resource: Arc<dyn Resource>,
        renderer: R,
        reference: NaiveDate,
    ) -> Result<Self, CalendarError> {
        let descriptors = [ApiDescriptor::new(EVENTS_ENDPOINT, Verb::Get, events_api_url)];
        let view = View::attach(document, root_id, renderer, HandlerTable::new())?
            .with_api(&descriptors, resource);

        let mut calendar = Self {
            view,
            state: CalendarState::from_date(reference),
            today: reference,
            issued: 0,
            applied: None,
        };
        calendar.set_calendar_view(&[])?;
        tracing::debug!(
            year = calendar.state.year(),
            month = calendar.state.month_number(),
            "Calendar created"
        );
        Ok(calendar)
    }

    /// Shows the month containing `date`. Does not render or fetch.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.state = CalendarState::from_date(date);
    }

    /// The grid for the shown month.
    pub fn create_calendar_matrix<'a>(&self, events: &'a [CalendarEvent]) -> Matrix<'a> {
        build_matrix(self.state, Some(self.today), events)
    }

    /// Rebuilds the grid from `events` and renders it as the single item.
    pub fn set_calendar_view(&mut self, events: &[CalendarEvent]) -> Result<NodeId, CalendarError> {
        let matrix = self.create_calendar_matrix(events);
        let node = self.view.render_single(&matrix)?;
        tracing::debug!(
            year = self.state.year(),
            month = self.state.month_number(),
            rows = matrix.rows(),
            events = events.len(),
            "Calendar rendered"
        );
        Ok(node)
    }

    /// Moves to the next month and issues its events request.
    pub fn begin_next_month(&mut self) -> Result<MonthFetch, CalendarError> {
        self.begin_shift(1)
    }

    /// Moves to the previous month and issues its events request.
    pub fn begin_previous_month(&mut self) -> Result<MonthFetch, CalendarError> {
        self.begin_shift(-1)
    }

    /// Issues an events request for the shown month without moving.
    pub fn begin_reload(&mut self) -> Result<MonthFetch, CalendarError> {
        self.begin_shift(0)
    }

    fn begin_shift(&mut self, delta: i32) -> Result<MonthFetch, CalendarError> {
        self.state = self.state.shifted(delta);
        let query = self.state.query();
        let response = self
            .view
            .api()
            .endpoint(EVENTS_ENDPOINT)?
            .query(Some(&query))?;

        self.issued += 1;
        Ok(MonthFetch {
            sequence: self.issued,
            year: self.state.year(),
            month: self.state.month_number(),
            query,
            response,
        })
    }

    /// Renders the events answering request `sequence` for the shown month.
    ///
    /// The grid is always built for the shown month, so a stale response
    /// replaces it with only those of its events that overlap that month.
    pub fn apply_events(
        &mut self,
        sequence: u64,
        events: &[CalendarEvent],
    ) -> Result<NodeId, CalendarError> {
        if sequence < self.issued {
            tracing::warn!(
                sequence,
                newest = self.issued,
                "Rendering a stale events response over a newer month"
            );
        }
        self.applied = Some(sequence);
        self.set_calendar_view(events)
    }

    pub async fn change_to_next_month(&mut self) -> Result<NodeId, CalendarError> {
        let fetch = self.begin_next_month()?;
        self.complete(fetch).await
    }

    pub async fn change_to_previous_month(&mut self) -> Result<NodeId, CalendarError> {
        let fetch = self.begin_previous_month()?;
        self.complete(fetch).await
    }

    /// Fetches and renders the shown month.
    pub async fn reload(&mut self) -> Result<NodeId, CalendarError> {
        let fetch = self.begin_reload()?;
        self.complete(fetch).await
    }

    async fn complete(&mut self, fetch: MonthFetch) -> Result<NodeId, CalendarError> {
        let response = fetch.response.await?;
        let events = decode_events(response)?;
        self.apply_events(fetch.sequence, &events)
    }
}

impl<R> Calendar<R> {
    pub fn state(&self) -> CalendarState {
        self.state
    }

    pub fn year(&self) -> i32 {
        self.state.year()
    }

    /// Zero-based month.
    pub fn month(&self) -> u32 {
        self.state.month()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Query string the next fetch for the shown month would send.
    pub fn query_string(&self) -> String {
        self.state.query()
    }

    /// Sequence number of the newest issued request.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Sequence number of the last applied response.
    pub fn applied(&self) -> Option<u64> {
        self.applied
    }

    pub fn root(&self) -> NodeId {
        self.view.root()
    }

    pub fn document(&self) -> &Document {
        self.view.document()
    }

    pub fn into_document(self) -> Document {
        self.view.into_document()
    }
}
