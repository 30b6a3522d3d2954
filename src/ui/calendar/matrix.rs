//! Month grid construction.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use crate::view::ViewModel;

use super::event::CalendarEvent;

/// The month a calendar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarState {
    first: NaiveDate,
}

impl CalendarState {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Zero-based month (January is 0).
    pub fn month(&self) -> u32 {
        self.first.month0()
    }

    /// One-based month, as sent to the events endpoint.
    pub fn month_number(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn days_in_month(&self) -> u32 {
        self.first
            .checked_add_months(Months::new(1))
            .map(|next| (next - self.first).num_days() as u32)
            .unwrap_or(31)
    }

    /// The state shifted by `delta` months; rolls the year over as needed.
    /// Saturates at the ends of the representable calendar.
    pub fn shifted(&self, delta: i32) -> Self {
        let months = Months::new(delta.unsigned_abs());
        let first = if delta >= 0 {
            self.first.checked_add_months(months)
        } else {
            self.first.checked_sub_months(months)
        };
        Self {
            first: first.unwrap_or(self.first),
        }
    }

    /// `?year=Y&month=M` with a one-based month.
    pub fn query(&self) -> String {
        format!("?year={}&month={}", self.year(), self.month_number())
    }

    fn key(&self) -> (i32, u32) {
        (self.year(), self.month_number())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell<'a> {
    /// Day of month; for filler cells, the day in the adjacent month.
    pub date: u32,
    pub in_current_month: bool,
    pub is_today: bool,
    /// Sorted by start. Always empty for filler cells.
    pub events: Vec<&'a CalendarEvent>,
}

pub type Week<'a> = [DayCell<'a>; 7];

/// Week rows of one month, Monday first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix<'a> {
    pub year: i32,
    /// Zero-based month.
    pub month: u32,
    pub weeks: Vec<Week<'a>>,
}

impl<'a> Matrix<'a> {
    pub fn rows(&self) -> usize {
        self.weeks.len()
    }

    pub fn cell_count(&self) -> usize {
        self.weeks.len() * 7
    }

    pub fn cells(&self) -> impl Iterator<Item = &DayCell<'a>> {
        self.weeks.iter().flatten()
    }

    /// The in-month cell for day `date`.
    pub fn day(&self, date: u32) -> Option<&DayCell<'a>> {
        self.cells()
            .find(|cell| cell.in_current_month && cell.date == date)
    }
}

/// The grid is one composite item.
impl ViewModel for Matrix<'_> {}

/// Builds the grid for `state`, placing every event on the days it covers
/// within that month.
///
/// Events starting in an earlier month start on day 1; events ending in a
/// later month run to the last day. Events lying entirely before or after the
/// month are dropped. Nothing is carried between calls.
pub fn build_matrix<'a>(
    state: CalendarState,
    today: Option<NaiveDate>,
    events: &'a [CalendarEvent],
) -> Matrix<'a> {
    let days = state.days_in_month();
    let first_weekday = state.first_day().weekday().num_days_from_monday();
    let last_weekday = (first_weekday + days - 1) % 7;
    let total = days + first_weekday + (6 - last_weekday);

    let mut placed = place_events(state, days, events);
    let previous_days = state
        .first_day()
        .pred_opt()
        .map(|last| last.day())
        .unwrap_or(31);
    let today = today
        .filter(|date| CalendarState::from_date(*date) == state)
        .map(|date| date.day());

    let mut position = 0u32;
    let weeks = (0..total / 7)
        .map(|_| {
            std::array::from_fn(|_| {
                let cell = make_cell(position, first_weekday, days, previous_days, today, &mut placed);
                position += 1;
                cell
            })
        })
        .collect();

    Matrix {
        year: state.year(),
        month: state.month(),
        weeks,
    }
}

fn make_cell<'a>(
    position: u32,
    first_weekday: u32,
    days: u32,
    previous_days: u32,
    today: Option<u32>,
    placed: &mut [Vec<&'a CalendarEvent>],
) -> DayCell<'a> {
    if position < first_weekday {
        return DayCell {
            date: previous_days - (first_weekday - position) + 1,
            in_current_month: false,
            is_today: false,
            events: Vec::new(),
        };
    }
    let date = position - first_weekday + 1;
    if date > days {
        return DayCell {
            date: date - days,
            in_current_month: false,
            is_today: false,
            events: Vec::new(),
        };
    }
    DayCell {
        date,
        in_current_month: true,
        is_today: today == Some(date),
        events: std::mem::take(&mut placed[(date - 1) as usize]),
    }
}

fn place_events(state: CalendarState, days: u32, events: &[CalendarEvent]) -> Vec<Vec<&CalendarEvent>> {
    let view = state.key();
    let mut placed: Vec<Vec<&CalendarEvent>> = vec![Vec::new(); days as usize];

    for event in events {
        let start = event.start.date();
        let end = event.end.date();
        let start_key = (start.year(), start.month());
        let end_key = (end.year(), end.month());
        if end_key < view || start_key > view {
            continue;
        }

        let first = if start_key < view { 1 } else { start.day() };
        let last = if end_key > view { days } else { end.day() };
        if first > last {
            tracing::debug!(start = %event.start, end = %event.end, "Event ends before it starts; not placed");
            continue;
        }
        for day in first..=last {
            placed[(day - 1) as usize].push(event);
        }
    }

    for day in &mut placed {
        day.sort_by_key(|event| event.start);
    }
    placed
}
