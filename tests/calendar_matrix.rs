mod common;

use chrono::{Datelike, Weekday};
use common::date;
use viewkit::ui::calendar::{build_matrix, CalendarEvent, CalendarState};

fn all_day(start: chrono::NaiveDate, end: chrono::NaiveDate) -> CalendarEvent {
    CalendarEvent::new(
        start.and_hms_opt(8, 0, 0).unwrap(),
        end.and_hms_opt(18, 0, 0).unwrap(),
    )
}

#[test]
fn every_month_has_whole_weeks() {
    for year in [1999, 2000, 2023, 2024, 2100] {
        for month in 1..=12 {
            let state = CalendarState::from_date(date(year, month, 1));
            let matrix = build_matrix(state, None, &[]);

            assert_eq!(matrix.cell_count() % 7, 0);
            assert_eq!(matrix.rows() * 7, matrix.cells().count());
            assert!((4..=6).contains(&matrix.rows()));

            let in_month: Vec<u32> = matrix
                .cells()
                .filter(|cell| cell.in_current_month)
                .map(|cell| cell.date)
                .collect();
            let expected: Vec<u32> = (1..=state.days_in_month()).collect();
            assert_eq!(in_month, expected, "{year}-{month}");
        }
    }
}

#[test]
fn fillers_match_first_and_last_weekday() {
    for (year, month) in [(2024, 3), (2023, 10), (2021, 2), (2025, 6), (2026, 1)] {
        let state = CalendarState::from_date(date(year, month, 1));
        let matrix = build_matrix(state, None, &[]);
        let days = state.days_in_month();

        let leading = state.first_day().weekday().num_days_from_monday() as usize;
        let last = date(year, month, days);
        let trailing = 6 - last.weekday().num_days_from_monday() as usize;

        let cells: Vec<_> = matrix.cells().collect();
        assert!(cells[..leading].iter().all(|c| !c.in_current_month));
        assert!(cells[cells.len() - trailing..].iter().all(|c| !c.in_current_month));
        assert_eq!(matrix.cell_count(), days as usize + leading + trailing);

        let previous_last = state.first_day().pred_opt().unwrap().day();
        let leading_dates: Vec<u32> = cells[..leading].iter().map(|c| c.date).collect();
        let expected: Vec<u32> = (previous_last + 1 - leading as u32..=previous_last).collect();
        assert_eq!(leading_dates, expected);

        let trailing_dates: Vec<u32> = cells[cells.len() - trailing..].iter().map(|c| c.date).collect();
        assert_eq!(trailing_dates, (1..=trailing as u32).collect::<Vec<_>>());
    }
}

#[test]
fn october_2023_known_layout() {
    // 1 October 2023 is a Sunday: six leading fillers, 31 days, five trailing.
    assert_eq!(date(2023, 10, 1).weekday(), Weekday::Sun);
    let matrix = build_matrix(CalendarState::from_date(date(2023, 10, 1)), None, &[]);

    assert_eq!(matrix.rows(), 6);
    let first_row: Vec<u32> = matrix.weeks[0].iter().map(|c| c.date).collect();
    assert_eq!(first_row, vec![25, 26, 27, 28, 29, 30, 1]);
    let last_row: Vec<u32> = matrix.weeks[5].iter().map(|c| c.date).collect();
    assert_eq!(last_row, vec![30, 31, 1, 2, 3, 4, 5]);
}

#[test]
fn filler_cells_never_carry_events() {
    let events = vec![
        all_day(date(2024, 2, 20), date(2024, 4, 10)),
        all_day(date(2024, 3, 1), date(2024, 3, 31)),
    ];
    let matrix = build_matrix(CalendarState::from_date(date(2024, 3, 1)), None, &events);

    for cell in matrix.cells() {
        if cell.in_current_month {
            assert_eq!(cell.events.len(), 2, "day {}", cell.date);
        } else {
            assert!(cell.events.is_empty());
        }
    }
}

#[test]
fn spillover_is_clamped_per_month() {
    // Last three days of January into the first two of February.
    let events = vec![all_day(date(2024, 1, 29), date(2024, 2, 2))];

    let january = build_matrix(CalendarState::from_date(date(2024, 1, 1)), None, &events);
    let covered: Vec<u32> = january
        .cells()
        .filter(|c| c.in_current_month && !c.events.is_empty())
        .map(|c| c.date)
        .collect();
    assert_eq!(covered, vec![29, 30, 31]);

    let february = build_matrix(CalendarState::from_date(date(2024, 2, 1)), None, &events);
    let covered: Vec<u32> = february
        .cells()
        .filter(|c| c.in_current_month && !c.events.is_empty())
        .map(|c| c.date)
        .collect();
    assert_eq!(covered, vec![1, 2]);

    // Building February did not disturb a fresh January build.
    let again = build_matrix(CalendarState::from_date(date(2024, 1, 1)), None, &events);
    assert_eq!(again, january);
}

#[test]
fn spillover_across_year_boundary() {
    let events = vec![all_day(date(2023, 12, 30), date(2024, 1, 3))];

    let december = build_matrix(CalendarState::from_date(date(2023, 12, 1)), None, &events);
    let covered: Vec<u32> = december
        .cells()
        .filter(|c| !c.events.is_empty())
        .map(|c| c.date)
        .collect();
    assert_eq!(covered, vec![30, 31]);

    let january = build_matrix(CalendarState::from_date(date(2024, 1, 1)), None, &events);
    let covered: Vec<u32> = january
        .cells()
        .filter(|c| !c.events.is_empty())
        .map(|c| c.date)
        .collect();
    assert_eq!(covered, vec![1, 2, 3]);
}

#[test]
fn events_reference_the_source_slice() {
    let events = vec![all_day(date(2024, 5, 7), date(2024, 5, 7)).with("title", "Review")];
    let matrix = build_matrix(CalendarState::from_date(date(2024, 5, 1)), None, &events);

    let day = matrix.day(7).unwrap();
    assert!(std::ptr::eq(day.events[0], &events[0]));
    assert_eq!(day.events[0].title(), Some("Review"));
}
