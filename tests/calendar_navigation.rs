mod common;

use common::{date, document_with, ScriptedResource};
use serde_json::json;
use std::sync::Arc;
use viewkit::resource::{Resource, Verb};
use viewkit::ui::calendar::{decode_events, Calendar, CalendarError, GridRenderer, EVENTS_ENDPOINT};

fn calendar(resource: &Arc<ScriptedResource>, reference: chrono::NaiveDate) -> Calendar {
    let resource: Arc<dyn Resource> = resource.clone();
    Calendar::with_reference(
        document_with(r#"<section id="calendar"></section>"#),
        "calendar",
        "/api/events",
        resource,
        GridRenderer,
        reference,
    )
    .expect("Calendar builds")
}

fn rendered(calendar: &Calendar) -> String {
    calendar.document().inner_html(calendar.root())
}

#[test]
fn construction_renders_empty_month_without_fetching() {
    let resource = ScriptedResource::new();
    let calendar = calendar(&resource, date(2024, 3, 14));

    assert_eq!((calendar.year(), calendar.month()), (2024, 2));
    assert!(resource.calls().is_empty());
    assert_eq!(calendar.issued(), 0);

    let html = rendered(&calendar);
    assert!(html.starts_with(r#"<table class="calendar" data-year="2024" data-month="3""#));
    assert!(html.contains(r#"<td class="day today"><span class="date">14</span></td>"#));
    assert!(!html.contains(r#"class="events""#));
    assert_eq!(calendar.document().children(calendar.root()).len(), 1);
}

#[tokio::test]
async fn next_month_fetches_with_one_based_query() {
    let resource = ScriptedResource::new();
    resource.respond(
        "/api/events?year=2024&month=4",
        json!([{"start": "2024-04-02T10:00:00", "end": "2024-04-02T11:00:00", "title": "Dentist"}]),
    );
    let mut calendar = calendar(&resource, date(2024, 3, 14));

    calendar.change_to_next_month().await.unwrap();

    assert_eq!(resource.calls(), vec![(Verb::Get, "/api/events?year=2024&month=4".to_string(), None)]);
    assert_eq!((calendar.year(), calendar.month()), (2024, 3));
    let html = rendered(&calendar);
    assert!(html.contains(r#"data-month="4""#));
    assert!(html.contains("Dentist <time>10:00</time>"));
    assert!(!html.contains("today"));
}

#[tokio::test]
async fn navigation_rolls_over_years() {
    let resource = ScriptedResource::new();
    let mut calendar = calendar(&resource, date(2023, 12, 5));

    calendar.change_to_next_month().await.unwrap();
    assert_eq!((calendar.year(), calendar.month()), (2024, 0));

    calendar.change_to_previous_month().await.unwrap();
    calendar.change_to_previous_month().await.unwrap();
    assert_eq!((calendar.year(), calendar.month()), (2023, 10));

    assert_eq!(
        resource.paths(),
        vec![
            "/api/events?year=2024&month=1",
            "/api/events?year=2023&month=12",
            "/api/events?year=2023&month=11",
        ]
    );
}

#[tokio::test]
async fn set_date_changes_the_fetched_month() {
    let resource = ScriptedResource::new();
    let mut calendar = calendar(&resource, date(2024, 3, 14));

    calendar.set_date(date(2019, 7, 30));
    assert_eq!(calendar.query_string(), "?year=2019&month=7");

    calendar.change_to_next_month().await.unwrap();
    assert_eq!(resource.paths(), vec!["/api/events?year=2019&month=8"]);
}

#[tokio::test]
async fn stale_response_is_still_rendered() {
    let resource = ScriptedResource::new();
    resource.respond(
        "/api/events?year=2024&month=4",
        json!([{"start": "2024-04-09T09:00:00", "end": "2024-04-09T10:00:00", "title": "April"}]),
    );
    resource.respond(
        "/api/events?year=2024&month=5",
        json!([{"start": "2024-05-20T09:00:00", "end": "2024-05-20T10:00:00", "title": "May"}]),
    );
    let mut calendar = calendar(&resource, date(2024, 3, 1));

    let april = calendar.begin_next_month().unwrap();
    let may = calendar.begin_next_month().unwrap();
    assert_eq!((april.sequence, may.sequence), (1, 2));
    assert_eq!(april.query, "?year=2024&month=4");

    // The later request resolves first.
    let may_events = decode_events(may.response.await.unwrap()).unwrap();
    calendar.apply_events(may.sequence, &may_events).unwrap();
    assert!(rendered(&calendar).contains("May"));

    let april_events = decode_events(april.response.await.unwrap()).unwrap();
    calendar.apply_events(april.sequence, &april_events).unwrap();

    // April's events do not overlap May, so the grid is left empty.
    assert_eq!(calendar.applied(), Some(1));
    assert_eq!(calendar.issued(), 2);
    assert_eq!((calendar.year(), calendar.month()), (2024, 4));
    let html = rendered(&calendar);
    assert!(html.contains(r#"data-month="5""#));
    assert!(!html.contains("May"));
    assert!(!html.contains("April"));
    assert!(!html.contains(r#"class="event""#));
}

#[tokio::test]
async fn stale_response_keeps_events_overlapping_the_shown_month() {
    let resource = ScriptedResource::new();
    resource.respond(
        "/api/events?year=2024&month=4",
        json!([{"start": "2024-04-29T09:00:00", "end": "2024-05-02T18:00:00", "title": "Offsite"}]),
    );
    let mut calendar = calendar(&resource, date(2024, 3, 1));

    let april = calendar.begin_next_month().unwrap();
    let may = calendar.begin_next_month().unwrap();
    let may_events = decode_events(may.response.await.unwrap()).unwrap();
    calendar.apply_events(may.sequence, &may_events).unwrap();

    let april_events = decode_events(april.response.await.unwrap()).unwrap();
    calendar.apply_events(april.sequence, &april_events).unwrap();

    let html = rendered(&calendar);
    assert!(html.contains(r#"data-month="5""#));
    assert_eq!(html.matches("Offsite").count(), 2);
}

#[tokio::test]
async fn resource_failure_keeps_previous_grid() {
    let resource = ScriptedResource::new();
    resource.fail("/api/events?year=2024&month=4", 503);
    let mut calendar = calendar(&resource, date(2024, 3, 14));
    let before = rendered(&calendar);

    let result = calendar.change_to_next_month().await;

    assert!(matches!(result, Err(CalendarError::Resource(_))));
    assert_eq!(rendered(&calendar), before);
    assert_eq!(calendar.month(), 3);
}

#[tokio::test]
async fn malformed_events_are_a_decode_error() {
    let resource = ScriptedResource::new();
    resource.respond("/api/events?year=2024&month=4", json!({"events": "nope"}));
    let mut calendar = calendar(&resource, date(2024, 3, 14));

    let result = calendar.change_to_next_month().await;
    assert!(matches!(result, Err(CalendarError::Decode(_))));
}

#[test]
fn events_endpoint_is_named() {
    assert_eq!(EVENTS_ENDPOINT, "getEvents");
    assert!(decode_events(serde_json::Value::Null).unwrap().is_empty());
}
