mod common;

use common::mock_server::{MockResponse, MockServer};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use viewkit::dom::Document;
use viewkit::resource::{HttpResource, Resource, ResourceError, Verb};
use viewkit::ui::calendar::{Calendar, GridRenderer};

fn resource(server: &MockServer) -> HttpResource {
    HttpResource::new(server.base_url(), Duration::from_secs(5)).expect("Client builds")
}

#[tokio::test]
async fn get_returns_parsed_json() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::json(r#"[{"id": 1}]"#))
        .await;

    let value = resource(&server)
        .call(Verb::Get, "/api/events?year=2024&month=3", None)
        .await
        .unwrap();

    assert_eq!(value, json!([{"id": 1}]));
    let requests = server.captured_requests().await;
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].uri, "/api/events?year=2024&month=3");
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn post_sends_json_body() {
    let server = MockServer::start().await;
    server.enqueue_response(MockResponse::json(r#"{"ok": true}"#)).await;

    resource(&server)
        .call(Verb::Post, "/api/events", Some(json!({"title": "Launch"})))
        .await
        .unwrap();

    let requests = server.captured_requests().await;
    assert_eq!(requests[0].method, "POST");
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({"title": "Launch"}));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::error(404, "missing"))
        .await;

    let err = resource(&server)
        .call(Verb::Delete, "/api/events/9", None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ResourceError::Status {
            verb: Verb::Delete,
            status: 404,
            ..
        }
    ));
}

#[tokio::test]
async fn empty_body_is_null() {
    let server = MockServer::start().await;
    server.enqueue_response(MockResponse::empty()).await;

    let value = resource(&server)
        .call(Verb::Put, "/api/events/3", Some(json!({})))
        .await
        .unwrap();
    assert!(value.is_null());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let client = HttpResource::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
    let err = client.call(Verb::Get, "/api/events", None).await.unwrap_err();
    assert!(matches!(err, ResourceError::Transport { .. }));
}

#[tokio::test]
async fn calendar_fetches_over_http() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::json(
            r#"[{"start": "2024-04-15T08:00:00Z", "end": "2024-04-16T09:00:00Z", "title": "Offsite"}]"#,
        ))
        .await;

    let mut document = Document::new();
    let body = document.body();
    document
        .append_markup(body, r#"<div id="cal"></div>"#)
        .unwrap();
    let resource: Arc<dyn Resource> = Arc::new(resource(&server));
    let mut calendar = Calendar::with_reference(
        document,
        "cal",
        "/api/events",
        resource,
        GridRenderer,
        common::date(2024, 3, 1),
    )
    .unwrap();

    calendar.change_to_next_month().await.unwrap();

    let requests = server.captured_requests().await;
    assert_eq!(requests[0].uri, "/api/events?year=2024&month=4");
    let html = calendar.document().inner_html(calendar.root());
    assert_eq!(html.matches("Offsite").count(), 2);
}
