//! HTTP tests for the slot endpoints, served over the in-memory store.

use std::sync::Arc;

use salvo::http::StatusCode;
use salvo::test::{ResponseExt, TestClient};
use salvo::{Router, Service};

use tatami_app::app::api::routes;
use tatami_app::schedule_handler::ScheduleServiceHandler;
use tatami_db::store::MemoryStore;
use tatami_service::schedule::ScheduleService;

fn test_service() -> Service {
    let store = Arc::new(MemoryStore::new());
    let schedule = Arc::new(ScheduleService::new(store.clone(), store));
    let router = Router::new()
        .hoop(ScheduleServiceHandler { service: schedule })
        .push(routes());
    Service::new(router)
}

const BASE: &str = "http://127.0.0.1/api/slots";

async fn create_monday_slot(service: &Service) -> serde_json::Value {
    let mut res = TestClient::post(BASE)
        .json(&serde_json::json!({
            "day_of_week": 1,
            "start_time": "09:00",
            "end_time": "10:00",
            "created_for_date": "2024-01-08"
        }))
        .send(service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::CREATED));
    res.take_json().await.expect("slot payload")
}

#[tokio::test]
async fn healthcheck_responds_ok() {
    let service = test_service();
    let mut res = TestClient::get("http://127.0.0.1/api/healthcheck")
        .send(&service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::OK));
    assert_eq!(res.take_string().await.expect("body"), "OK");
}

#[tokio::test]
async fn created_slot_resolves_on_its_weekday() {
    let service = test_service();
    let slot = create_monday_slot(&service).await;
    assert_eq!(slot["start_time"], "09:00");
    assert_eq!(slot["end_time"], "10:00");
    assert_eq!(slot["is_recurring"], true);

    let mut res = TestClient::get(format!("{BASE}/date/2024-01-08"))
        .send(&service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::OK));
    let occurrences: serde_json::Value = res.take_json().await.expect("occurrences");
    assert_eq!(occurrences.as_array().expect("array").len(), 1);
    assert_eq!(occurrences[0]["id"], slot["id"]);
    assert_eq!(occurrences[0]["is_exception"], false);

    // A Tuesday resolves to nothing.
    let mut res = TestClient::get(format!("{BASE}/date/2024-01-09"))
        .send(&service)
        .await;
    let occurrences: serde_json::Value = res.take_json().await.expect("occurrences");
    assert!(occurrences.as_array().expect("array").is_empty());
}

#[tokio::test]
async fn unordered_window_is_a_client_error() {
    let service = test_service();
    let res = TestClient::post(BASE)
        .json(&serde_json::json!({
            "day_of_week": 1,
            "start_time": "10:00",
            "end_time": "09:00",
            "created_for_date": "2024-01-08"
        }))
        .send(&service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn third_slot_for_a_date_is_a_client_error() {
    let service = test_service();
    create_monday_slot(&service).await;
    create_monday_slot(&service).await;

    let mut res = TestClient::post(BASE)
        .json(&serde_json::json!({
            "day_of_week": 1,
            "start_time": "11:00",
            "end_time": "12:00",
            "created_for_date": "2024-01-08"
        }))
        .send(&service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    let body: serde_json::Value = res.take_json().await.expect("error payload");
    assert!(
        body["error"]
            .as_str()
            .expect("error text")
            .contains("Capacity exceeded")
    );
}

#[tokio::test]
async fn occurrence_edit_then_suppression() {
    let service = test_service();
    let slot = create_monday_slot(&service).await;
    let id = slot["id"].as_str().expect("id");

    // Move the 2024-01-08 occurrence only.
    let mut res = TestClient::put(format!("{BASE}/{id}/date"))
        .json(&serde_json::json!({
            "date": "2024-01-08",
            "start_time": "14:00",
            "end_time": "15:00"
        }))
        .send(&service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::OK));
    let exception: serde_json::Value = res.take_json().await.expect("exception payload");
    assert_eq!(exception["slot_id"].as_str(), Some(id));
    assert_eq!(exception["start_time"], "14:00");

    let mut res = TestClient::get(format!("{BASE}/date/2024-01-08"))
        .send(&service)
        .await;
    let occurrences: serde_json::Value = res.take_json().await.expect("occurrences");
    assert_eq!(occurrences[0]["start_time"], "14:00");
    assert_eq!(occurrences[0]["is_exception"], true);

    // The following Monday still shows the base rule.
    let mut res = TestClient::get(format!("{BASE}/date/2024-01-15"))
        .send(&service)
        .await;
    let occurrences: serde_json::Value = res.take_json().await.expect("occurrences");
    assert_eq!(occurrences[0]["start_time"], "09:00");
    assert_eq!(occurrences[0]["is_exception"], false);

    // Suppress the edited date; the tombstone has null times.
    let mut res = TestClient::delete(format!("{BASE}/{id}/date"))
        .json(&serde_json::json!({ "date": "2024-01-08" }))
        .send(&service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::OK));
    let tombstone: serde_json::Value = res.take_json().await.expect("tombstone payload");
    assert!(tombstone["start_time"].is_null());
    assert!(tombstone["end_time"].is_null());

    let mut res = TestClient::get(format!("{BASE}/date/2024-01-08"))
        .send(&service)
        .await;
    let occurrences: serde_json::Value = res.take_json().await.expect("occurrences");
    assert!(occurrences.as_array().expect("array").is_empty());
}

#[tokio::test]
async fn editing_a_missing_slot_is_not_found() {
    let service = test_service();
    let res = TestClient::put(format!("{BASE}/{}", uuid::Uuid::now_v7()))
        .json(&serde_json::json!({ "start_time": "08:00" }))
        .send(&service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn deleting_a_slot_twice_reports_not_found() {
    let service = test_service();
    let slot = create_monday_slot(&service).await;
    let id = slot["id"].as_str().expect("id");

    let res = TestClient::delete(format!("{BASE}/{id}"))
        .send(&service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

    let res = TestClient::delete(format!("{BASE}/{id}"))
        .send(&service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn week_view_is_monday_first_and_seven_long() {
    let service = test_service();
    create_monday_slot(&service).await;

    let mut res = TestClient::get(format!("{BASE}/week?start_date=2024-01-10"))
        .send(&service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::OK));
    let week: serde_json::Value = res.take_json().await.expect("week payload");
    let days = week.as_array().expect("array");
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], "2024-01-08");
    assert_eq!(days[0]["day_of_week"], 1);
    assert_eq!(days[6]["date"], "2024-01-14");
    assert_eq!(days[0]["slots"].as_array().expect("array").len(), 1);
    assert!(days[1]["slots"].as_array().expect("array").is_empty());
}

#[tokio::test]
async fn week_view_requires_an_anchor() {
    let service = test_service();
    let res = TestClient::get(format!("{BASE}/week")).send(&service).await;
    assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
}
