//! Integration tests for TodoClient using wiremock.
//!
//! These tests verify the request shapes and failure handling against a mock
//! todo server.

use choo_core::NetworkError;
use choo_services::{Operation, RetryConfig, TaskId, TodoApi, TodoClient};
use chrono::DateTime;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a wire task
fn test_task(id: i64, task: &str, done: bool, pin: bool, due: &str) -> serde_json::Value {
    serde_json::json!({
        "ID": id,
        "UserID": "U1",
        "Task": task,
        "Done": done,
        "Pin": pin,
        "Due": due
    })
}

fn fast_retry() -> RetryConfig {
    RetryConfig::new(2, 1, 5)
}

#[tokio::test]
async fn test_fetch_user_info_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user-info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "oauthPicture": "oauthPicture",
            "oauthName": "oauthName"
        })))
        .mount(&mock_server)
        .await;

    let client = TodoClient::with_base_url(&mock_server.uri()).unwrap();
    let user = client.fetch_user_info().await.unwrap();

    assert_eq!(user.name, "oauthName");
    assert_eq!(user.picture, "oauthPicture");
}

#[tokio::test]
async fn test_fetch_task_list_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            test_task(1, "Task 1", true, false, "2018-11-08T12:27:00+07:00"),
            test_task(2, "Task 2", false, false, "2018-11-12T12:27:00+07:00"),
            test_task(3, "Task 3", true, false, "2018-11-11T12:27:00+07:00"),
            test_task(4, "Task 4", false, true, "2018-11-10T12:27:00+07:00"),
            test_task(5, "Task 5", false, true, "2018-11-09T12:27:00+07:00"),
        ])))
        .mount(&mock_server)
        .await;

    let client = TodoClient::with_base_url(&mock_server.uri()).unwrap();
    let tasks = client.fetch_task_list().await.unwrap();

    assert_eq!(tasks.len(), 5);
    assert_eq!(tasks[3].id, TaskId(4));
    assert_eq!(tasks[3].task, "Task 4");
    assert!(tasks[3].pin);
}

#[tokio::test]
async fn test_list_retries_transient_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/list"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            test_task(1, "Task 1", false, false, "2018-11-08T12:27:00+07:00"),
        ])))
        .mount(&mock_server)
        .await;

    let client = TodoClient::with_base_url(&mock_server.uri())
        .unwrap()
        .with_retry(fast_retry());
    let tasks = client.fetch_task_list().await.unwrap();

    assert_eq!(tasks.len(), 1);
}

#[tokio::test]
async fn test_list_gives_up_after_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/list"))
        .respond_with(ResponseTemplate::new(500).set_body_string("user not found"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = TodoClient::with_base_url(&mock_server.uri())
        .unwrap()
        .with_retry(fast_retry());
    let err = client.fetch_task_list().await.unwrap_err();

    assert_eq!(err.operation, Operation::FetchTaskList);
    assert_eq!(err.source.status(), Some(500));
}

#[tokio::test]
async fn test_malformed_list_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            test_task(1, "Task 1", false, false, "not a date"),
        ])))
        .mount(&mock_server)
        .await;

    let client = TodoClient::with_base_url(&mock_server.uri()).unwrap();
    let err = client.fetch_task_list().await.unwrap_err();

    assert!(matches!(err.source, NetworkError::InvalidResponse(_)));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_submit_done_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/done"))
        .and(body_json(serde_json::json!({"ID": 1, "Done": true})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TodoClient::with_base_url(&mock_server.uri()).unwrap();
    client.submit_done(TaskId(1), true).await.unwrap();
}

#[tokio::test]
async fn test_submit_edit_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/edit"))
        .and(body_json(serde_json::json!({
            "ID": 2,
            "Task": "Buy milk",
            "Due": "2018-11-12T18:00:00+07:00"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TodoClient::with_base_url(&mock_server.uri()).unwrap();
    let due = DateTime::parse_from_rfc3339("2018-11-12T18:00:00+07:00").unwrap();
    client.submit_edit(TaskId(2), "Buy milk", due).await.unwrap();
}

#[tokio::test]
async fn test_submit_delete_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/delete"))
        .and(body_json(serde_json::json!({"ID": 4})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TodoClient::with_base_url(&mock_server.uri()).unwrap();
    client.submit_delete(TaskId(4)).await.unwrap();
}

#[tokio::test]
async fn test_writes_are_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/delete"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TodoClient::with_base_url(&mock_server.uri())
        .unwrap()
        .with_retry(fast_retry());
    let err = client.submit_delete(TaskId(4)).await.unwrap_err();

    assert_eq!(err.operation, Operation::SubmitDelete);
    assert!(err.is_transient());
}
