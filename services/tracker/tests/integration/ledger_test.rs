use chrono::{Duration, Utc};
use uuid::Uuid;

use simcheck_tracker::domain::repository::FailedRequestRepository as _;
use simcheck_tracker::domain::types::{FailedRequest, RequestStatus};
use simcheck_tracker::error::TrackerError;
use simcheck_tracker::usecase::ledger::{
    ListQueuedRequestsUseCase, RecordFailedRequestInput, RecordFailedRequestUseCase,
};

use crate::helpers::{MockFailedRequestRepo, RecordingSink};

fn upload_failure(module_id: &str) -> RecordFailedRequestInput {
    RecordFailedRequestInput {
        module_id: module_id.to_owned(),
        endpoint: "submissions/upload".to_owned(),
        payload: serde_json::json!({"courseModuleId": module_id, "fileId": "f-1"}),
        priority: 1,
        error_message: "connection refused".to_owned(),
        verb: "POST".to_owned(),
        require_auth: true,
    }
}

#[tokio::test]
async fn should_queue_first_failure_for_a_key() {
    let repo = MockFailedRequestRepo::empty();
    let rows_handle = repo.rows_handle();

    let uc = RecordFailedRequestUseCase {
        repo,
        diag: RecordingSink::new(),
    };
    uc.execute(upload_failure("cm-17")).await.unwrap();

    let rows = rows_handle.lock().unwrap();
    assert_eq!(rows.len(), 1, "expected exactly one queued row");

    let queued = &rows[0];
    assert_eq!(queued.module_id, "cm-17");
    assert_eq!(queued.endpoint, "submissions/upload");
    assert_eq!(queued.retry_attempts, 0, "new rows start with no retries");
    assert_eq!(queued.status, RequestStatus::Failed);
    assert!(queued.require_auth);
}

#[tokio::test]
async fn should_not_duplicate_rows_for_same_key() {
    let repo = MockFailedRequestRepo::empty();
    let rows_handle = repo.rows_handle();

    let uc = RecordFailedRequestUseCase {
        repo,
        diag: RecordingSink::new(),
    };
    uc.execute(upload_failure("cm-17")).await.unwrap();

    // A second failure for the same key must be a successful no-op.
    let mut second = upload_failure("cm-17");
    second.error_message = "timed out".to_owned();
    uc.execute(second).await.unwrap();

    let rows = rows_handle.lock().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].error_message, "connection refused",
        "the first recorded failure wins"
    );
}

#[tokio::test]
async fn should_queue_separate_rows_per_endpoint() {
    let repo = MockFailedRequestRepo::empty();
    let rows_handle = repo.rows_handle();

    let uc = RecordFailedRequestUseCase {
        repo,
        diag: RecordingSink::new(),
    };
    uc.execute(upload_failure("cm-17")).await.unwrap();

    let mut report = upload_failure("cm-17");
    report.endpoint = "reports/download".to_owned();
    uc.execute(report).await.unwrap();

    assert_eq!(rows_handle.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn should_find_queued_row_by_key() {
    let repo = MockFailedRequestRepo::empty();

    let uc = RecordFailedRequestUseCase {
        repo,
        diag: RecordingSink::new(),
    };
    uc.execute(upload_failure("cm-17")).await.unwrap();

    let found = uc.repo.find("cm-17", "submissions/upload").await.unwrap();
    assert_eq!(found.unwrap().module_id, "cm-17");

    let missing = uc.repo.find("cm-99", "submissions/upload").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn should_reject_blank_request_key() {
    let uc = RecordFailedRequestUseCase {
        repo: MockFailedRequestRepo::empty(),
        diag: RecordingSink::new(),
    };

    let mut input = upload_failure("cm-17");
    input.endpoint = "   ".to_owned();
    let result = uc.execute(input).await;

    assert!(
        matches!(result, Err(TrackerError::EmptyRequestKey)),
        "expected EmptyRequestKey, got {result:?}"
    );
}

#[tokio::test]
async fn should_emit_diagnostic_when_insert_fails() {
    let sink = RecordingSink::new();
    let events_handle = sink.events_handle();

    let uc = RecordFailedRequestUseCase {
        repo: MockFailedRequestRepo::failing(),
        diag: sink,
    };
    let result = uc.execute(upload_failure("cm-17")).await;

    assert!(matches!(result, Err(TrackerError::Internal(_))));

    let events = events_handle.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].1, "INSERT_RECORD_FAILED");
    assert!(
        events[0].0.contains("cm-17") && events[0].0.contains("submissions/upload"),
        "diagnostic should name the failing key: {}",
        events[0].0
    );
}

#[tokio::test]
async fn should_list_unresolved_requests_by_priority_then_age() {
    let repo = MockFailedRequestRepo::empty();
    let now = Utc::now();

    let row = |module: &str, priority: i32, age: i64, status: RequestStatus| FailedRequest {
        id: Uuid::now_v7(),
        module_id: module.to_owned(),
        endpoint: "submissions/upload".to_owned(),
        payload: serde_json::json!({}),
        priority,
        retry_attempts: 0,
        status,
        error_message: "connection refused".to_owned(),
        verb: "POST".to_owned(),
        require_auth: true,
        created_at: now - Duration::minutes(age),
    };
    {
        let mut rows = repo.rows.lock().unwrap();
        rows.push(row("cm-1", 2, 30, RequestStatus::Failed));
        rows.push(row("cm-2", 1, 10, RequestStatus::Failed));
        rows.push(row("cm-3", 1, 20, RequestStatus::Pending));
        rows.push(row("cm-4", 0, 5, RequestStatus::Resolved));
    }

    let uc = ListQueuedRequestsUseCase { repo };
    let queued = uc.execute().await.unwrap();

    let order: Vec<&str> = queued.iter().map(|r| r.module_id.as_str()).collect();
    assert_eq!(order, vec!["cm-3", "cm-2", "cm-1"]);
}
