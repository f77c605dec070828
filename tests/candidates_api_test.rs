mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{app, create_candidate, create_job, send};

#[tokio::test]
async fn create_validates_and_enforces_unique_email_per_job() {
    let app = app();
    create_job(&app, "Backend Engineer").await;
    create_job(&app, "Data Engineer").await;

    let created = create_candidate(&app, 1, "Ada@Example.com").await;
    assert_eq!(created["email"], "ada@example.com");
    assert_eq!(created["stage"], "applied");
    assert_eq!(created["timeline"].as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        "POST",
        "/api/candidates",
        Some(json!({ "jobId": 1, "name": "Ada", "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    create_candidate(&app, 2, "ada@example.com").await;

    for body in [
        json!({ "name": "No Job", "email": "x@example.com" }),
        json!({ "jobId": 1, "email": "x@example.com" }),
        json!({ "jobId": 1, "name": "Bad Email", "email": "nope" }),
    ] {
        let (status, _) = send(&app, "POST", "/api/candidates", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, _) = send(
        &app,
        "POST",
        "/api/candidates",
        Some(json!({ "jobId": 77, "name": "Ghost", "email": "ghost@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stage_changes_append_to_timeline_once() {
    let app = app();
    create_job(&app, "Backend Engineer").await;
    create_candidate(&app, 1, "ada@example.com").await;

    for stage in ["screen", "screen", "tech"] {
        let (status, body) = send(
            &app,
            "PATCH",
            "/api/candidates/1",
            Some(json!({ "stage": stage })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stage"], stage);
    }

    let (status, timeline) = send(&app, "GET", "/api/candidates/1/timeline", None).await;
    assert_eq!(status, StatusCode::OK);
    let stages: Vec<&str> = timeline
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["stage"].as_str().unwrap())
        .collect();
    assert_eq!(stages, vec!["applied", "screen", "tech"]);

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/candidates/1",
        Some(json!({ "timeline": [], "stage": "offer" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, timeline) = send(&app, "GET", "/api/candidates/1/timeline", None).await;
    assert_eq!(timeline.as_array().unwrap().len(), 4);

    let (status, _) = send(&app, "GET", "/api/candidates/9/timeline", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_filters_by_job_stage_and_search() {
    let app = app();
    create_job(&app, "Backend Engineer").await;
    create_job(&app, "Data Engineer").await;
    for (job_id, email) in [
        (1, "ada@example.com"),
        (1, "grace@navy.mil"),
        (2, "alan@example.com"),
    ] {
        create_candidate(&app, job_id, email).await;
    }
    send(
        &app,
        "PATCH",
        "/api/candidates/2",
        Some(json!({ "stage": "hired" })),
    )
    .await;

    let (_, page) = send(&app, "GET", "/api/candidates?jobId=1", None).await;
    assert_eq!(page["total"], 2);

    let (_, page) = send(&app, "GET", "/api/candidates?stage=hired", None).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["data"][0]["email"], "grace@navy.mil");

    let (_, page) = send(&app, "GET", "/api/candidates?search=EXAMPLE&pageSize=1", None).await;
    assert_eq!(page["total"], 2);
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn detail_includes_job_name() {
    let app = app();
    create_job(&app, "Backend Engineer").await;
    create_candidate(&app, 1, "ada@example.com").await;

    let (status, detail) = send(&app, "GET", "/api/candidates/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["jobName"], "Backend Engineer");
    assert_eq!(detail["name"], "Ada Lovelace");
}

#[tokio::test]
async fn dashboard_counts_everything() {
    let app = app();
    create_job(&app, "Backend Engineer").await;
    create_job(&app, "Data Engineer").await;
    send(
        &app,
        "PATCH",
        "/api/jobs/2",
        Some(json!({ "status": "archived" })),
    )
    .await;
    create_candidate(&app, 1, "ada@example.com").await;
    create_candidate(&app, 1, "grace@example.com").await;
    send(
        &app,
        "PATCH",
        "/api/candidates/2",
        Some(json!({ "stage": "offer" })),
    )
    .await;

    let (status, stats) = send(&app, "GET", "/api/dashboard/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalJobs"], 2);
    assert_eq!(stats["activeJobs"], 1);
    assert_eq!(stats["archivedJobs"], 1);
    assert_eq!(stats["totalCandidates"], 2);
    assert_eq!(stats["candidatesByStage"]["applied"], 1);
    assert_eq!(stats["candidatesByStage"]["offer"], 1);
    assert_eq!(stats["candidatesByStage"]["hired"], 0);
    assert_eq!(stats["totalAssessments"], 0);
}

#[tokio::test]
async fn padded_emails_are_trimmed_before_validation() {
    let app = app();
    create_job(&app, "Backend Engineer").await;

    let created = create_candidate(&app, 1, "  Ada@X.io ").await;
    assert_eq!(created["email"], "ada@x.io");

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/candidates/1",
        Some(json!({ "email": " Grace@X.io\t" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "grace@x.io");

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/candidates/1",
        Some(json!({ "email": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
