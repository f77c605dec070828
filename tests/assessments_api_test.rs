mod common;

use axum::http::StatusCode;
use serde_json::{json, Value as JsonValue};

use common::{app, create_candidate, create_job, send};

fn relocation_assessment() -> JsonValue {
    json!({
        "title": "Screening",
        "sections": [{
            "id": "s1",
            "title": "Logistics",
            "questions": [
                {
                    "id": "q1",
                    "type": "single-choice",
                    "text": "Willing to relocate?",
                    "required": true,
                    "options": ["Yes", "No"]
                },
                {
                    "id": "q2",
                    "type": "short-text",
                    "text": "Preferred city",
                    "required": true,
                    "maxLength": 20,
                    "conditional": { "questionId": "q1", "value": "Yes" }
                },
                {
                    "id": "q3",
                    "type": "numeric",
                    "text": "Years of Rust",
                    "range": { "min": 0, "max": 40 }
                }
            ]
        }]
    })
}

async fn seeded() -> axum::Router {
    let app = app();
    create_job(&app, "Backend Engineer").await;
    create_candidate(&app, 1, "ada@example.com").await;
    let (status, created) = send(
        &app,
        "PUT",
        "/api/assessments/1",
        Some(relocation_assessment()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["isActive"], true);
    app
}

#[tokio::test]
async fn upsert_creates_then_replaces() {
    let app = seeded().await;

    let mut body = relocation_assessment();
    body["id"] = json!(1);
    body["title"] = json!("Screening v2");
    let (status, updated) = send(&app, "PUT", "/api/assessments/1", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Screening v2");

    let (status, _) = send(&app, "PUT", "/api/assessments/2", Some(body.clone())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    body["id"] = json!(5);
    let (status, _) = send(&app, "PUT", "/api/assessments/1", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, "GET", "/api/assessments/1", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    let (status, _) = send(&app, "GET", "/api/assessments/2/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upsert_rejects_bad_structures() {
    let app = seeded().await;

    let mut dangling = relocation_assessment();
    dangling["sections"][0]["questions"][1]["conditional"]["questionId"] = json!("missing");
    let (status, _) = send(&app, "PUT", "/api/assessments/1", Some(dangling)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut unknown_kind = relocation_assessment();
    unknown_kind["sections"][0]["questions"][0]["type"] = json!("essay");
    let (status, _) = send(&app, "PUT", "/api/assessments/1", Some(unknown_kind)).await;
    assert!(status.is_client_error());

    let (status, _) = send(
        &app,
        "PUT",
        "/api/assessments/1",
        Some(json!({ "title": "No sections" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn submission_follows_conditional_visibility() {
    let app = seeded().await;

    let (status, saved) = send(
        &app,
        "POST",
        "/api/assessments/1/1/submit",
        Some(json!({ "candidateId": 1, "answers": { "q1": "No" } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["status"], "completed");
    assert_eq!(saved["jobId"], 1);

    let (status, body) = send(
        &app,
        "POST",
        "/api/assessments/1/1/submit",
        Some(json!({ "candidateId": 1, "answers": { "q1": "Yes" } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("q2"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/assessments/1/1/submit",
        Some(json!({ "candidateId": 1, "answers": { "q1": "Yes", "q2": "Lisbon", "q3": 4 } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    for answers in [
        json!({ "q1": "Maybe" }),
        json!({ "q1": "No", "q3": 41 }),
        json!({ "q1": "No", "q9": "extra" }),
    ] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/assessments/1/1/submit",
            Some(json!({ "candidateId": 1, "answers": answers })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, _) = send(
        &app,
        "POST",
        "/api/assessments/1/1/submit",
        Some(json!({ "answers": { "q1": "No" } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/assessments/1/1/submit",
        Some(json!({ "candidateId": 40, "answers": { "q1": "No" } })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, responses) = send(&app, "GET", "/api/assessments/1/1/responses", None).await;
    assert_eq!(responses.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn candidate_responses_are_flattened() {
    let app = seeded().await;
    send(
        &app,
        "POST",
        "/api/assessments/1/1/submit",
        Some(json!({ "candidateId": 1, "answers": { "q1": "Yes", "q2": "Lisbon" } })),
    )
    .await;

    let (status, summaries) = send(&app, "GET", "/api/candidates/1/responses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summaries[0]["assessmentId"], 1);
    assert_eq!(summaries[0]["assessmentTitle"], "Screening");
    assert_eq!(
        summaries[0]["responses"],
        json!([
            { "question": "Willing to relocate?", "answer": "Yes" },
            { "question": "Preferred city", "answer": "Lisbon" }
        ])
    );
}

#[tokio::test]
async fn deleting_responses_and_assessments() {
    let app = seeded().await;

    let (status, _) = send(&app, "DELETE", "/api/assessments/1/1/responses", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(
        &app,
        "POST",
        "/api/assessments/1/1/submit",
        Some(json!({ "candidateId": 1, "answers": { "q1": "No" } })),
    )
    .await;
    let (status, body) = send(&app, "DELETE", "/api/assessments/1/1/responses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let (_, responses) = send(&app, "GET", "/api/assessments/1/1/responses", None).await;
    assert!(responses.as_array().unwrap().is_empty());

    let (status, _) = send(&app, "DELETE", "/api/assessments/2/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", "/api/assessments/1/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", "/api/assessments/1/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
