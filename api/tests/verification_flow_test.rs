//! End-to-end KYC flows: document submission and the admin review cycle.

mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use common::{harness, login_token, register_user, update_user, TestHarness};
use pt_api::app::create_app;

const OWNER_EMAIL: &str = "trader@example.com";
const ADMIN_EMAIL: &str = "admin@example.com";
const PASSWORD: &str = "correct-horse-battery";

fn identity_submission() -> Value {
    json!({
        "kind": "identity",
        "document_type": "passport",
        "front_document": "uploads/passport-front.png",
        "back_document": "uploads/passport-back.png",
        "country": "NL",
        "region": "Noord-Holland",
        "address": "Keizersgracht 1, Amsterdam",
    })
}

/// Registers the owner with a verified email and returns their token
async fn verified_owner(h: &TestHarness) -> String {
    register_user(h, OWNER_EMAIL, PASSWORD, "Trader").await;
    update_user(&h.backend, OWNER_EMAIL, |user| {
        user.verify_email();
    });
    login_token(h, OWNER_EMAIL, PASSWORD).await
}

/// Registers an admin account and returns their token
async fn admin(h: &TestHarness) -> String {
    register_user(h, ADMIN_EMAIL, PASSWORD, "Admin").await;
    update_user(&h.backend, ADMIN_EMAIL, |user| {
        user.is_admin = true;
    });
    login_token(h, ADMIN_EMAIL, PASSWORD).await
}

/// Submits the standard identity record and returns its id
async fn submitted_record_id(h: &TestHarness, token: &str) -> String {
    let app = test::init_service(create_app(h.state.clone())).await;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/verification/submit")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(identity_submission())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    body["data"]["id"].as_str().unwrap().to_string()
}

#[actix_web::test]
async fn test_submit_requires_verified_email() {
    let h = harness();
    register_user(&h, OWNER_EMAIL, PASSWORD, "Trader").await;
    let token = login_token(&h, OWNER_EMAIL, PASSWORD).await;
    let app = test::init_service(create_app(h.state.clone())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/verification/submit")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(identity_submission())
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        json!("Email must be verified before submitting verification documents")
    );
}

#[actix_web::test]
async fn test_submit_creates_pending_record() {
    let h = harness();
    let token = verified_owner(&h).await;
    let app = test::init_service(create_app(h.state.clone())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/verification/submit")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(identity_submission())
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], json!(true));
    assert_eq!(body["data"]["kind"], json!("identity"));
    assert_eq!(body["data"]["document_type"], json!("passport"));
    assert_eq!(body["data"]["status"], json!("pending"));
    assert!(body["data"]["reviewed_at"].is_null());

    assert_eq!(h.backend.records.lock().unwrap().len(), 1);
    let notifications = h.backend.notifications.lock().unwrap();
    assert!(notifications
        .iter()
        .any(|n| n.title == "Verification submitted"));
}

#[actix_web::test]
async fn test_submit_identity_requires_address_fields() {
    let h = harness();
    let token = verified_owner(&h).await;
    let app = test::init_service(create_app(h.state.clone())).await;

    let mut submission = identity_submission();
    submission.as_object_mut().unwrap().remove("country");
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/verification/submit")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(submission)
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Required field: country"));
}

#[actix_web::test]
async fn test_resubmit_while_pending_is_noop() {
    let h = harness();
    let token = verified_owner(&h).await;
    submitted_record_id(&h, &token).await;
    let app = test::init_service(create_app(h.state.clone())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/verification/submit")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(identity_submission())
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        json!("Your verification is already under review")
    );
    assert_eq!(h.backend.records.lock().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_review_requires_admin() {
    let h = harness();
    let token = verified_owner(&h).await;
    let record_id = submitted_record_id(&h, &token).await;
    let app = test::init_service(create_app(h.state.clone())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/verification/{}/review", record_id))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "decision": "verified" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Insufficient permissions"));
}

#[actix_web::test]
async fn test_admin_approval_stamps_identity() {
    let h = harness();
    let owner_token = verified_owner(&h).await;
    let record_id = submitted_record_id(&h, &owner_token).await;
    let admin_token = admin(&h).await;
    let app = test::init_service(create_app(h.state.clone())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/verification/{}/review", record_id))
            .insert_header(("Authorization", format!("Bearer {}", admin_token)))
            .set_json(json!({ "decision": "verified" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], json!("verified"));
    assert!(body["data"]["reviewed_at"].is_string());

    let users = h.backend.users.lock().unwrap();
    let owner = users
        .values()
        .find(|user| user.email == OWNER_EMAIL)
        .expect("owner stored");
    assert!(owner.id_verified_at.is_some());
    drop(users);

    let notifications = h.backend.notifications.lock().unwrap();
    let reviewed = notifications
        .iter()
        .find(|n| n.title == "Verification reviewed")
        .expect("review notification stored");
    assert!(reviewed.body.contains("approved"));
}

#[actix_web::test]
async fn test_review_twice_conflicts() {
    let h = harness();
    let owner_token = verified_owner(&h).await;
    let record_id = submitted_record_id(&h, &owner_token).await;
    let admin_token = admin(&h).await;
    let app = test::init_service(create_app(h.state.clone())).await;

    for expected in [StatusCode::OK, StatusCode::CONFLICT] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/verification/{}/review", record_id))
                .insert_header(("Authorization", format!("Bearer {}", admin_token)))
                .set_json(json!({ "decision": "verified" }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), expected);
    }
}

#[actix_web::test]
async fn test_review_unknown_record() {
    let h = harness();
    let admin_token = admin(&h).await;
    let app = test::init_service(create_app(h.state.clone())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!(
                "/api/v1/verification/{}/review",
                uuid::Uuid::new_v4()
            ))
            .insert_header(("Authorization", format!("Bearer {}", admin_token)))
            .set_json(json!({ "decision": "verified" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        json!("Resource not found: verification record")
    );
}

#[actix_web::test]
async fn test_review_rejects_unknown_decision() {
    let h = harness();
    let owner_token = verified_owner(&h).await;
    let record_id = submitted_record_id(&h, &owner_token).await;
    let admin_token = admin(&h).await;
    let app = test::init_service(create_app(h.state.clone())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/verification/{}/review", record_id))
            .insert_header(("Authorization", format!("Bearer {}", admin_token)))
            .set_json(json!({ "decision": "banana" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Invalid value for decision: banana"));
}

#[actix_web::test]
async fn test_review_rejects_malformed_record_id() {
    let h = harness();
    let admin_token = admin(&h).await;
    let app = test::init_service(create_app(h.state.clone())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/verification/not-a-uuid/review")
            .insert_header(("Authorization", format!("Bearer {}", admin_token)))
            .set_json(json!({ "decision": "verified" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Invalid path parameter"));
}

#[actix_web::test]
async fn test_rejected_record_can_be_resubmitted() {
    let h = harness();
    let owner_token = verified_owner(&h).await;
    let record_id = submitted_record_id(&h, &owner_token).await;
    let admin_token = admin(&h).await;
    let app = test::init_service(create_app(h.state.clone())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/verification/{}/review", record_id))
            .insert_header(("Authorization", format!("Bearer {}", admin_token)))
            .set_json(json!({ "decision": "reject", "note": "Blurry scan" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], json!("reject"));
    assert_eq!(body["data"]["note"], json!("Blurry scan"));

    let new_id = submitted_record_id(&h, &owner_token).await;
    assert_ne!(new_id, record_id);
    // The replacement leaves a single record for the user
    assert_eq!(h.backend.records.lock().unwrap().len(), 1);
}
