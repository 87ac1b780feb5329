
use std::sync::Arc;

use actix_web::{http::StatusCode, test};
use nextmile_backend::{errors::AppError, repositories::ExperienceBackend};
use serde_json::{json, Value};
use test_utils::{experience_json, InMemoryStore, MockExperienceRepo, StateBuilder};

#[actix_rt::test]
async fn lists_static_experiences_newest_first() {
    let app = test_app!(StateBuilder::with_static_data().build());

    let req = test::TestRequest::get().uri("/api/experience").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);

    let data = body["data"].as_array().unwrap();
    assert_eq!(body["count"], data.len());
    let starts: Vec<&str> = data.iter().map(|e| e["startDate"].as_str().unwrap()).collect();
    let mut sorted = starts.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(starts, sorted);
}

#[actix_rt::test]
async fn ascending_order_on_request() {
    let app = test_app!(StateBuilder::with_static_data().build());

    let req = test::TestRequest::get().uri("/api/experience?order=asc").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let starts: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["startDate"].as_str().unwrap())
        .collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);
}

#[actix_rt::test]
async fn repeated_listing_is_stable() {
    let app = test_app!(StateBuilder::with_static_data().build());

    let first: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/experience").to_request(),
    )
    .await;
    let _: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/experience?order=asc").to_request(),
    )
    .await;
    let again: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/experience").to_request(),
    )
    .await;

    assert_eq!(first, again);
}

#[actix_rt::test]
async fn company_search_is_case_insensitive() {
    let app = test_app!(StateBuilder::with_static_data().build());

    let req = test::TestRequest::get().uri("/api/experience/company/baidu").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["count"].as_u64().unwrap() >= 1);
    for record in body["data"].as_array().unwrap() {
        let company = record["company"].as_str().unwrap().to_lowercase();
        assert!(company.contains("baidu"));
    }
}

#[actix_rt::test]
async fn company_search_without_match_is_empty() {
    let app = test_app!(StateBuilder::with_static_data().build());

    let req = test::TestRequest::get().uri("/api/experience/company/nobody").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, json!({"success": true, "data": [], "count": 0}));
}

#[actix_rt::test]
async fn unknown_experience_is_not_found() {
    let app = test_app!(StateBuilder::with_static_data().build());

    let req = test::TestRequest::get().uri("/api/experience/nonexistent-id").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"success": false, "error": "Experience not found"}));
}

#[actix_rt::test]
async fn static_backend_refuses_mutations() {
    let app = test_app!(StateBuilder::with_static_data().build());

    let create = test::TestRequest::post()
        .uri("/api/experience")
        .set_json(experience_json())
        .to_request();
    let resp = test::call_service(&app, create).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);

    let delete = test::TestRequest::delete().uri("/api/experience/1").to_request();
    let resp = test::call_service(&app, delete).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let still_there = test::TestRequest::get().uri("/api/experience/1").to_request();
    let resp = test::call_service(&app, still_there).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn create_then_fetch_round_trips() {
    let store = InMemoryStore::new();
    let app = test_app!(StateBuilder::with_store(store.clone()).build());

    let req = test::TestRequest::post()
        .uri("/api/experience")
        .set_json(experience_json())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Value = test::read_body_json(resp).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    assert!(created["data"]["createdAt"].is_string());
    assert_eq!(created["data"]["company"], "Baidu Inc.");
    assert_eq!(created["data"]["endDate"], "2025-03-31");

    let req = test::TestRequest::get().uri(&format!("/api/experience/{id}")).to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["data"], created["data"]);
    assert_eq!(store.experience_count(), 1);
}

#[actix_rt::test]
async fn create_without_end_date_requires_current_job() {
    let store = InMemoryStore::new();
    let app = test_app!(StateBuilder::with_store(store.clone()).build());

    let mut payload = experience_json();
    payload.as_object_mut().unwrap().remove("endDate");

    let req = test::TestRequest::post().uri("/api/experience").set_json(&payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("endDate"));
    assert_eq!(store.experience_count(), 0);

    payload["isCurrentJob"] = json!(true);
    let req = test::TestRequest::post().uri("/api/experience").set_json(&payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_rt::test]
async fn whitespace_only_text_is_rejected() {
    let store = InMemoryStore::new();
    let app = test_app!(StateBuilder::with_store(store.clone()).build());

    let mut payload = experience_json();
    payload["description"] = json!("   ");
    payload["duration"] = json!("  ");

    let req = test::TestRequest::post().uri("/api/experience").set_json(&payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("description") && error.contains("duration"), "{error}");
    assert_eq!(store.experience_count(), 0);
}

#[actix_rt::test]
async fn current_job_ignores_end_date_text() {
    let app = test_app!(StateBuilder::with_store(InMemoryStore::new()).build());

    let mut payload = experience_json();
    payload["isCurrentJob"] = json!(true);
    payload["endDate"] = json!("Present");

    let req = test::TestRequest::post().uri("/api/experience").set_json(&payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"].get("endDate").is_none());
    assert_eq!(body["data"]["isCurrentJob"], true);
}

#[actix_rt::test]
async fn validation_reports_every_violation() {
    let app = test_app!(StateBuilder::with_store(InMemoryStore::new()).build());

    let req = test::TestRequest::post()
        .uri("/api/experience")
        .set_json(json!({"company": "", "achievements": [""]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let error = body["error"].as_str().unwrap();
    for field in ["achievements", "company", "description", "duration", "position", "startDate"] {
        assert!(error.contains(field), "missing {field} in {error}");
    }
}

#[actix_rt::test]
async fn partial_update_merges_and_revalidates() {
    let store = InMemoryStore::new();
    let app = test_app!(StateBuilder::with_store(store).build());

    let req = test::TestRequest::post()
        .uri("/api/experience")
        .set_json(experience_json())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/experience/{id}"))
        .set_json(json!({"position": "Research Intern", "location": null}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["data"]["position"], "Research Intern");
    assert_eq!(updated["data"]["company"], "Baidu Inc.");
    assert!(updated["data"].get("location").is_none());
    assert_eq!(updated["data"]["createdAt"], created["data"]["createdAt"]);

    // Clearing the end date of a finished job breaks the conditional rule
    let req = test::TestRequest::put()
        .uri(&format!("/api/experience/{id}"))
        .set_json(json!({"endDate": null}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn update_of_missing_record_is_not_found() {
    let app = test_app!(StateBuilder::with_store(InMemoryStore::new()).build());

    let req = test::TestRequest::put()
        .uri("/api/experience/6f1c1c4e-5d0b-4c1b-9a55-6f3f0f5b9d10")
        .set_json(json!({"position": "Anything"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Experience not found");
}

#[actix_rt::test]
async fn delete_twice_is_not_found_the_second_time() {
    let app = test_app!(StateBuilder::with_store(InMemoryStore::new()).build());

    let req = test::TestRequest::post()
        .uri("/api/experience")
        .set_json(experience_json())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete().uri(&format!("/api/experience/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"success": true, "message": "Experience deleted successfully"}));

    let req = test::TestRequest::delete().uri(&format!("/api/experience/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn malformed_json_is_a_bad_request() {
    let app = test_app!(StateBuilder::with_store(InMemoryStore::new()).build());

    let req = test::TestRequest::post()
        .uri("/api/experience")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"company\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);

    let req = test::TestRequest::post()
        .uri("/api/experience")
        .set_json(json!({"isCurrentJob": "yes"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn backend_failure_is_generic_500() {
    let mut repo = MockExperienceRepo::new();
    repo.expect_find_all_experiences()
        .returning(|_| Err(AppError::InternalError("connection reset by peer".into())));

    let state = StateBuilder::with_store(InMemoryStore::new())
        .experiences(ExperienceBackend::persistent(Arc::new(repo)))
        .build();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/experience").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"success": false, "error": "Something went wrong!"}));
}

#[actix_rt::test]
async fn company_search_delegates_to_repository() {
    let mut repo = MockExperienceRepo::new();
    repo.expect_find_experiences_by_company()
        .withf(|company| company == "apple")
        .times(1)
        .returning(|_| Ok(vec![]));

    let state = StateBuilder::with_store(InMemoryStore::new())
        .experiences(ExperienceBackend::persistent(Arc::new(repo)))
        .build();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/experience/company/apple").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
