mod common;
mod support;

use actix_web::test;
use common::assert_problem_details_structure;
use serde_json::{json, Value};
use support::app_builder::sqlite_state;
use support::create_test_app;
use support::session::sign_in;

#[actix_web::test]
async fn create_then_fetch_goal() -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let (user_id, jar) = sign_in(&app, 21, "runner").await;

    let req = test::TestRequest::post()
        .uri("/api/goals")
        .cookie(jar.access_cookie())
        .set_json(json!({
            "title": "  Run a marathon  ",
            "description": "42km",
            "deadline": "2027-04-01T09:00:00Z"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["title"], "Run a marathon");
    assert_eq!(created["user_id"], user_id);
    assert_eq!(created["is_completed"], false);
    assert_eq!(created["deadline"], "2027-04-01T09:00:00Z");
    assert!(created["created_at"].is_string());

    let id = created["id"].as_i64().unwrap();
    let req = test::TestRequest::get()
        .uri(&format!("/api/goals/{id}"))
        .cookie(jar.access_cookie())
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);
    Ok(())
}

#[actix_web::test]
async fn list_returns_newest_first() -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let (_, jar) = sign_in(&app, 22, "lister").await;

    for title in ["first", "second", "third"] {
        let req = test::TestRequest::post()
            .uri("/api/goals")
            .cookie(jar.access_cookie())
            .set_json(json!({ "title": title }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 201);
    }

    let req = test::TestRequest::get()
        .uri("/api/goals")
        .cookie(jar.access_cookie())
        .to_request();
    let goals: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<&str> = goals.iter().map(|g| g["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["third", "second", "first"]);
    Ok(())
}

#[actix_web::test]
async fn goals_are_scoped_to_their_owner() -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let (_, owner) = sign_in(&app, 23, "owner").await;
    let (_, other) = sign_in(&app, 24, "other").await;

    let req = test::TestRequest::post()
        .uri("/api/goals")
        .cookie(owner.access_cookie())
        .set_json(json!({ "title": "private" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/goals/{}", created["id"]);

    let req = test::TestRequest::get()
        .uri("/api/goals")
        .cookie(other.access_cookie())
        .to_request();
    let listed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(listed.is_empty());

    let req = test::TestRequest::get()
        .uri(&uri)
        .cookie(other.access_cookie())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "GOAL_NOT_FOUND", None).await;

    let req = test::TestRequest::patch()
        .uri(&uri)
        .cookie(other.access_cookie())
        .set_json(json!({ "title": "hijacked" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "GOAL_NOT_FOUND", None).await;

    let req = test::TestRequest::delete()
        .uri(&uri)
        .cookie(other.access_cookie())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "GOAL_NOT_FOUND", None).await;

    // Untouched for the owner.
    let req = test::TestRequest::get()
        .uri(&uri)
        .cookie(owner.access_cookie())
        .to_request();
    let goal: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(goal["title"], "private");
    Ok(())
}

#[actix_web::test]
async fn partial_update_keeps_absent_fields_and_clears_nulls(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let (_, jar) = sign_in(&app, 25, "editor").await;

    let req = test::TestRequest::post()
        .uri("/api/goals")
        .cookie(jar.access_cookie())
        .set_json(json!({
            "title": "Read books",
            "description": "twelve",
            "deadline": "2027-12-31T23:59:59Z"
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/goals/{}", created["id"]);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .cookie(jar.access_cookie())
        .set_json(json!({ "is_completed": true }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["is_completed"], true);
    assert_eq!(updated["title"], "Read books");
    assert_eq!(updated["description"], "twelve");
    assert_eq!(updated["deadline"], "2027-12-31T23:59:59Z");

    let req = test::TestRequest::put()
        .uri(&uri)
        .cookie(jar.access_cookie())
        .set_json(json!({ "description": null, "deadline": null }))
        .to_request();
    let cleared: Value = test::call_and_read_body_json(&app, req).await;
    assert!(cleared["description"].is_null());
    assert!(cleared["deadline"].is_null());
    assert_eq!(cleared["title"], "Read books");
    assert_eq!(cleared["is_completed"], true);
    Ok(())
}

#[actix_web::test]
async fn empty_update_returns_goal_unchanged() -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let (_, jar) = sign_in(&app, 26, "idle").await;

    let req = test::TestRequest::post()
        .uri("/api/goals")
        .cookie(jar.access_cookie())
        .set_json(json!({ "title": "Stay put" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/goals/{}", created["id"]))
        .cookie(jar.access_cookie())
        .set_json(json!({}))
        .to_request();
    let same: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(same, created);
    Ok(())
}

#[actix_web::test]
async fn blank_titles_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let (_, jar) = sign_in(&app, 27, "blank").await;

    let req = test::TestRequest::post()
        .uri("/api/goals")
        .cookie(jar.access_cookie())
        .set_json(json!({ "title": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 422, "VALIDATION_ERROR", None).await;

    let req = test::TestRequest::post()
        .uri("/api/goals")
        .cookie(jar.access_cookie())
        .set_json(json!({ "title": "ok" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/goals/{}", created["id"]))
        .cookie(jar.access_cookie())
        .set_json(json!({ "title": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 422, "VALIDATION_ERROR", None).await;
    Ok(())
}

#[actix_web::test]
async fn bad_deadline_is_a_validation_error() -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let (_, jar) = sign_in(&app, 28, "late").await;

    let req = test::TestRequest::post()
        .uri("/api/goals")
        .cookie(jar.access_cookie())
        .set_json(json!({ "title": "t", "deadline": "tomorrow" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 422, "VALIDATION_ERROR", None).await;
    Ok(())
}

#[actix_web::test]
async fn delete_removes_goal() -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let (_, jar) = sign_in(&app, 29, "cleaner").await;

    let req = test::TestRequest::post()
        .uri("/api/goals")
        .cookie(jar.access_cookie())
        .set_json(json!({ "title": "temporary" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/goals/{}", created["id"]);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .cookie(jar.access_cookie())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Goal deleted");

    let req = test::TestRequest::delete()
        .uri(&uri)
        .cookie(jar.access_cookie())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "GOAL_NOT_FOUND", None).await;
    Ok(())
}

#[actix_web::test]
async fn invalid_goal_id_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let (_, jar) = sign_in(&app, 30, "typo").await;

    for raw in ["abc", "0", "-3"] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/goals/{raw}"))
            .cookie(jar.access_cookie())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_structure(resp, 400, "INVALID_GOAL_ID", None).await;
    }
    Ok(())
}

#[actix_web::test]
async fn goals_require_a_session() -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/api/goals").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 401, "UNAUTHORIZED_MISSING_CREDENTIAL", None).await;
    Ok(())
}
