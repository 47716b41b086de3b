#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use common::TestContext;
use serde_json::{json, Value};
use uuid::Uuid;

#[actix_web::test]
async fn test_get_own_profile_includes_email() {
    let ctx = TestContext::new();
    let (me, auth) = ctx.seed_user("me@example.com", &["chess"]).await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/profile/me")
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], me.to_string());
    assert_eq!(body["email"], "me@example.com");
    assert_eq!(body["interests"], json!(["chess"]));
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password_hash").is_none());
}

#[actix_web::test]
async fn test_public_profile_hides_email() {
    let ctx = TestContext::new();
    let (other, _) = ctx.seed_user("other@example.com", &[]).await;
    let app = test_app!(ctx);

    // no token needed
    let req = test::TestRequest::get()
        .uri(&format!("/api/profile/{}", other))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], other.to_string());
    assert!(body.get("email").is_none());
}

#[actix_web::test]
async fn test_public_profile_unknown_or_malformed_id() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    for uri in [
        format!("/api/profile/{}", Uuid::new_v4()),
        "/api/profile/12345".to_string(),
    ] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[actix_web::test]
async fn test_update_profile() {
    let ctx = TestContext::new();
    let (_, auth) = ctx.seed_user("me@example.com", &[]).await;
    let app = test_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/profile/me")
        .insert_header(("Authorization", auth))
        .set_json(json!({
            "name": "  Ada Lovelace ",
            "headline": "Analyst",
            "photoUrl": "https://img.example.com/ada.png",
            "interests": ["math", " math", "", "poetry"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Ada Lovelace");
    assert_eq!(body["headline"], "Analyst");
    assert_eq!(body["photoUrl"], "https://img.example.com/ada.png");
    assert_eq!(body["interests"], json!(["math", "poetry"]));
    // bio was not sent, so it is cleared
    assert_eq!(body["bio"], Value::Null);
}

#[actix_web::test]
async fn test_update_profile_reports_all_field_errors() {
    let ctx = TestContext::new();
    let (_, auth) = ctx.seed_user("me@example.com", &[]).await;
    let app = test_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/profile/me")
        .insert_header(("Authorization", auth))
        .set_json(json!({"name": "", "photoUrl": "not a url"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "photoUrl"]);
}

#[actix_web::test]
async fn test_malformed_body_is_a_validation_error() {
    let ctx = TestContext::new();
    let (_, auth) = ctx.seed_user("me@example.com", &[]).await;
    let app = test_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/profile/me")
        .insert_header(("Authorization", auth))
        .set_json(json!({"name": "Ada", "interests": "not-a-list"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], "body");
}

#[actix_web::test]
async fn test_delete_account_removes_edges() {
    let ctx = TestContext::new();
    let (_, auth) = ctx.seed_user("me@example.com", &[]).await;
    let (other, other_auth) = ctx.seed_user("other@example.com", &[]).await;
    let app = test_app!(ctx);

    // other -> me and me -> other
    let me_id = {
        let req = test::TestRequest::get()
            .uri("/api/profile/me")
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        body["id"].as_str().unwrap().to_string()
    };
    for (uri, token) in [
        (format!("/api/profile/{}/follow", other), auth.clone()),
        (format!("/api/profile/{}/like", me_id), other_auth.clone()),
    ] {
        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header(("Authorization", token))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
    assert_eq!(ctx.store.edge_count().await, 2);

    let req = test::TestRequest::delete()
        .uri("/api/profile/me")
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(ctx.store.edge_count().await, 0);

    let req = test::TestRequest::get()
        .uri("/api/profile/me")
        .insert_header(("Authorization", auth))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    // the deleted user no longer shows up in anyone's feed
    let req = test::TestRequest::get()
        .uri("/api/feed")
        .insert_header(("Authorization", other_auth))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pagination"]["total"], 0);
}
