//! Integration tests for the directory endpoints.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{FailingInsertBackend, TestApp};

async fn app_with_session() -> (TestApp, String) {
    let app = TestApp::new();
    let cookie = app.login_admin().await;
    (app, cookie)
}

#[tokio::test]
async fn test_create_list_and_delete_scenario() {
    let (app, cookie) = app_with_session().await;

    let docs = app.create_directory(&cookie, "Docs", None).await;
    let reports = app.create_directory(&cookie, "Reports", Some(docs)).await;
    assert_eq!((docs, reports), (1, 2));

    let roots = app
        .request("GET", "/api/directories", None, Some(&cookie))
        .await;
    assert_eq!(
        roots.body,
        json!([{ "id": 1, "name": "Docs", "parentId": null, "sortOrder": 1, "hasChildren": true }])
    );

    let children = app
        .request("GET", "/api/directories/1/children", None, Some(&cookie))
        .await;
    assert_eq!(children.status, StatusCode::OK);
    assert_eq!(
        children.body,
        json!([{ "id": 2, "name": "Reports", "parentId": 1, "sortOrder": 1, "hasChildren": false }])
    );

    let deleted = app
        .request("DELETE", "/api/directories/1", None, Some(&cookie))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let roots = app
        .request("GET", "/api/directories/tree", None, Some(&cookie))
        .await;
    assert_eq!(roots.body, json!([]));

    let gone = app
        .request("GET", "/api/directories/2/children", None, Some(&cookie))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_blank_name_is_bad_request() {
    let (app, cookie) = app_with_session().await;

    let response = app
        .request(
            "POST",
            "/api/directories",
            Some(json!({ "name": "   " })),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Directory name is required");
}

#[tokio::test]
async fn test_create_missing_parent_is_bad_request() {
    let (app, cookie) = app_with_session().await;

    let response = app
        .request(
            "POST",
            "/api/directories",
            Some(json!({ "name": "orphan", "parentId": 77 })),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].as_str().unwrap().contains("77"));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (app, cookie) = app_with_session().await;

    let response = app
        .request(
            "POST",
            "/api/directories",
            Some(json!({ "name": 5 })),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION");
}

#[tokio::test]
async fn test_post_move_without_sort_order_appends() {
    let (app, cookie) = app_with_session().await;
    let target = app.create_directory(&cookie, "target", None).await;
    app.create_directory(&cookie, "first", Some(target)).await;
    let mover = app.create_directory(&cookie, "mover", None).await;

    let response = app
        .request(
            "POST",
            &format!("/api/directories/{mover}/move"),
            Some(json!({ "parentId": target })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let children = app
        .request(
            "GET",
            &format!("/api/directories/{target}/children"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(children.body[1]["id"], mover);
    assert_eq!(children.body[1]["sortOrder"], 2);
}

#[tokio::test]
async fn test_post_move_to_missing_parent_creates_placeholder() {
    let (app, cookie) = app_with_session().await;
    let mover = app.create_directory(&cookie, "mover", None).await;

    let response = app
        .request(
            "POST",
            &format!("/api/directories/{mover}/move"),
            Some(json!({ "parentId": 999, "sortOrder": 3 })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let roots = app
        .request("GET", "/api/directories", None, Some(&cookie))
        .await;
    let roots = roots.body.as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["name"], "Placeholder directory 999");
    assert_eq!(roots[0]["hasChildren"], true);
}

#[tokio::test]
async fn test_post_move_without_position_to_missing_parent_is_not_found() {
    let (app, cookie) = app_with_session().await;
    let mover = app.create_directory(&cookie, "mover", None).await;

    let response = app
        .request(
            "POST",
            &format!("/api/directories/{mover}/move"),
            Some(json!({ "parentId": 999 })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["code"], "NOT_FOUND");

    let roots = app
        .request("GET", "/api/directories", None, Some(&cookie))
        .await;
    assert_eq!(
        roots.body,
        json!([{ "id": mover, "name": "mover", "parentId": null, "sortOrder": 1, "hasChildren": false }])
    );
}

#[tokio::test]
async fn test_create_store_failure_is_server_error() {
    let app = TestApp::with_backend(Arc::new(FailingInsertBackend::default()));
    let cookie = app.login_admin().await;

    let response = app
        .request(
            "POST",
            "/api/directories",
            Some(json!({ "name": "Docs" })),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        response.body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to create directory:")
    );
}

#[tokio::test]
async fn test_create_name_too_long_is_bad_request() {
    let (app, cookie) = app_with_session().await;

    let response = app
        .request(
            "POST",
            "/api/directories",
            Some(json!({ "name": "d".repeat(256) })),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_post_move_unknown_node_is_not_found() {
    let (app, cookie) = app_with_session().await;

    let response = app
        .request(
            "POST",
            "/api/directories/42/move",
            Some(json!({ "sortOrder": 1 })),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_move_beneath_descendant_is_rejected() {
    let (app, cookie) = app_with_session().await;
    let top = app.create_directory(&cookie, "top", None).await;
    let child = app.create_directory(&cookie, "child", Some(top)).await;

    let response = app
        .request(
            "POST",
            &format!("/api/directories/{top}/move"),
            Some(json!({ "parentId": child, "sortOrder": 1 })),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reorder_skips_unknown_ids() {
    let (app, cookie) = app_with_session().await;
    let a = app.create_directory(&cookie, "a", None).await;
    let b = app.create_directory(&cookie, "b", None).await;

    let response = app
        .request(
            "PUT",
            "/api/directories/order",
            Some(json!([
                { "id": b, "sortOrder": 1 },
                { "id": a, "sortOrder": 2 },
                { "id": 404, "sortOrder": 3 }
            ])),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let roots = app
        .request("GET", "/api/directories", None, Some(&cookie))
        .await;
    let names: Vec<&str> = roots
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[tokio::test]
async fn test_put_move_uses_path_id_and_ignores_unknown() {
    let (app, cookie) = app_with_session().await;
    let parent = app.create_directory(&cookie, "parent", None).await;
    let node = app.create_directory(&cookie, "node", None).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/directories/{node}/move"),
            Some(json!({ "id": parent, "parentId": parent, "sortOrder": 5 })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let children = app
        .request(
            "GET",
            &format!("/api/directories/{parent}/children"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(children.body[0]["id"], node);
    assert_eq!(children.body[0]["sortOrder"], 5);

    let unknown = app
        .request(
            "PUT",
            "/api/directories/9999/move",
            Some(json!({ "sortOrder": 1 })),
            Some(&cookie),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::OK);
}

#[tokio::test]
async fn test_rename_directory() {
    let (app, cookie) = app_with_session().await;
    let id = app.create_directory(&cookie, "old", None).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/directories/{id}"),
            Some(json!({ "name": "new" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "new");

    let blank = app
        .request(
            "PUT",
            &format!("/api/directories/{id}"),
            Some(json!({ "name": "" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_subtree_endpoint() {
    let (app, cookie) = app_with_session().await;
    let root = app.create_directory(&cookie, "root", None).await;
    let mid = app.create_directory(&cookie, "mid", Some(root)).await;
    app.create_directory(&cookie, "leaf", Some(mid)).await;

    let response = app
        .request(
            "GET",
            &format!("/api/directories/{root}/tree"),
            None,
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "root");
    assert_eq!(response.body["children"][0]["name"], "mid");
    assert_eq!(response.body["children"][0]["children"][0]["name"], "leaf");
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    let (app, cookie) = app_with_session().await;

    let response = app
        .request("GET", "/api/directories/abc/children", None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_unknown_is_not_found() {
    let (app, cookie) = app_with_session().await;

    let response = app
        .request("DELETE", "/api/directories/5", None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
