//! End-to-end tests driving the relay router against a fake GitHub API
//! served from the same process.

use axum::body::Body;
use axum::extract::Path;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, patch};
use axum::{Json, Router};
use tower::ServiceExt;

/// Minimal stand-in for the GitHub REST API. Owner names select the
/// upstream behavior: "missing" yields 404, "forbidden" yields 403.
fn fake_github() -> Router {
    async fn pr_files(
        Path((owner, _repo, _number)): Path<(String, String, u64)>,
    ) -> axum::response::Response {
        if owner == "missing" {
            return (StatusCode::NOT_FOUND, Json(serde_json::json!({"message": "Not Found"})))
                .into_response();
        }
        Json(serde_json::json!([
            {"filename": "a.py", "changes": 3, "patch": "@@ -1 +1 @@", "status": "modified"},
            {"filename": "logo.png", "changes": 0, "status": "added"}
        ]))
        .into_response()
    }

    async fn update_pr(
        Path((owner, _repo, number)): Path<(String, String, u64)>,
        Json(payload): Json<serde_json::Value>,
    ) -> axum::response::Response {
        if owner == "forbidden" {
            return (StatusCode::FORBIDDEN, Json(serde_json::json!({"message": "Forbidden"})))
                .into_response();
        }
        if payload.get("body").and_then(|b| b.as_str()).is_none() {
            return (StatusCode::UNPROCESSABLE_ENTITY, "missing body field").into_response();
        }
        Json(serde_json::json!({"number": number})).into_response()
    }

    Router::new()
        .route("/repos/:owner/:repo/pulls/:number/files", get(pr_files))
        .route("/repos/:owner/:repo/pulls/:number", patch(update_pr))
}

/// Bind the fake upstream on an ephemeral port and return a relay router
/// configured to talk to it.
async fn relay_app() -> Router {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let upstream_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, fake_github()).await.unwrap();
    });

    let github = pr_relay::github::GitHubClient::new("test-token".to_string(), upstream_url);
    pr_relay::server::router(pr_relay::server::AppState { github })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_files_reshapes_upstream_records() {
    let app = relay_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/pr/files?pr_url=https://github.com/acme/widgets/pull/42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        serde_json::json!({
            "files": [
                {"filename": "a.py", "changes": 3, "patch": "@@ -1 +1 @@"},
                {"filename": "logo.png", "changes": 0, "patch": "No patch available"}
            ]
        })
    );
}

#[tokio::test]
async fn test_list_files_mirrors_upstream_404() {
    let app = relay_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/pr/files?pr_url=https://github.com/missing/widgets/pull/42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to fetch PR files");
}

#[tokio::test]
async fn test_update_description_success_message() {
    let app = relay_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/pr?pr_url=https://github.com/acme/widgets/pull/42")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"description": "New description"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Successfully updated PR #42 description."
    );
}

#[tokio::test]
async fn test_update_description_mirrors_upstream_403() {
    let app = relay_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/pr?pr_url=https://github.com/forbidden/widgets/pull/7")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"description": "nope"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to update PR description");
}
