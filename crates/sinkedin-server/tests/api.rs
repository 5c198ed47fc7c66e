//! In-process API tests driving the router with `tower::ServiceExt`.

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use sinkedin_server::{router, AppState};

fn app() -> Router {
    router(AppState::new(Duration::from_secs(3600)))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, username: &str) -> Value {
    let (status, user) = send(
        app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({
            "username": username,
            "password": "secret1",
            "name": "Test User",
            "role": "Engineer",
            "avatar": "avatar.png",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    user
}

async fn login(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": username, "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_assigns_sequential_ids_in_creation_order() {
    let app = app();
    let first = register(&app, "ada").await;
    let second = register(&app, "grace").await;
    assert_eq!(first["id"], 1);
    assert_eq!(second["id"], 2);
    assert!(first.get("password").is_none());

    let (status, users) = send(&app, Method::GET, "/api/users", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["username"], "ada");
    assert_eq!(users[1]["username"], "grace");
}

#[tokio::test]
async fn register_validates_fields() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({
            "username": "ab",
            "password": "12345",
            "name": "",
            "role": "Engineer",
            "avatar": "a.png",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let errors = body["error"]["errors"].as_array().unwrap();
    let fields: Vec<&str> = errors.iter().map(|e| e["field"].as_str().unwrap()).collect();
    assert!(fields.contains(&"username"));
    assert!(fields.contains(&"password"));
    assert!(fields.contains(&"name"));
}

#[tokio::test]
async fn duplicate_username_is_conflict() {
    let app = app();
    register(&app, "ada").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({
            "username": "ada",
            "password": "secret1",
            "name": "Other",
            "role": "Engineer",
            "avatar": "b.png",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "username already taken");
}

#[tokio::test]
async fn get_user_returns_404_when_absent() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/users/42", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn get_user_by_id() {
    let app = app();
    register(&app, "ada").await;
    let (status, user) = send(&app, Method::GET, "/api/users/1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["username"], "ada");
    assert!(user.get("password").is_none());
}

#[tokio::test]
async fn login_with_bad_credentials_is_401() {
    let app = app();
    register(&app, "ada").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "ada", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "nobody", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unauthenticated_post_is_401_and_creates_nothing() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/posts",
        None,
        Some(json!({ "content": "an unauthenticated story" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, posts) = send(&app, Method::GET, "/api/posts", None, None).await;
    assert!(posts.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn post_content_length_boundary() {
    let app = app();
    register(&app, "ada").await;
    let token = login(&app, "ada").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&token),
        Some(json!({ "content": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["errors"][0]["field"], "content");

    // Exactly 10 characters is accepted.
    let (status, post) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&token),
        Some(json!({ "content": "0123456789" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["content"], "0123456789");
    assert_eq!(post["userId"], 1);
}

#[tokio::test]
async fn post_author_comes_from_session_not_body() {
    let app = app();
    register(&app, "ada").await;
    register(&app, "grace").await;
    let token = login(&app, "grace").await;

    // A client-supplied userId is ignored; serde drops unknown fields and
    // the store gets the session identity.
    let (status, post) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&token),
        Some(json!({ "content": "a story by grace", "userId": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["userId"], 2);
}

#[tokio::test]
async fn comments_are_scoped_to_their_post() {
    let app = app();
    register(&app, "ada").await;
    let token = login(&app, "ada").await;

    let (_, first) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&token),
        Some(json!({ "content": "the first story" })),
    )
    .await;
    let (_, second) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&token),
        Some(json!({ "content": "the second story" })),
    )
    .await;

    for (post, content) in [
        (&first, "comment on one"),
        (&second, "comment on two"),
        (&first, "another on one"),
    ] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/comments",
            Some(&token),
            Some(json!({ "postId": post["id"], "content": content })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let uri = format!("/api/posts/{}/comments", first["id"]);
    let (status, comments) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    let comments = comments.as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "comment on one");
    assert_eq!(comments[1]["content"], "another on one");
}

#[tokio::test]
async fn duplicate_like_is_not_observable() {
    let app = app();
    register(&app, "ada").await;
    let token = login(&app, "ada").await;

    let (_, post) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&token),
        Some(json!({ "content": "a likeable story" })),
    )
    .await;

    let like_body = json!({ "postId": post["id"] });
    let (status, first) = send(
        &app,
        Method::POST,
        "/api/likes",
        Some(&token),
        Some(like_body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, second) = send(
        &app,
        Method::POST,
        "/api/likes",
        Some(&token),
        Some(like_body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], second["id"]);

    let uri = format!("/api/posts/{}/likes", post["id"]);
    let (_, likes) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(likes.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unlike_is_idempotent() {
    let app = app();
    register(&app, "ada").await;
    let token = login(&app, "ada").await;

    let (_, post) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&token),
        Some(json!({ "content": "a likeable story" })),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/api/likes",
        Some(&token),
        Some(json!({ "postId": post["id"] })),
    )
    .await;

    let uri = format!("/api/posts/{}/likes", post["id"]);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, likes) = send(&app, Method::GET, &uri, None, None).await;
    assert!(likes.as_array().unwrap().is_empty());

    // Deleting again still succeeds.
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn follow_and_unfollow_flow() {
    let app = app();
    register(&app, "ada").await;
    register(&app, "grace").await;
    let token = login(&app, "ada").await;

    let (status, follow) = send(
        &app,
        Method::POST,
        "/api/follows",
        Some(&token),
        Some(json!({ "followingId": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(follow["followerId"], 1);
    assert_eq!(follow["followingId"], 2);

    let (_, followers) = send(&app, Method::GET, "/api/users/2/followers", None, None).await;
    assert_eq!(followers.as_array().unwrap().len(), 1);
    assert_eq!(followers[0]["followerId"], 1);

    let (_, following) = send(&app, Method::GET, "/api/users/1/following", None, None).await;
    assert_eq!(following.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, "/api/follows/2", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, followers) = send(&app, Method::GET, "/api/users/2/followers", None, None).await;
    assert!(followers.as_array().unwrap().is_empty());

    // Unfollow twice is a no-op both times.
    let (status, _) = send(&app, Method::DELETE, "/api/follows/2", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn protected_endpoints_reject_missing_session() {
    let app = app();
    for (method, uri, body) in [
        (Method::POST, "/api/comments", Some(json!({ "postId": 1, "content": "ten chars!!" }))),
        (Method::POST, "/api/likes", Some(json!({ "postId": 1 }))),
        (Method::POST, "/api/follows", Some(json!({ "followingId": 1 }))),
        (Method::DELETE, "/api/posts/1/likes", None),
        (Method::DELETE, "/api/follows/1", None),
        (Method::POST, "/api/logout", None),
    ] {
        let (status, body) = send(&app, method.clone(), uri, None, body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(body["error"], "Unauthorized");
    }
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let app = app();
    register(&app, "ada").await;
    let token = login(&app, "ada").await;

    let (status, _) = send(&app, Method::POST, "/api/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&token),
        Some(json!({ "content": "written after logout" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn stale_token_from_another_instance_is_rejected() {
    let app = app();
    register(&app, "ada").await;

    let other = self::app();
    register(&other, "ada").await;
    let foreign_token = login(&other, "ada").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&foreign_token),
        Some(json!({ "content": "should not appear" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
