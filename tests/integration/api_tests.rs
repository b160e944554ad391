//! API integration tests against an in-process mock server

use std::sync::Arc;

use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use biblio_client::{
    api::ApiClient,
    config::AppConfig,
    models::{AccountDraft, Credentials, Role},
    store::{AuthStatus, ListStatus, MemorySessionStorage},
    views, AppState,
};

const TOKEN: &str = "tok-1";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

fn rejection(status: StatusCode, code: u32, message: &str) -> Response {
    (
        status,
        Json(json!({ "code": code, "error": status.canonical_reason(), "message": message })),
    )
        .into_response()
}

fn unauthorized() -> Response {
    rejection(StatusCode::UNAUTHORIZED, 3, "Authentication required")
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == "admin" && body["password"] == "secret" {
        Json(json!({ "token": TOKEN, "token_type": "Bearer" })).into_response()
    } else {
        rejection(StatusCode::UNAUTHORIZED, 3, "Invalid credentials")
    }
}

async fn me(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "id": 1,
        "login": "admin",
        "firstname": "Ada",
        "lastname": "Lovelace",
        "account_type": "admin"
    }))
    .into_response()
}

async fn update_profile(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if body["new_password"].is_string() {
        match body["current_password"].as_str() {
            None => {
                return rejection(
                    StatusCode::BAD_REQUEST,
                    18,
                    "Current password required to change password",
                )
            }
            Some("secret") => {}
            Some(_) => return rejection(StatusCode::UNAUTHORIZED, 2, "Current password is incorrect"),
        }
    }
    Json(json!({ "id": 1, "login": "admin", "account_type": "admin" })).into_response()
}

async fn list_users(headers: HeaderMap, Query(query): Query<std::collections::HashMap<String, String>>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if query.get("account_type").map(String::as_str) == Some("librarian") {
        return Json(json!([
            { "id": 2, "login": "marie", "firstname": "Marie", "account_type": "librarian" }
        ]))
        .into_response();
    }
    Json(json!({
        "items": [
            { "id": 10, "barcode": "M-0010", "firstname": "Jean", "lastname": "Valjean", "nb_late_loans": 1 }
        ],
        "total": 1,
        "page": 1,
        "per_page": 20
    }))
    .into_response()
}

async fn create_user(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if body["login"] == "taken" {
        return rejection(StatusCode::CONFLICT, 5, "Login already in use");
    }
    (StatusCode::CREATED, Json(json!({ "id": 42 }))).into_response()
}

async fn list_items() -> Response {
    Json(json!({
        "items": [
            { "id": 1, "title": "Dune", "nb_specimens": 2, "nb_available": 1 },
            { "id": 2, "title": null, "nb_specimens": 1, "nb_available": 0 }
        ],
        "total": 2,
        "page": 1,
        "per_page": 20
    }))
    .into_response()
}

async fn stats() -> Response {
    Json(json!({
        "items": { "total": 10, "acquisitions": 2, "withdrawals": 0 },
        "users": { "total": 5, "active": 2 },
        "loans": { "active": 3, "overdue": 1, "returned_today": 0 }
    }))
    .into_response()
}

/// Whole roster whatever the query, like a server without an account type filter
async fn list_all_users() -> Response {
    Json(json!({
        "items": [
            { "id": 1, "login": "admin", "account_type": "admin" },
            { "id": 2, "login": "marie", "firstname": "Marie", "account_type": "librarian" },
            { "id": 10, "firstname": "Jean", "lastname": "Valjean", "account_type": "reader" },
            { "id": 11, "firstname": "Javert", "account_type": "inspector" }
        ],
        "total": 4,
        "page": 1,
        "per_page": 20
    }))
    .into_response()
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock server failed");
    });
    format!("http://{}", addr)
}

/// Start the mock server and return its root URL
async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/auth/profile", put(update_profile))
        .route("/api/v1/users", get(list_users).post(create_user))
        .route("/api/v1/items", get(list_items))
        .route(
            "/api/v1/loans",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable") }),
        )
        .route("/api/v1/stats", get(stats));
    serve(app).await
}

fn app_state(base_url: String, storage: Arc<MemorySessionStorage>) -> AppState {
    let mut config = AppConfig::default();
    config.api.base_url = base_url;
    config.api.timeout_seconds = Some(5);
    let api = Arc::new(ApiClient::new(&config.api).expect("Failed to build client"));
    AppState::new(config, api, storage)
}

async fn signed_in(storage: Arc<MemorySessionStorage>) -> AppState {
    let state = app_state(spawn_backend().await, storage);
    state
        .services
        .auth
        .login(&Credentials {
            username: "admin".to_string(),
            password: "secret".to_string(),
        })
        .await
        .expect("Login failed");
    state
}

#[tokio::test]
async fn test_login_fetches_profile_and_persists_session() {
    let storage = Arc::new(MemorySessionStorage::default());
    let state = signed_in(storage.clone()).await;

    let session = state.store.session.state();
    assert_eq!(session.status, AuthStatus::Success);
    assert_eq!(session.role, Some(Role::Admin));
    assert_eq!(session.token(), Some(TOKEN));
    assert!(session.error.is_none());

    let stored = storage.stored().expect("Session not persisted");
    assert_eq!(stored.login.as_deref(), Some("admin"));
    assert_eq!(stored.token.as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_rejected_login_lands_in_response() {
    let storage = Arc::new(MemorySessionStorage::default());
    let state = app_state(spawn_backend().await, storage.clone());

    let result = state
        .services
        .auth
        .login(&Credentials {
            username: "admin".to_string(),
            password: "wrong".to_string(),
        })
        .await;
    assert!(result.is_err());

    let session = state.store.session.state();
    assert_eq!(session.status, AuthStatus::Failed);
    assert_eq!(session.response.as_deref(), Some("Invalid credentials"));
    assert!(session.error.is_none());
    assert!(session.user.is_none());
    assert!(storage.stored().is_none());
}

#[tokio::test]
async fn test_restored_session_sends_bearer_token() {
    let first = signed_in(Arc::new(MemorySessionStorage::default())).await;
    let user = first.store.session.state().user.expect("No user");

    let storage = Arc::new(MemorySessionStorage::with_user(user));
    let state = app_state(spawn_backend().await, storage);
    assert!(state.store.session.state().is_authenticated());

    let count = state.services.members.load().await.expect("Members load failed");
    assert_eq!(count, 1);
    let members = state.services.members.members().state();
    assert!(!members.loading);
    assert_eq!(members.entities[0].display_name(), "Jean Valjean");
    assert!(members.entities[0].has_late_loans());
}

#[tokio::test]
async fn test_unauthenticated_list_is_business_failure() {
    let state = app_state(spawn_backend().await, Arc::new(MemorySessionStorage::default()));

    assert!(state.services.members.load().await.is_err());

    let members = state.services.members.members().state();
    assert!(!members.loading);
    assert_eq!(members.response.as_deref(), Some("Authentication required"));
    assert!(members.error.is_none());
}

#[tokio::test]
async fn test_server_error_lands_in_error() {
    let state = signed_in(Arc::new(MemorySessionStorage::default())).await;

    assert!(state.services.loans.load_active().await.is_err());

    let loans = state.services.loans.loans().state();
    assert!(!loans.loading);
    assert!(loans.response.is_none());
    let error = loans.error.clone().expect("No error recorded");
    assert!(error.contains("database unavailable"), "{}", error);

    let banner = views::Banner::for_list(&loans).expect("No banner");
    assert_eq!(banner.kind, views::BannerKind::Failure);
}

#[tokio::test]
async fn test_member_creation() {
    let state = signed_in(Arc::new(MemorySessionStorage::default())).await;
    let members = &state.services.members;

    let taken = AccountDraft {
        login: "taken".to_string(),
        password: Some("pass1234".to_string()),
        ..Default::default()
    };
    assert!(members.add(&taken).await.is_err());
    assert_eq!(
        members.members().state().response.as_deref(),
        Some("Login already in use")
    );

    let fresh = AccountDraft {
        login: "cosette".to_string(),
        password: Some("pass1234".to_string()),
        firstname: Some("Cosette".to_string()),
        ..Default::default()
    };
    assert_eq!(members.add(&fresh).await.expect("Creation failed"), 42);
    let list = members.members().state();
    assert_eq!(list.status, ListStatus::Added);
    assert!(list.response.is_none());

    members.acknowledge();
    assert_eq!(members.members().state().status, ListStatus::Idle);
}

#[tokio::test]
async fn test_librarians_accept_plain_array() {
    let state = signed_in(Arc::new(MemorySessionStorage::default())).await;

    assert_eq!(state.services.librarians.load().await.expect("Load failed"), 1);
    let librarians = state.services.librarians.librarians().state();
    assert_eq!(librarians.entities[0].account_type, Some(Role::Librarian));
}

#[tokio::test]
async fn test_librarians_filtered_when_server_ignores_query() {
    let base_url = serve(Router::new().route("/api/v1/users", get(list_all_users))).await;
    let state = app_state(base_url, Arc::new(MemorySessionStorage::default()));

    assert_eq!(state.services.librarians.load().await.expect("Load failed"), 1);
    let librarians = state.services.librarians.librarians().state();
    assert_eq!(librarians.entities[0].login.as_deref(), Some("marie"));

    // an unknown account type does not fail the whole roster
    assert_eq!(state.services.members.load().await.expect("Load failed"), 4);
    let members = state.services.members.members().state();
    assert_eq!(members.entities[3].account_type, Some(Role::Guest));
}

#[tokio::test]
async fn test_password_change_sends_current_password() {
    let state = signed_in(Arc::new(MemorySessionStorage::default())).await;
    let auth = &state.services.auth;

    tokio_test::assert_err!(auth.reset_password(None, "n3wpass".to_string()).await);
    assert_eq!(
        state.store.session.state().response.as_deref(),
        Some("Current password required to change password")
    );

    tokio_test::assert_err!(auth.reset_password(Some("guess".to_string()), "n3wpass".to_string()).await);
    assert_eq!(
        state.store.session.state().response.as_deref(),
        Some("Current password is incorrect")
    );

    tokio_test::assert_ok!(auth.reset_password(Some("secret".to_string()), "n3wpass".to_string()).await);
    let session = state.store.session.state();
    assert_eq!(session.status, AuthStatus::Idle);
    assert!(session.response.is_none());
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_catalog_search() {
    let state = app_state(spawn_backend().await, Arc::new(MemorySessionStorage::default()));

    let count = state
        .services
        .catalog
        .load_books(&Default::default())
        .await
        .expect("Search failed");
    assert_eq!(count, 2);

    let books = state.services.catalog.books().state();
    assert!(books.entities[0].is_available());
    assert!(!books.entities[1].is_available());
}

#[tokio::test]
async fn test_dashboard_fetch() {
    let state = app_state(spawn_backend().await, Arc::new(MemorySessionStorage::default()));

    let mut dashboard = state.services.stats.dashboard();
    let settled = dashboard.settled().await;
    assert!(!settled.loading);
    assert!(settled.error.is_none());
    assert_eq!(settled.data.loans.overdue, 1);

    let tiles = views::tiles(&settled.data);
    assert_eq!(tiles.iter().filter(|t| t.highlight).count(), 1);
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let state = app_state("http://127.0.0.1:1".to_string(), Arc::new(MemorySessionStorage::default()));

    assert!(state.services.catalog.load_books(&Default::default()).await.is_err());

    let books = state.services.catalog.books().state();
    assert!(books.error.is_some());
    assert!(books.response.is_none());
}

#[tokio::test]
async fn test_logout_clears_storage() {
    let storage = Arc::new(MemorySessionStorage::default());
    let state = signed_in(storage.clone()).await;

    state.services.auth.logout();

    let session = state.store.session.state();
    assert!(session.user.is_none());
    assert!(session.role.is_none());
    assert_eq!(session.status, AuthStatus::Idle);
    assert!(storage.stored().is_none());
}
