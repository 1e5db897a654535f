//! Router tests: every request goes through the full app (session layer included),
//! with the session cookie carried between requests by hand.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt; // for oneshot

use todo_api::lists::SEED_ITEM_NAMES;
use todo_store::{MemoryStore, StoreError, TodoList, User, UserId, UserStore};
use todo_web::{create_app, AppState, SessionOptions};
use tower_sessions::cookie::{time::Duration, Key};

fn session_options() -> SessionOptions {
    SessionOptions {
        key: Key::from(&[7u8; 64][..]),
        secure: false,
        inactivity: Duration::days(7),
    }
}

/// Helper to create a test app with in-memory storage.
fn test_app() -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    let app = create_app(
        AppState::new(store.clone()),
        tower_sessions::MemoryStore::default(),
        session_options(),
    );
    (app, store)
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// POST with an arbitrary (or missing) content type.
fn post_raw(uri: &str, content_type: Option<&str>, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("no location header")
        .to_str()
        .unwrap()
}

fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_redirect(response: &Response, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), to);
}

/// Register `username` and return the session cookie.
async fn sign_up(app: &Router, username: &str, password: &str) -> String {
    let body = format!("username={username}&password={password}");
    let response = send(app, post_form("/signup", &body, None)).await;
    assert_redirect(&response, "/list");
    session_cookie(&response).expect("sign up did not set a session cookie")
}

async fn user(store: &MemoryStore, username: &str) -> User {
    store.find_by_username(username).await.unwrap().unwrap()
}

/// Visit `/list` until the default list exists and return its page.
async fn open_today(app: &Router, cookie: &str) -> String {
    let response = send(app, get("/list", Some(cookie))).await;
    if response.status() == StatusCode::SEE_OTHER {
        assert_eq!(location(&response), "/list");
        let response = send(app, get("/list", Some(cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        return body_text(response).await;
    }
    assert_eq!(response.status(), StatusCode::OK);
    body_text(response).await
}

#[tokio::test]
async fn test_sign_in_page_renders() {
    let (app, _) = test_app();

    let response = send(&app, get("/auth", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("/signin"));
    assert!(body.contains("/signup"));
}

#[tokio::test]
async fn test_root_redirects_to_list() {
    let (app, _) = test_app();
    let response = send(&app, get("/", None)).await;
    assert_redirect(&response, "/list");
}

#[tokio::test]
async fn test_unauthenticated_requests_redirect_without_mutation() {
    let (app, store) = test_app();
    store.create_user("alice", "hash").await.unwrap();
    let before = user(&store, "alice").await;

    for request in [
        get("/list", None),
        get("/list/work", None),
        post_form("/list", "newItem=Buy+milk&list=Today", None),
        post_form("/delete", "checkbox=abc&listName=Today", None),
        post_form("/list", "", None),
        post_raw("/list", None, "", None),
        post_raw("/delete", None, "", None),
        post_raw("/list", Some("application/json"), r#"{"newItem":"x"}"#, None),
        post_raw("/delete", Some("application/json"), r#"{"checkbox":"x"}"#, None),
    ] {
        let response = send(&app, request).await;
        assert_redirect(&response, "/auth");
    }

    assert_eq!(user(&store, "alice").await, before);
}

#[tokio::test]
async fn test_signed_in_post_without_form_body_is_rejected() {
    let (app, store) = test_app();
    let cookie = sign_up(&app, "alice", "s3cret").await;
    open_today(&app, &cookie).await;
    let before = user(&store, "alice").await;

    for request in [
        post_raw("/list", None, "", Some(&cookie)),
        post_raw("/delete", Some("application/json"), "{}", Some(&cookie)),
    ] {
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    assert_eq!(user(&store, "alice").await, before);
}

#[tokio::test]
async fn test_sign_up_creates_today_list_on_first_visit() {
    let (app, store) = test_app();
    let cookie = sign_up(&app, "alice", "s3cret").await;

    // First visit creates the list and asks for a re-fetch
    let response = send(&app, get("/list", Some(&cookie))).await;
    assert_redirect(&response, "/list");

    let response = send(&app, get("/list", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Today"));
    assert!(body.contains("Welcome to your todolist!"));
    assert!(body.contains("Hit the + button to add a new item."));

    let stored = user(&store, "alice").await;
    assert_eq!(stored.lists.len(), 1);
    assert_eq!(stored.lists[0].items.len(), SEED_ITEM_NAMES.len());
}

#[tokio::test]
async fn test_sign_in_with_registered_credentials() {
    let (app, _) = test_app();
    sign_up(&app, "alice", "s3cret").await;

    let response = send(&app, post_form("/signin", "username=alice&password=s3cret", None)).await;
    assert_redirect(&response, "/list");
    let cookie = session_cookie(&response).expect("sign in did not set a session cookie");

    open_today(&app, &cookie).await;
}

#[tokio::test]
async fn test_bad_credentials_are_indistinguishable() {
    let (app, _) = test_app();
    sign_up(&app, "alice", "s3cret").await;

    for body in [
        "username=alice&password=wrong",
        "username=bob&password=s3cret",
        "username=&password=",
    ] {
        let response = send(&app, post_form("/signin", body, None)).await;
        assert_redirect(&response, "/auth");
    }
}

#[tokio::test]
async fn test_duplicate_sign_up_redirects_to_auth() {
    let (app, store) = test_app();
    sign_up(&app, "alice", "s3cret").await;
    let original = user(&store, "alice").await;

    let response = send(&app, post_form("/signup", "username=alice&password=other", None)).await;
    assert_redirect(&response, "/auth");
    assert_eq!(user(&store, "alice").await.id, original.id);
}

#[tokio::test]
async fn test_named_lists_are_capitalized() {
    let (app, store) = test_app();
    let cookie = sign_up(&app, "alice", "s3cret").await;

    let response = send(&app, get("/list/work", Some(&cookie))).await;
    assert_redirect(&response, "/list/Work");

    let response = send(&app, get("/list/Work", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Work"));

    let response = send(&app, get("/list/work", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = user(&store, "alice").await;
    assert_eq!(stored.lists.len(), 1);
    assert_eq!(stored.lists[0].name, "Work");
}

#[tokio::test]
async fn test_today_lower_and_upper_case_resolve_to_one_list() {
    let (app, store) = test_app();
    let cookie = sign_up(&app, "alice", "s3cret").await;

    let response = send(&app, get("/list/today", Some(&cookie))).await;
    assert_redirect(&response, "/list");

    let response = send(&app, get("/list/Today", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = send(&app, get("/list", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(user(&store, "alice").await.lists.len(), 1);
}

#[tokio::test]
async fn test_add_item_to_today() {
    let (app, store) = test_app();
    let cookie = sign_up(&app, "alice", "s3cret").await;
    open_today(&app, &cookie).await;
    let before = user(&store, "alice").await;

    let response = send(
        &app,
        post_form("/list", "newItem=Buy+milk&list=Today", Some(&cookie)),
    )
    .await;
    assert_redirect(&response, "/list");

    let body = open_today(&app, &cookie).await;
    assert!(body.contains("Buy milk"));

    let after = user(&store, "alice").await;
    let items = &after.list("Today").unwrap().items;
    let added = items.last().unwrap();
    assert_eq!(added.name, "Buy milk");
    assert!(before
        .list("Today")
        .unwrap()
        .items
        .iter()
        .all(|item| item.id != added.id));
}

#[tokio::test]
async fn test_add_item_to_named_list_redirects_there() {
    let (app, store) = test_app();
    let cookie = sign_up(&app, "alice", "s3cret").await;
    send(&app, get("/list/groceries", Some(&cookie))).await;

    let response = send(
        &app,
        post_form("/list", "newItem=Eggs&list=Groceries", Some(&cookie)),
    )
    .await;
    assert_redirect(&response, "/list/Groceries");

    let stored = user(&store, "alice").await;
    let names: Vec<_> = stored
        .list("Groceries")
        .unwrap()
        .items
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(names.last(), Some(&"Eggs"));
}

#[tokio::test]
async fn test_delete_removes_only_that_item() {
    let (app, store) = test_app();
    let cookie = sign_up(&app, "alice", "s3cret").await;
    open_today(&app, &cookie).await;

    let before = user(&store, "alice").await.list("Today").unwrap().clone();
    let target = before.items[0].clone();

    let body = format!("checkbox={}&listName=Today", target.id);
    let response = send(&app, post_form("/delete", &body, Some(&cookie))).await;
    assert_redirect(&response, "/list");

    let after = user(&store, "alice").await.list("Today").unwrap().clone();
    assert_eq!(after.items.len(), before.items.len() - 1);
    assert!(after.items.iter().all(|item| item.id != target.id));
    assert_eq!(after.items[..], before.items[1..]);
}

#[tokio::test]
async fn test_delete_from_unknown_list_is_noop() {
    let (app, store) = test_app();
    let cookie = sign_up(&app, "alice", "s3cret").await;
    open_today(&app, &cookie).await;
    let before: TodoList = user(&store, "alice").await.list("Today").unwrap().clone();

    let body = format!("checkbox={}&listName=Elsewhere", before.items[0].id);
    let response = send(&app, post_form("/delete", &body, Some(&cookie))).await;
    assert_redirect(&response, "/list/Elsewhere");

    assert_eq!(user(&store, "alice").await.list("Today").unwrap(), &before);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let (app, _) = test_app();
    let cookie = sign_up(&app, "alice", "s3cret").await;
    open_today(&app, &cookie).await;

    let response = send(&app, get("/logout", Some(&cookie))).await;
    assert_redirect(&response, "/auth");

    let response = send(&app, get("/list", Some(&cookie))).await;
    assert_redirect(&response, "/auth");
}

#[tokio::test]
async fn test_logout_without_session_still_redirects() {
    let (app, _) = test_app();
    let response = send(&app, get("/logout", None)).await;
    assert_redirect(&response, "/auth");
}

#[tokio::test]
async fn test_forged_cookie_is_unauthenticated() {
    let (app, _) = test_app();
    sign_up(&app, "alice", "s3cret").await;

    let response = send(&app, get("/list", Some("id=forged"))).await;
    assert_redirect(&response, "/auth");
}

#[tokio::test]
async fn test_item_names_are_escaped() {
    let (app, _) = test_app();
    let cookie = sign_up(&app, "alice", "s3cret").await;
    open_today(&app, &cookie).await;

    send(
        &app,
        post_form(
            "/list",
            "newItem=%3Cscript%3Ealert(1)%3C%2Fscript%3E&list=Today",
            Some(&cookie),
        ),
    )
    .await;

    let body = open_today(&app, &cookie).await;
    assert!(!body.contains("<script>alert(1)"));
}

/// Store whose saves always lose the version race.
#[derive(Clone, Default)]
struct ConflictingStore {
    inner: MemoryStore,
}

impl UserStore for ConflictingStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        self.inner.create_user(username, password_hash).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.inner.find_by_username(username).await
    }

    async fn load(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        self.inner.load(id).await
    }

    async fn save(&self, user: &User) -> Result<User, StoreError> {
        Err(StoreError::Conflict { user_id: user.id })
    }
}

#[tokio::test]
async fn test_failed_write_is_reported_as_retryable() {
    let store = ConflictingStore::default();
    let app = create_app(
        AppState::new(store.clone()),
        tower_sessions::MemoryStore::default(),
        session_options(),
    );
    let cookie = sign_up(&app, "alice", "s3cret").await;

    let response = send(&app, get("/list", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.headers()[header::RETRY_AFTER], "1");

    let response = send(
        &app,
        post_form("/list", "newItem=Buy+milk&list=Today", Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let stored = store.inner.find_by_username("alice").await.unwrap().unwrap();
    assert!(stored.lists.is_empty());
}

/// Store that accepts accounts but cannot read user documents back.
#[derive(Clone, Default)]
struct BrokenReadStore {
    inner: MemoryStore,
}

impl UserStore for BrokenReadStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        self.inner.create_user(username, password_hash).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.inner.find_by_username(username).await
    }

    async fn load(&self, _id: &UserId) -> Result<Option<User>, StoreError> {
        Err(StoreError::Database("connection reset".to_string()))
    }

    async fn save(&self, user: &User) -> Result<User, StoreError> {
        self.inner.save(user).await
    }
}

#[tokio::test]
async fn test_failed_read_redirects_to_sign_in() {
    let store = BrokenReadStore::default();
    let app = create_app(
        AppState::new(store.clone()),
        tower_sessions::MemoryStore::default(),
        session_options(),
    );
    let cookie = sign_up(&app, "alice", "s3cret").await;

    for request in [
        get("/list", Some(&cookie)),
        get("/list/work", Some(&cookie)),
        post_form("/list", "newItem=Buy+milk&list=Today", Some(&cookie)),
        post_form("/delete", "checkbox=abc&listName=Today", Some(&cookie)),
    ] {
        let response = send(&app, request).await;
        assert_redirect(&response, "/auth");
    }

    let stored = store.inner.find_by_username("alice").await.unwrap().unwrap();
    assert!(stored.lists.is_empty());
    assert_eq!(stored.version, 0);
}
