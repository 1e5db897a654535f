//! HTTP route definitions and handlers.
//!
//! Every protected handler starts by matching on the request's
//! [`SessionState`]: unauthenticated requests are sent to [`SIGN_IN_PATH`]
//! before any store access happens, and before a malformed body is rejected.

use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use todo_api::auth::session;
use todo_api::lists::{capitalize, list_path};
use todo_api::{ListLookup, SessionState, DEFAULT_LIST_NAME};
use todo_store::{ItemId, UserStore};
use tower_sessions::Session;

use crate::error::AppError;
use crate::extract::Auth;
use crate::state::AppState;
use crate::views;

/// Where unauthenticated requests and failed sign-ins end up.
pub const SIGN_IN_PATH: &str = "/auth";

/// Route displaying the default list.
pub const LIST_PATH: &str = "/list";

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct NewItem {
    #[serde(rename = "newItem", default)]
    pub new_item: String,
    #[serde(default)]
    pub list: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteItem {
    /// Id of the item to remove.
    #[serde(default)]
    pub checkbox: String,
    #[serde(rename = "listName", default)]
    pub list_name: String,
}

/// Build the router with all routes.
pub fn create_router<S: UserStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(root))
        .route(SIGN_IN_PATH, get(sign_in_page))
        .route(LIST_PATH, get(show_default_list::<S>).post(add_item::<S>))
        .route("/list/{name}", get(show_named_list::<S>))
        .route("/signup", post(sign_up::<S>))
        .route("/signin", post(sign_in::<S>))
        .route("/logout", get(logout))
        .route("/delete", post(delete_item::<S>))
        .with_state(state)
}

async fn root() -> Redirect {
    Redirect::to(LIST_PATH)
}

async fn sign_in_page() -> Html<String> {
    Html(views::render_sign_in())
}

async fn show_default_list<S: UserStore>(
    State(state): State<AppState<S>>,
    Auth(auth): Auth,
) -> Result<Response, AppError> {
    show_list(&state, auth, DEFAULT_LIST_NAME).await
}

async fn show_named_list<S: UserStore>(
    State(state): State<AppState<S>>,
    Auth(auth): Auth,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    show_list(&state, auth, &capitalize(&name)).await
}

async fn show_list<S: UserStore>(
    state: &AppState<S>,
    auth: SessionState,
    name: &str,
) -> Result<Response, AppError> {
    let SessionState::Authenticated(user_id) = auth else {
        return Ok(Redirect::to(SIGN_IN_PATH).into_response());
    };

    match state.lists.get_or_create(&user_id, name).await? {
        ListLookup::Found(list) => Ok(Html(views::render_list(&list)).into_response()),
        // Fetch again so the page is rendered from what was actually stored
        ListLookup::Created => Ok(Redirect::to(&list_path(name)).into_response()),
    }
}

async fn sign_up<S: UserStore>(
    State(state): State<AppState<S>>,
    session: Session,
    Form(form): Form<Credentials>,
) -> Result<Redirect, AppError> {
    let user_id = state.auth.register(&form.username, &form.password).await?;
    session::establish(&session, &user_id).await?;
    Ok(Redirect::to(LIST_PATH))
}

async fn sign_in<S: UserStore>(
    State(state): State<AppState<S>>,
    session: Session,
    Form(form): Form<Credentials>,
) -> Result<Redirect, AppError> {
    let user_id = state.auth.sign_in(&form.username, &form.password).await?;
    session::establish(&session, &user_id).await?;
    tracing::debug!(%user_id, "signed in");
    Ok(Redirect::to(LIST_PATH))
}

async fn logout(session: Session) -> Redirect {
    if let Err(err) = session::sign_out(&session).await {
        tracing::error!(error = %err, "failed to end session");
    }
    Redirect::to(SIGN_IN_PATH)
}

async fn add_item<S: UserStore>(
    State(state): State<AppState<S>>,
    Auth(auth): Auth,
    form: Result<Form<NewItem>, FormRejection>,
) -> Result<Redirect, AppError> {
    let SessionState::Authenticated(user_id) = auth else {
        return Ok(Redirect::to(SIGN_IN_PATH));
    };
    let Form(form) = form?;

    state
        .lists
        .add_item(&user_id, &form.list, &form.new_item)
        .await?;
    Ok(Redirect::to(&list_path(&form.list)))
}

async fn delete_item<S: UserStore>(
    State(state): State<AppState<S>>,
    Auth(auth): Auth,
    form: Result<Form<DeleteItem>, FormRejection>,
) -> Result<Redirect, AppError> {
    let SessionState::Authenticated(user_id) = auth else {
        return Ok(Redirect::to(SIGN_IN_PATH));
    };
    let Form(form) = form?;

    let item_id = ItemId::from(form.checkbox);
    state
        .lists
        .remove_item(&user_id, &form.list_name, &item_id)
        .await?;
    Ok(Redirect::to(&list_path(&form.list_name)))
}
