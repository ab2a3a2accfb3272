use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    app::not_found,
    state::AppState,
    users::{dto::UserForm, repo_types::StoreError},
    views::{
        render,
        users::{CreateForm, EditForm, UserList},
        USERS_PATH,
    },
};

pub(crate) const DUPLICATE_EMAIL: &str = "Email already exists. Please use a different email.";
pub(crate) const CREATE_FAILED: &str =
    "An error occurred while creating the user. Please try again.";
pub(crate) const LIST_FAILED: &str = "An error occurred while fetching users.";
pub(crate) const UPDATE_FAILED: &str =
    "An error occurred while updating the user. Please try again.";

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(list_users).post(create_user).fallback(not_found),
        )
        .route("/users/new", get(render_create_form).fallback(not_found))
        .route(
            "/users/edit/:id",
            get(render_edit_form).post(update_user).fallback(not_found),
        )
        .route("/users/delete/:id", post(delete_user).fallback(not_found))
}

fn to_list() -> Response {
    Redirect::to(USERS_PATH).into_response()
}

/// Ids are opaque to clients; anything that is not a UUID cannot name a record.
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

/// An unreadable body counts as an empty form so validation reports the missing fields.
fn form_or_default(form: Result<Form<UserForm>, FormRejection>) -> UserForm {
    match form {
        Ok(Form(form)) => form,
        Err(e) => {
            warn!(error = %e, "unreadable form body");
            UserForm::default()
        }
    }
}

fn conflict_message(field: &str) -> String {
    if field == "email" {
        DUPLICATE_EMAIL.to_string()
    } else {
        format!("A user with this {field} already exists.")
    }
}

/// GET /users/new
pub async fn render_create_form() -> Response {
    render(&CreateForm::blank()).into_response()
}

/// POST /users
#[instrument(skip(state, form))]
pub async fn create_user(
    State(state): State<AppState>,
    form: Result<Form<UserForm>, FormRejection>,
) -> Response {
    let form = form_or_default(form);
    match state.store.create(&form.name, &form.email).await {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, "user created");
            to_list()
        }
        Err(e) => {
            let message = match &e {
                StoreError::Validation { messages } => {
                    warn!(error = %e, "create user rejected");
                    messages.join(", ")
                }
                StoreError::Conflict { field } => {
                    warn!(error = %e, "create user rejected");
                    conflict_message(field)
                }
                _ => {
                    error!(error = %e, "create user failed");
                    CREATE_FAILED.to_string()
                }
            };
            render(&CreateForm {
                error: Some(message),
                name: form.name,
                email: form.email,
            })
            .into_response()
        }
    }
}

/// GET /users
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Response {
    let page = match state.store.list_all().await {
        Ok(users) => {
            info!(count = users.len(), "users fetched");
            UserList {
                users,
                message: None,
            }
        }
        Err(e) => {
            error!(error = %e, "list users failed");
            UserList {
                users: Vec::new(),
                message: Some(LIST_FAILED.to_string()),
            }
        }
    };
    render(&page).into_response()
}

/// GET /users/edit/:id
#[instrument(skip(state))]
pub async fn render_edit_form(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(user_id) = parse_id(&id) else {
        warn!("malformed user id");
        return to_list();
    };

    match state.store.find_by_id(user_id).await {
        Ok(user) => render(&EditForm { user, error: None }).into_response(),
        Err(StoreError::NotFound) => {
            warn!(%user_id, "user not found for edit");
            to_list()
        }
        Err(e) => {
            error!(error = %e, %user_id, "fetch user for edit failed");
            to_list()
        }
    }
}

/// POST /users/edit/:id
#[instrument(skip(state, form))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<UserForm>, FormRejection>,
) -> Response {
    let form = form_or_default(form);
    let Some(user_id) = parse_id(&id) else {
        warn!("malformed user id");
        return to_list();
    };

    let err = match state.store.update_by_id(user_id, &form.name, &form.email).await {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, "user updated");
            return to_list();
        }
        Err(StoreError::NotFound) => {
            warn!(%user_id, "user not found for update");
            return to_list();
        }
        Err(e) => e,
    };
    warn!(error = %err, %user_id, "update user failed");

    // repopulate the form from what is actually stored
    let user = match state.store.find_by_id(user_id).await {
        Ok(user) => user,
        Err(e) => {
            error!(error = %e, %user_id, "re-fetch after failed update failed");
            return to_list();
        }
    };

    let message = match &err {
        StoreError::Conflict { field } => conflict_message(field),
        _ => UPDATE_FAILED.to_string(),
    };
    render(&EditForm {
        user,
        error: Some(message),
    })
    .into_response()
}

/// POST /users/delete/:id
#[instrument(skip(state))]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(user_id) = parse_id(&id) else {
        warn!("malformed user id");
        return to_list();
    };

    match state.store.delete_by_id(user_id).await {
        Ok(user) => info!(user_id = %user.id, email = %user.email, "user deleted"),
        Err(StoreError::NotFound) => info!(%user_id, "user not found for deletion"),
        Err(e) => error!(error = %e, %user_id, "delete user failed"),
    }
    to_list()
}
