//! Student and employee registration and listing

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};

use crate::{
    error::AppResult,
    models::user::{CreateIdentity, Role, UsersListing},
    views, AppState,
};

pub async fn add_student_form() -> Html<String> {
    Html(views::identity_form(Role::Student))
}

pub async fn add_student(
    State(state): State<AppState>,
    Form(request): Form<CreateIdentity>,
) -> AppResult<Redirect> {
    state.services.users.register(request, Role::Student).await?;
    Ok(Redirect::to("/"))
}

pub async fn add_employee_form() -> Html<String> {
    Html(views::identity_form(Role::Employee))
}

pub async fn add_employee(
    State(state): State<AppState>,
    Form(request): Form<CreateIdentity>,
) -> AppResult<Redirect> {
    state.services.users.register(request, Role::Employee).await?;
    Ok(Redirect::to("/"))
}

/// Students and employees table
pub async fn list_users(State(state): State<AppState>) -> AppResult<Html<String>> {
    let listing = state.services.users.list().await?;
    Ok(Html(views::users_table(&listing)))
}

/// List all students and employees
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "Students and employees", body = UsersListing)
    )
)]
pub async fn list_users_json(State(state): State<AppState>) -> AppResult<Json<UsersListing>> {
    let listing = state.services.users.list().await?;
    Ok(Json(listing))
}
