//! Landing page

use axum::{extract::State, response::Html};

use crate::{error::AppResult, views, AppState};

use super::CurrentUser;

pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Html<String>> {
    let open_loans = state.services.loans.count_open().await?;
    Ok(Html(views::index(user.as_ref(), open_loans)))
}
