//! Catalog home page

use axum::{extract::State, response::{Html, Response}};
use minijinja::context;

use super::found;
use crate::{error::AppResult, AppState};

/// Site root redirects to the catalog
pub async fn home() -> Response {
    found("/catalog")
}

/// Catalog home with record counts
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let counts = state.services.catalog.counts().await?;
    state.views.render(
        "index.html",
        context! {
            title => "Local Library Home",
            counts => counts,
        },
    )
}
