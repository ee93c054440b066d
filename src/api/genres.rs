//! Genre pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::{Form, WithRejection};
use minijinja::context;

use super::found;
use crate::{
    error::{AppError, AppResult},
    models::{Book, Genre, GenreForm},
    services::DeleteOutcome,
    validation::{FieldValidator, Validation},
    AppState,
};

const LIST_URL: &str = "/catalog/genres";

fn name_on_create() -> FieldValidator {
    FieldValidator::new("name")
        .trim()
        .min_length(1, "Genre name required")
}

// Stricter than create
fn name_on_update() -> FieldValidator {
    FieldValidator::new("name")
        .trim()
        .min_length(3, "Genre name must contain at least 3 characters")
}

fn render_delete(state: &AppState, genre: &Genre, books: &[Book]) -> AppResult<Html<String>> {
    state.views.render(
        "genre_delete.html",
        context! {
            title => "Delete Genre",
            genre => genre,
            genre_books => books,
        },
    )
}

/// Display list of all genres
pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genres = state.services.genres.list().await?;
    state.views.render(
        "genre_list.html",
        context! {
            title => "Genre List",
            genre_list => genres,
        },
    )
}

/// Display detail page for a specific genre
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let (genre, books) = state.services.genres.detail(&id).await?;
    state.views.render(
        "genre_detail.html",
        context! {
            title => "Genre Detail",
            genre => genre,
            genre_books => books,
        },
    )
}

/// Display genre create form
pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    state
        .views
        .render("genre_form.html", context! { title => "Create Genre" })
}

/// Handle genre create
pub async fn create_submit(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<GenreForm>, AppError>,
) -> AppResult<Response> {
    let mut validation = Validation::new();
    let name = validation.field(&name_on_create(), &form.name);

    if let Err(errors) = validation.finish() {
        let page = state.views.render(
            "genre_form.html",
            context! {
                title => "Create Genre",
                genre => context! { name => name },
                errors => errors,
            },
        )?;
        return Ok(page.into_response());
    }

    let outcome = state.services.genres.create(&name).await?;
    Ok(found(&outcome.record().url()))
}

/// Display genre update form
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let genre = state.services.genres.get(&id).await?;
    state.views.render(
        "genre_form.html",
        context! {
            title => "Update Genre",
            genre => genre,
        },
    )
}

/// Handle genre update
pub async fn update_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Form(form), _): WithRejection<Form<GenreForm>, AppError>,
) -> AppResult<Response> {
    let mut validation = Validation::new();
    let name = validation.field(&name_on_update(), &form.name);

    if let Err(errors) = validation.finish() {
        let page = state.views.render(
            "genre_form.html",
            context! {
                title => "Update Genre",
                genre => Genre { id, name },
                errors => errors,
            },
        )?;
        return Ok(page.into_response());
    }

    let genre = state.services.genres.update(&id, &name).await?;
    Ok(found(&genre.url()))
}

/// Display genre delete confirmation; a missing genre goes back to the list
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let (genre, books) = state.services.genres.with_books(&id).await?;
    match genre {
        Some(genre) => Ok(render_delete(&state, &genre, &books)?.into_response()),
        None => Ok(found(LIST_URL)),
    }
}

/// Handle genre delete; refused while books still use the genre
pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.genres.delete(&id).await? {
        DeleteOutcome::Blocked { record, dependents } => {
            Ok(render_delete(&state, &record, &dependents)?.into_response())
        }
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Ok(found(LIST_URL)),
    }
}
