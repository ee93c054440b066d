//! Author pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::{Form, WithRejection};
use minijinja::context;

use super::found;
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorForm, Book},
    services::DeleteOutcome,
    validation::{parse_date, FieldError, FieldValidator, Validation},
    AppState,
};

const LIST_URL: &str = "/catalog/authors";

fn name_field(param: &'static str, label: &str) -> FieldValidator {
    FieldValidator::new(param)
        .trim()
        .min_length(1, format!("{} must be specified.", label))
        .alphanumeric(format!("{} has non-alphanumeric characters.", label))
}

fn date_field(param: &'static str, message: &str) -> FieldValidator {
    FieldValidator::new(param).optional().trim().iso_date(message)
}

/// Validate a submitted author form.
///
/// Returns the sanitized form alongside the validated author, or the field
/// errors to show with it.
fn validate(form: &AuthorForm) -> (AuthorForm, Result<Author, Vec<FieldError>>) {
    let mut validation = Validation::new();
    let sanitized = AuthorForm {
        first_name: validation.field(&name_field("first_name", "First name"), &form.first_name),
        family_name: validation.field(&name_field("family_name", "Family name"), &form.family_name),
        date_of_birth: validation.field(
            &date_field("date_of_birth", "Invalid date of birth"),
            &form.date_of_birth,
        ),
        date_of_death: validation.field(
            &date_field("date_of_death", "Invalid date of death"),
            &form.date_of_death,
        ),
    };

    let result = validation.finish().map(|()| {
        Author::new(
            sanitized.first_name.clone(),
            sanitized.family_name.clone(),
            parse_date(&sanitized.date_of_birth),
            parse_date(&sanitized.date_of_death),
        )
    });
    (sanitized, result)
}

fn render_form(
    state: &AppState,
    title: &str,
    author: &AuthorForm,
    errors: &[FieldError],
) -> AppResult<Response> {
    let page = state.views.render(
        "author_form.html",
        context! {
            title => title,
            author => author,
            errors => errors,
        },
    )?;
    Ok(page.into_response())
}

fn render_delete(state: &AppState, author: &Author, books: &[Book]) -> AppResult<Html<String>> {
    state.views.render(
        "author_delete.html",
        context! {
            title => "Delete Author",
            author => author.view(),
            author_books => books,
        },
    )
}

/// Display list of all authors
pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = state.services.authors.list().await?;
    let views: Vec<_> = authors.iter().map(Author::view).collect();
    state.views.render(
        "author_list.html",
        context! {
            title => "Author List",
            author_list => views,
        },
    )
}

/// Display detail page for a specific author
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let (author, books) = state.services.authors.detail(&id).await?;
    state.views.render(
        "author_detail.html",
        context! {
            title => "Author Detail",
            author => author.view(),
            author_books => books,
        },
    )
}

/// Display author create form
pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    state
        .views
        .render("author_form.html", context! { title => "Create Author" })
}

/// Handle author create
pub async fn create_submit(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<AuthorForm>, AppError>,
) -> AppResult<Response> {
    match validate(&form) {
        (sanitized, Err(errors)) => render_form(&state, "Create Author", &sanitized, &errors),
        (_, Ok(author)) => {
            let author = state.services.authors.create(author).await?;
            Ok(found(&author.url()))
        }
    }
}

/// Display author update form
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let author = state.services.authors.get(&id).await?;
    state.views.render(
        "author_form.html",
        context! {
            title => "Update Author",
            author => author,
        },
    )
}

/// Handle author update
pub async fn update_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Form(form), _): WithRejection<Form<AuthorForm>, AppError>,
) -> AppResult<Response> {
    match validate(&form) {
        (sanitized, Err(errors)) => render_form(&state, "Update Author", &sanitized, &errors),
        (_, Ok(author)) => {
            let author = state.services.authors.update(&id, author).await?;
            Ok(found(&author.url()))
        }
    }
}

/// Display author delete confirmation; a missing author goes back to the list
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let (author, books) = state.services.authors.with_books(&id).await?;
    match author {
        Some(author) => Ok(render_delete(&state, &author, &books)?.into_response()),
        None => Ok(found(LIST_URL)),
    }
}

/// Handle author delete; refused while the author has books
pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.authors.delete(&id).await? {
        DeleteOutcome::Blocked { record, dependents } => {
            Ok(render_delete(&state, &record, &dependents)?.into_response())
        }
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Ok(found(LIST_URL)),
    }
}
