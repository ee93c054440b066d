//! Book pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::{Form, WithRejection};
use minijinja::context;
use serde::Serialize;

use super::found;
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookData, BookForm, BookInstance, Genre},
    services::DeleteOutcome,
    validation::{FieldError, FieldValidator, Validation},
    AppState,
};

const LIST_URL: &str = "/catalog/books";

#[derive(Serialize)]
struct BookListItem<'a> {
    id: &'a str,
    title: &'a str,
    author_name: String,
}

/// Genre checkbox on the book form
#[derive(Serialize)]
struct GenreChoice<'a> {
    id: &'a str,
    name: &'a str,
    checked: bool,
}

fn genre_choices<'a>(genres: &'a [Genre], selected: &[String]) -> Vec<GenreChoice<'a>> {
    genres
        .iter()
        .map(|genre| GenreChoice {
            id: &genre.id,
            name: &genre.name,
            checked: selected.contains(&genre.id),
        })
        .collect()
}

fn required(param: &'static str, message: &str) -> FieldValidator {
    FieldValidator::new(param).trim().min_length(1, message)
}

/// Validate a submitted book form.
///
/// Returns the sanitized form alongside the validated data, or the field
/// errors to show with it.
fn validate(form: &BookForm) -> (BookForm, Result<BookData, Vec<FieldError>>) {
    let mut validation = Validation::new();
    let genre_id = FieldValidator::new("genre").trim();
    let sanitized = BookForm {
        title: validation.field(&required("title", "Title must not be empty."), &form.title),
        author: validation.field(&required("author", "Author must not be empty."), &form.author),
        summary: validation.field(&required("summary", "Summary must not be empty."), &form.summary),
        isbn: validation.field(&required("isbn", "ISBN must not be empty"), &form.isbn),
        genre: form
            .genre
            .iter()
            .map(|id| validation.field(&genre_id, id))
            .filter(|id| !id.is_empty())
            .collect(),
    };

    let result = validation.finish().map(|()| BookData {
        title: sanitized.title.clone(),
        author: sanitized.author.clone(),
        summary: sanitized.summary.clone(),
        isbn: sanitized.isbn.clone(),
        genre: sanitized.genre.clone(),
    });
    (sanitized, result)
}

async fn render_form<B: Serialize>(
    state: &AppState,
    title: &str,
    book: Option<&B>,
    selected: &[String],
    errors: &[FieldError],
) -> AppResult<Response> {
    let (authors, genres) = state.services.books.form_choices().await?;
    let authors: Vec<_> = authors.iter().map(Author::view).collect();
    let page = state.views.render(
        "book_form.html",
        context! {
            title => title,
            authors => authors,
            genres => genre_choices(&genres, selected),
            book => book,
            errors => errors,
        },
    )?;
    Ok(page.into_response())
}

fn render_delete(
    state: &AppState,
    book: &Book,
    instances: &[BookInstance],
) -> AppResult<Html<String>> {
    let copies: Vec<_> = instances.iter().map(BookInstance::view).collect();
    state.views.render(
        "book_delete.html",
        context! {
            title => "Delete Book",
            book => book,
            book_instances => copies,
        },
    )
}

/// Display list of all books
pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let entries = state.services.books.list().await?;
    let items: Vec<_> = entries
        .iter()
        .map(|entry| BookListItem {
            id: &entry.book.id,
            title: &entry.book.title,
            author_name: entry.author.as_ref().map(Author::name).unwrap_or_default(),
        })
        .collect();
    state.views.render(
        "book_list.html",
        context! {
            title => "Book List",
            book_list => items,
        },
    )
}

/// Display detail page for a specific book
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let detail = state.services.books.detail(&id).await?;
    let copies: Vec<_> = detail.instances.iter().map(BookInstance::view).collect();
    state.views.render(
        "book_detail.html",
        context! {
            title => &detail.book.title,
            book => &detail.book,
            author => detail.author.as_ref().map(Author::view),
            genres => &detail.genres,
            book_instances => copies,
        },
    )
}

/// Display book create form
pub async fn create_form(State(state): State<AppState>) -> AppResult<Response> {
    render_form::<Book>(&state, "Create Book", None, &[], &[]).await
}

/// Handle book create
pub async fn create_submit(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<BookForm>, AppError>,
) -> AppResult<Response> {
    match validate(&form) {
        (sanitized, Err(errors)) => {
            render_form(&state, "Create Book", Some(&sanitized), &sanitized.genre, &errors).await
        }
        (_, Ok(data)) => {
            let book = state.services.books.create(data).await?;
            Ok(found(&book.url()))
        }
    }
}

/// Display book update form
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let book = state.services.books.get(&id).await?;
    render_form(&state, "Update Book", Some(&book), &book.genre, &[]).await
}

/// Handle book update
pub async fn update_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Form(form), _): WithRejection<Form<BookForm>, AppError>,
) -> AppResult<Response> {
    match validate(&form) {
        (sanitized, Err(errors)) => {
            render_form(&state, "Update Book", Some(&sanitized), &sanitized.genre, &errors).await
        }
        (_, Ok(data)) => {
            let book = state.services.books.update(&id, data).await?;
            Ok(found(&book.url()))
        }
    }
}

/// Display book delete confirmation; a missing book goes back to the list
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let (book, instances) = state.services.books.with_instances(&id).await?;
    match book {
        Some(book) => Ok(render_delete(&state, &book, &instances)?.into_response()),
        None => Ok(found(LIST_URL)),
    }
}

/// Handle book delete; refused while copies of the book remain
pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.books.delete(&id).await? {
        DeleteOutcome::Blocked { record, dependents } => {
            Ok(render_delete(&state, &record, &dependents)?.into_response())
        }
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Ok(found(LIST_URL)),
    }
}
