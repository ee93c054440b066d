//! Book instance (copy) pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::{Form, WithRejection};
use chrono::Utc;
use minijinja::context;
use serde::Serialize;

use super::found;
use crate::{
    error::{AppError, AppResult},
    models::{BookInstance, BookInstanceForm, BookInstanceView, InstanceStatus},
    repository::new_id,
    services::book_instances::InstanceEntry,
    validation::{parse_date, FieldError, FieldValidator, Validation},
    AppState,
};

const LIST_URL: &str = "/catalog/bookinstances";

#[derive(Serialize)]
struct InstanceListItem<'a> {
    #[serde(flatten)]
    view: BookInstanceView<'a>,
    book_title: &'a str,
}

fn statuses() -> Vec<&'static str> {
    InstanceStatus::ALL.iter().map(|status| status.as_str()).collect()
}

/// Validate a submitted copy form.
///
/// An empty status falls back to Maintenance and an empty return date to
/// today.
fn validate(form: &BookInstanceForm) -> (BookInstanceForm, Result<BookInstance, Vec<FieldError>>) {
    let mut validation = Validation::new();
    let sanitized = BookInstanceForm {
        book: validation.field(
            &FieldValidator::new("book").trim().min_length(1, "Book must be specified"),
            &form.book,
        ),
        imprint: validation.field(
            &FieldValidator::new("imprint")
                .trim()
                .min_length(1, "Imprint must be specified"),
            &form.imprint,
        ),
        status: validation.field(
            &FieldValidator::new("status")
                .optional()
                .trim()
                .one_of(statuses(), "Invalid status"),
            &form.status,
        ),
        due_back: validation.field(
            &FieldValidator::new("due_back")
                .optional()
                .trim()
                .iso_date("Invalid date"),
            &form.due_back,
        ),
    };

    let result = validation.finish().map(|()| BookInstance {
        id: new_id(),
        book: sanitized.book.clone(),
        imprint: sanitized.imprint.clone(),
        status: sanitized.status.parse().unwrap_or_default(),
        due_back: parse_date(&sanitized.due_back).unwrap_or_else(|| Utc::now().date_naive()),
    });
    (sanitized, result)
}

async fn render_form<I: Serialize>(
    state: &AppState,
    title: &str,
    instance: Option<&I>,
    errors: &[FieldError],
) -> AppResult<Response> {
    let books = state.services.book_instances.book_choices().await?;
    let page = state.views.render(
        "bookinstance_form.html",
        context! {
            title => title,
            book_list => books,
            statuses => statuses(),
            bookinstance => instance,
            errors => errors,
        },
    )?;
    Ok(page.into_response())
}

fn render_delete(state: &AppState, entry: &InstanceEntry) -> AppResult<Html<String>> {
    state.views.render(
        "bookinstance_delete.html",
        context! {
            title => "Delete BookInstance",
            bookinstance => entry.instance.view(),
            book => entry.book,
        },
    )
}

/// Display list of all copies
pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let entries = state.services.book_instances.list().await?;
    let items: Vec<_> = entries
        .iter()
        .map(|entry| InstanceListItem {
            view: entry.instance.view(),
            book_title: entry.book.as_ref().map(|book| book.title.as_str()).unwrap_or(""),
        })
        .collect();
    state.views.render(
        "bookinstance_list.html",
        context! {
            title => "Book Instance List",
            bookinstance_list => items,
        },
    )
}

/// Display detail page for a specific copy
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let entry = state.services.book_instances.detail(&id).await?;
    state.views.render(
        "bookinstance_detail.html",
        context! {
            title => "Book:",
            bookinstance => entry.instance.view(),
            book => entry.book,
        },
    )
}

/// Display copy create form
pub async fn create_form(State(state): State<AppState>) -> AppResult<Response> {
    render_form::<BookInstance>(&state, "Create BookInstance", None, &[]).await
}

/// Handle copy create
pub async fn create_submit(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<BookInstanceForm>, AppError>,
) -> AppResult<Response> {
    match validate(&form) {
        (sanitized, Err(errors)) => {
            render_form(&state, "Create BookInstance", Some(&sanitized), &errors).await
        }
        (_, Ok(instance)) => {
            let instance = state.services.book_instances.create(instance).await?;
            Ok(found(&instance.url()))
        }
    }
}

/// Display copy update form
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let instance = state.services.book_instances.get(&id).await?;
    render_form(&state, "Update BookInstance", Some(&instance), &[]).await
}

/// Handle copy update
pub async fn update_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Form(form), _): WithRejection<Form<BookInstanceForm>, AppError>,
) -> AppResult<Response> {
    match validate(&form) {
        (sanitized, Err(errors)) => {
            render_form(&state, "Update BookInstance", Some(&sanitized), &errors).await
        }
        (_, Ok(instance)) => {
            let instance = state.services.book_instances.update(&id, instance).await?;
            Ok(found(&instance.url()))
        }
    }
}

/// Display copy delete confirmation; a missing copy goes back to the list
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.book_instances.find(&id).await? {
        Some(entry) => Ok(render_delete(&state, &entry)?.into_response()),
        None => Ok(found(LIST_URL)),
    }
}

/// Handle copy delete
pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    state.services.book_instances.delete(&id).await?;
    Ok(found(LIST_URL))
}
