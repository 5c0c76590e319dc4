//! Book instance (copy) pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{BookInstanceForm, BookInstanceInput},
    services::catalog::{FormOutcome, BOOK_NOT_FOUND, COPY_NOT_FOUND},
    views::book_instances as pages,
    AppState,
};

use super::BOOK_LIST_URL;

const CREATE_TITLE: &str = "Create BookInstance";
const UPDATE_TITLE: &str = "Update BookInstance";

fn parse_id(raw: &str, not_found: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(not_found.to_string()))
}

/// Redirect after a successful write, or show the form again with its errors
async fn respond_to_submission(
    state: &AppState,
    title: &str,
    outcome: FormOutcome,
) -> AppResult<Response> {
    match outcome {
        FormOutcome::Saved(instance) => Ok(Redirect::to(&instance.url()).into_response()),
        FormOutcome::Invalid { input, errors } => {
            let book_list = state.services.catalog.book_titles().await?;
            let page = pages::form_page(title, &book_list, Some(&input), &errors)?;
            Ok(page.into_response())
        }
    }
}

/// List all book copies
#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    tag = "catalog",
    responses(
        (status = 200, description = "Book instance list page", content_type = "text/html", body = String)
    )
)]
pub async fn list_book_instances(State(state): State<AppState>) -> AppResult<Html<String>> {
    let instances = state.services.catalog.list_book_instances().await?;
    pages::list_page(&instances)
}

/// Show one book copy
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    tag = "catalog",
    params(
        ("id" = String, Path, description = "Book instance ID")
    ),
    responses(
        (status = 200, description = "Book instance detail page", content_type = "text/html", body = String),
        (status = 404, description = "Book copy not found")
    )
)]
pub async fn get_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, COPY_NOT_FOUND)?;
    let instance = state.services.catalog.get_book_instance(id).await?;
    pages::detail_page(&instance)
}

/// Show the empty creation form
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/create",
    tag = "catalog",
    responses(
        (status = 200, description = "Creation form", content_type = "text/html", body = String)
    )
)]
pub async fn create_book_instance_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let book_list = state.services.catalog.book_titles().await?;
    pages::form_page(CREATE_TITLE, &book_list, None, &[])
}

/// Create a book copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/create",
    tag = "catalog",
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirects to the new copy"),
        (status = 200, description = "Form shown again with validation errors", content_type = "text/html", body = String)
    )
)]
pub async fn create_book_instance(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let outcome = state.services.catalog.create_book_instance(form).await?;
    respond_to_submission(&state, CREATE_TITLE, outcome).await
}

/// Show the delete confirmation
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "catalog",
    params(
        ("id" = String, Path, description = "Book instance ID")
    ),
    responses(
        (status = 200, description = "Delete confirmation page", content_type = "text/html", body = String),
        (status = 404, description = "Book copy not found")
    )
)]
pub async fn delete_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, COPY_NOT_FOUND)?;
    let instance = state.services.catalog.get_book_instance(id).await?;
    pages::delete_page(&instance)
}

/// Delete a book copy, then go back to the book list
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "catalog",
    params(
        ("id" = String, Path, description = "Book instance ID")
    ),
    responses(
        (status = 303, description = "Redirects to the book list, whether or not the copy existed")
    )
)]
pub async fn delete_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    match Uuid::parse_str(&id) {
        Ok(id) => state.services.catalog.delete_book_instance(id).await?,
        Err(_) => tracing::debug!("Ignoring delete of malformed book instance id {:?}", id),
    }
    Ok(Redirect::to(BOOK_LIST_URL))
}

/// Show the update form filled with the current values
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/update",
    tag = "catalog",
    params(
        ("id" = String, Path, description = "Book instance ID")
    ),
    responses(
        (status = 200, description = "Update form", content_type = "text/html", body = String),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, BOOK_NOT_FOUND)?;
    let (instance, book_list) = state.services.catalog.get_edit_form_data(id).await?;
    let input = BookInstanceInput::from(&instance);
    pages::form_page(UPDATE_TITLE, &book_list, Some(&input), &[])
}

/// Update a book copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/update",
    tag = "catalog",
    params(
        ("id" = String, Path, description = "Book instance ID")
    ),
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirects to the copy"),
        (status = 200, description = "Form shown again with validation errors", content_type = "text/html", body = String),
        (status = 404, description = "Book copy not found")
    )
)]
pub async fn update_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let id = parse_id(&id, COPY_NOT_FOUND)?;
    let outcome = state.services.catalog.update_book_instance(id, form).await?;
    respond_to_submission(&state, UPDATE_TITLE, outcome).await
}
