//! Book pages (read-only)

use axum::{extract::State, response::Html};

use crate::{error::AppResult, views::books as pages, AppState};

/// List all books by title
#[utoipa::path(
    get,
    path = "/catalog/books",
    tag = "catalog",
    responses(
        (status = 200, description = "Book list page", content_type = "text/html", body = String)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.catalog.book_titles().await?;
    pages::book_list_page(&books)
}
