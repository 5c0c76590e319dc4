//! Pages for books

use axum::response::Html;
use minijinja::context;

use super::render;
use crate::{error::AppResult, models::BookTitle};

pub fn book_list_page(books: &[BookTitle]) -> AppResult<Html<String>> {
    render(
        "book_list.html",
        context! {
            title => "Book List",
            book_list => books,
        },
    )
}
