//! Pages for book copies

use axum::response::Html;
use chrono::NaiveDate;
use minijinja::context;
use serde::Serialize;

use super::render;
use crate::{
    error::AppResult,
    forms::FieldError,
    models::{BookInstanceDetails, BookInstanceInput, BookInstanceStatus, BookTitle},
};

/// Copy as shown in lists and detail pages
#[derive(Debug, Serialize)]
struct BookInstanceView<'a> {
    id: String,
    url: String,
    book_title: &'a str,
    book_url: String,
    imprint: &'a str,
    status: &'static str,
    status_class: &'static str,
    due_back: Option<String>,
}

impl<'a> From<&'a BookInstanceDetails> for BookInstanceView<'a> {
    fn from(details: &'a BookInstanceDetails) -> Self {
        Self {
            id: details.id.to_string(),
            url: details.url(),
            book_title: &details.book.title,
            book_url: details.book.url(),
            imprint: &details.imprint,
            status: details.status.as_str(),
            status_class: status_class(details.status),
            due_back: details.due_back.map(format_date),
        }
    }
}

fn status_class(status: BookInstanceStatus) -> &'static str {
    match status {
        BookInstanceStatus::Available => "text-success",
        BookInstanceStatus::Maintenance => "text-danger",
        _ => "text-warning",
    }
}

/// Medium date, e.g. "Oct 17, 2026"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn list_page(instances: &[BookInstanceDetails]) -> AppResult<Html<String>> {
    let views: Vec<BookInstanceView> = instances.iter().map(BookInstanceView::from).collect();
    render(
        "bookinstance_list.html",
        context! {
            title => "Book Instance List",
            bookinstance_list => views,
        },
    )
}

pub fn detail_page(instance: &BookInstanceDetails) -> AppResult<Html<String>> {
    render(
        "bookinstance_detail.html",
        context! {
            title => format!("Copy: {}", instance.book.title),
            bookinstance => BookInstanceView::from(instance),
        },
    )
}

pub fn delete_page(instance: &BookInstanceDetails) -> AppResult<Html<String>> {
    render(
        "bookinstance_delete.html",
        context! {
            title => "Delete BookInstance",
            bookinstance => BookInstanceView::from(instance),
        },
    )
}

/// Create/update form, empty or filled with previous values and errors
pub fn form_page(
    title: &str,
    book_list: &[BookTitle],
    input: Option<&BookInstanceInput>,
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let statuses: Vec<&str> = BookInstanceStatus::ALL.iter().map(|s| s.as_str()).collect();
    render(
        "bookinstance_form.html",
        context! {
            title => title,
            book_list => book_list,
            selected_book => input.map(|i| i.book.as_str()),
            bookinstance => input,
            statuses => statuses,
            errors => errors,
        },
    )
}
