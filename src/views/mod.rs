//! HTML views rendered with minijinja.
//!
//! Templates are compiled into the binary and served through the environment
//! loader, so a broken template surfaces as an `AppError::Template` at render
//! time. Templates ending in `.html` are auto-escaped.

pub mod book_instances;
pub mod books;

use axum::{http::StatusCode, response::Html};
use minijinja::{context, Environment};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::AppResult;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("error.html", include_str!("../../templates/error.html")),
    ("book_list.html", include_str!("../../templates/book_list.html")),
    (
        "bookinstance_list.html",
        include_str!("../../templates/bookinstance_list.html"),
    ),
    (
        "bookinstance_detail.html",
        include_str!("../../templates/bookinstance_detail.html"),
    ),
    (
        "bookinstance_form.html",
        include_str!("../../templates/bookinstance_form.html"),
    ),
    (
        "bookinstance_delete.html",
        include_str!("../../templates/bookinstance_delete.html"),
    ),
];

static ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.set_loader(|name| {
        Ok(TEMPLATES
            .iter()
            .find(|(template, _)| *template == name)
            .map(|(_, source)| source.to_string()))
    });
    env
});

/// Render a template to an HTML response body
pub fn render<S: Serialize>(name: &str, ctx: S) -> AppResult<Html<String>> {
    let template = ENV.get_template(name)?;
    Ok(Html(template.render(ctx)?))
}

/// Generic error page
pub fn render_error(status: StatusCode, message: &str) -> Result<String, minijinja::Error> {
    ENV.get_template("error.html")?.render(context! {
        title => "Error",
        status => status.as_u16(),
        message => message,
    })
}
