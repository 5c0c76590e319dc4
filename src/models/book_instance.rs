//! BookInstance (physical copy of a book) model and form types

use std::{borrow::Cow, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::book::Book;
use crate::forms::{self, FieldError};

pub const BOOK_REQUIRED: &str = "Book must be specified";
pub const BOOK_UNKNOWN: &str = "Book does not exist";
pub const IMPRINT_REQUIRED: &str = "Imprint must be specified";

/// Order in which field errors are reported back to the form
const FIELD_ORDER: &[&str] = &["book", "imprint", "status", "due_back"];

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Available,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }

    /// Status as posted by a form; an empty value means the default.
    pub fn from_form(value: &str) -> Option<Self> {
        if value.is_empty() {
            return Some(Self::default());
        }
        value.parse().ok()
    }
}

impl FromStr for BookInstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown book instance status: {}", s))
    }
}

impl fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Copy as stored, holding a reference to its book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        book_instance_url(self.id)
    }
}

/// Copy with its book resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookInstanceDetails {
    pub id: Uuid,
    pub book: Book,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstanceDetails {
    pub fn url(&self) -> String {
        book_instance_url(self.id)
    }
}

pub fn book_instance_url(id: Uuid) -> String {
    format!("/catalog/bookinstance/{}", id)
}

/// Raw create/update form as posted by the browser
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookInstanceForm {
    /// Book ID
    #[serde(default)]
    pub book: Option<String>,
    #[serde(default)]
    pub imprint: Option<String>,
    /// One of Available, Maintenance, Loaned, Reserved (default: Maintenance)
    #[serde(default)]
    pub status: Option<String>,
    /// ISO-8601 date (YYYY-MM-DD)
    #[serde(default)]
    pub due_back: Option<String>,
    /// Older name of `due_back`, used when `due_back` is empty
    #[serde(default)]
    pub due_back_yyyy_mm_dd: Option<String>,
}

impl BookInstanceForm {
    /// Apply field sanitizers. Empty `due_back` counts as not provided.
    pub fn sanitize(self) -> BookInstanceInput {
        let due_back = self
            .due_back
            .filter(|d| !d.is_empty())
            .or_else(|| self.due_back_yyyy_mm_dd.filter(|d| !d.is_empty()));
        BookInstanceInput {
            book: forms::trim_escape(self.book.as_deref()),
            imprint: forms::trim_escape(self.imprint.as_deref()),
            status: forms::escape_html(self.status.as_deref().unwrap_or_default()),
            due_back,
        }
    }
}

/// Sanitized form values, also used to repopulate the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct BookInstanceInput {
    #[validate(
        length(min = 1, message = "Book must be specified"),
        custom(function = "validate_book_id")
    )]
    pub book: String,
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    #[validate(custom(function = "validate_status"))]
    pub status: String,
    #[validate(custom(function = "crate::forms::validate_iso8601_date"))]
    pub due_back: Option<String>,
}

impl BookInstanceInput {
    /// Run the field rules and build the persistence model.
    pub fn check(&self) -> Result<NewBookInstance, Vec<FieldError>> {
        if let Err(errors) = self.validate() {
            return Err(forms::collect_field_errors(&errors, FIELD_ORDER));
        }

        let book_id = Uuid::parse_str(&self.book)
            .map_err(|_| vec![FieldError::new("book", BOOK_UNKNOWN)])?;
        let status = BookInstanceStatus::from_form(&self.status)
            .ok_or_else(|| vec![FieldError::new("status", status_message())])?;
        let due_back = match self.due_back.as_deref() {
            Some(raw) => Some(
                forms::parse_iso8601_date(raw)
                    .ok_or_else(|| vec![FieldError::new("due_back", "Invalid date")])?,
            ),
            None => None,
        };

        Ok(NewBookInstance {
            book_id,
            imprint: self.imprint.clone(),
            status,
            due_back,
        })
    }
}

impl From<&BookInstanceDetails> for BookInstanceInput {
    fn from(details: &BookInstanceDetails) -> Self {
        Self {
            book: details.book.id.to_string(),
            imprint: details.imprint.clone(),
            status: details.status.to_string(),
            due_back: details.due_back.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Validated copy ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookInstance {
    pub book_id: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

fn status_message() -> String {
    let allowed: Vec<&str> = BookInstanceStatus::ALL.iter().map(|s| s.as_str()).collect();
    format!("Status must be one of {}", allowed.join(", "))
}

fn validate_book_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || Uuid::parse_str(value).is_ok() {
        return Ok(());
    }
    let mut err = ValidationError::new("book_id");
    err.message = Some(Cow::Borrowed(BOOK_UNKNOWN));
    Err(err)
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    if BookInstanceStatus::from_form(value).is_some() {
        return Ok(());
    }
    let mut err = ValidationError::new("status");
    err.message = Some(Cow::Owned(status_message()));
    Err(err)
}
