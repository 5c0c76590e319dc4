//! Catalog service: copies of books

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    forms::FieldError,
    models::{
        book_instance::BOOK_UNKNOWN, BookInstance, BookInstanceDetails, BookInstanceForm,
        BookInstanceInput, BookTitle, NewBookInstance,
    },
    repository::CatalogStore,
};

pub const COPY_NOT_FOUND: &str = "Book copy not found";
pub const BOOK_NOT_FOUND: &str = "Book not found";

/// Result of submitting a create/update form
#[derive(Debug)]
pub enum FormOutcome {
    Saved(BookInstance),
    /// Nothing was written; the form must be shown again
    Invalid {
        input: BookInstanceInput,
        errors: Vec<FieldError>,
    },
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }

    /// All copies with their book
    pub async fn list_book_instances(&self) -> AppResult<Vec<BookInstanceDetails>> {
        self.store.book_instances_list().await
    }

    /// One copy with its book
    pub async fn get_book_instance(&self, id: Uuid) -> AppResult<BookInstanceDetails> {
        self.store
            .book_instances_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(COPY_NOT_FOUND.to_string()))
    }

    /// Titles for the book selection list
    pub async fn book_titles(&self) -> AppResult<Vec<BookTitle>> {
        self.store.books_list_titles().await
    }

    /// Copy to edit plus the selection list, fetched concurrently
    pub async fn get_edit_form_data(
        &self,
        id: Uuid,
    ) -> AppResult<(BookInstanceDetails, Vec<BookTitle>)> {
        let (instance, titles) = tokio::try_join!(
            self.store.book_instances_get(id),
            self.store.books_list_titles()
        )?;
        let instance = instance.ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;
        Ok((instance, titles))
    }

    /// Validate a form and insert a new copy
    pub async fn create_book_instance(&self, form: BookInstanceForm) -> AppResult<FormOutcome> {
        let input = form.sanitize();
        let data = match self.check(&input).await? {
            Ok(data) => data,
            Err(errors) => return Ok(rejected(input, errors)),
        };

        let created = self.store.book_instances_create(&data).await?;
        tracing::info!("Created book instance id={} book_id={}", created.id, created.book_id);
        Ok(FormOutcome::Saved(created))
    }

    /// Validate a form and replace the fields of an existing copy
    pub async fn update_book_instance(
        &self,
        id: Uuid,
        form: BookInstanceForm,
    ) -> AppResult<FormOutcome> {
        let input = form.sanitize();
        let data = match self.check(&input).await? {
            Ok(data) => data,
            Err(errors) => return Ok(rejected(input, errors)),
        };

        let updated = self
            .store
            .book_instances_update(id, &data)
            .await?
            .ok_or_else(|| AppError::NotFound(COPY_NOT_FOUND.to_string()))?;
        tracing::info!("Updated book instance id={}", updated.id);
        Ok(FormOutcome::Saved(updated))
    }

    /// Delete a copy. Deleting an absent copy is not an error.
    pub async fn delete_book_instance(&self, id: Uuid) -> AppResult<()> {
        if self.store.book_instances_delete(id).await? {
            tracing::info!("Deleted book instance id={}", id);
        } else {
            tracing::debug!("Book instance id={} already absent, nothing deleted", id);
        }
        Ok(())
    }

    /// Field rules, then the referenced book must exist
    async fn check(
        &self,
        input: &BookInstanceInput,
    ) -> AppResult<Result<NewBookInstance, Vec<FieldError>>> {
        let data = match input.check() {
            Ok(data) => data,
            Err(errors) => return Ok(Err(errors)),
        };
        if !self.store.books_exists(data.book_id).await? {
            return Ok(Err(vec![FieldError::new("book", BOOK_UNKNOWN)]));
        }
        Ok(Ok(data))
    }
}

fn rejected(input: BookInstanceInput, errors: Vec<FieldError>) -> FormOutcome {
    tracing::debug!("Book instance form rejected: {:?}", errors);
    FormOutcome::Invalid { input, errors }
}
