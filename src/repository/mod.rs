//! Repository layer for database operations

pub mod book_instances;
pub mod books;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{BookInstance, BookInstanceDetails, BookTitle, NewBookInstance},
};

/// Store handle injected into the services.
///
/// Every call is atomic on its own; nothing is isolated across calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Check that the store answers
    async fn ping(&self) -> AppResult<()>;

    /// All copies, each with its book resolved
    async fn book_instances_list(&self) -> AppResult<Vec<BookInstanceDetails>>;

    /// One copy with its book resolved, `None` when absent
    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstanceDetails>>;

    async fn book_instances_create(&self, data: &NewBookInstance) -> AppResult<BookInstance>;

    /// Replace the mutable fields of a copy, `None` when absent
    async fn book_instances_update(
        &self,
        id: Uuid,
        data: &NewBookInstance,
    ) -> AppResult<Option<BookInstance>>;

    /// Remove a copy; returns whether a row was removed
    async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool>;

    /// Book ids and titles sorted by title
    async fn books_list_titles(&self) -> AppResult<Vec<BookTitle>>;

    async fn books_exists(&self, id: Uuid) -> AppResult<bool>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn book_instances_list(&self) -> AppResult<Vec<BookInstanceDetails>> {
        self.book_instances_list_details().await
    }

    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstanceDetails>> {
        self.book_instances_get_details(id).await
    }

    async fn book_instances_create(&self, data: &NewBookInstance) -> AppResult<BookInstance> {
        self.book_instances_insert(data).await
    }

    async fn book_instances_update(
        &self,
        id: Uuid,
        data: &NewBookInstance,
    ) -> AppResult<Option<BookInstance>> {
        self.book_instances_replace(id, data).await
    }

    async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool> {
        self.book_instances_remove(id).await
    }

    async fn books_list_titles(&self) -> AppResult<Vec<BookTitle>> {
        self.books_titles().await
    }

    async fn books_exists(&self, id: Uuid) -> AppResult<bool> {
        self.books_exists_by_id(id).await
    }
}
