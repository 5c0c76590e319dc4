//! Book domain methods on Repository (read-only)

use uuid::Uuid;

use super::Repository;
use crate::{
    error::AppResult,
    models::book::BookTitle,
};

impl Repository {
    /// Titles for selection lists, sorted by title
    pub async fn books_titles(&self) -> AppResult<Vec<BookTitle>> {
        let rows = sqlx::query_as::<_, BookTitle>("SELECT id, title FROM books ORDER BY title")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn books_exists_by_id(&self, id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}
