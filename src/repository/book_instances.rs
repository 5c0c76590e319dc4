//! BookInstance domain methods on Repository

use chrono::{NaiveDate, Utc};
use sqlx::{postgres::PgRow, FromRow, Row};
use uuid::Uuid;

use super::Repository;
use crate::{
    error::AppResult,
    models::{
        book::Book,
        book_instance::{BookInstance, BookInstanceDetails, NewBookInstance},
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT bi.id, bi.imprint, bi.status, bi.due_back,
           b.id AS book_id, b.title AS book_title,
           b.summary AS book_summary, b.isbn AS book_isbn
    FROM book_instances bi
    JOIN books b ON b.id = bi.book_id
"#;

/// Row of the `book_instances` table
#[derive(Debug, FromRow)]
struct BookInstanceRow {
    id: Uuid,
    book_id: Uuid,
    imprint: String,
    status: String,
    due_back: Option<NaiveDate>,
}

impl From<BookInstanceRow> for BookInstance {
    fn from(row: BookInstanceRow) -> Self {
        Self {
            id: row.id,
            book_id: row.book_id,
            imprint: row.imprint,
            status: row.status.parse().unwrap_or_default(),
            due_back: row.due_back,
        }
    }
}

fn details_from_row(row: &PgRow) -> Result<BookInstanceDetails, sqlx::Error> {
    let status: String = row.try_get("status")?;
    Ok(BookInstanceDetails {
        id: row.try_get("id")?,
        book: Book {
            id: row.try_get("book_id")?,
            title: row.try_get("book_title")?,
            summary: row.try_get("book_summary")?,
            isbn: row.try_get("book_isbn")?,
        },
        imprint: row.try_get("imprint")?,
        status: status.parse().unwrap_or_default(),
        due_back: row.try_get("due_back")?,
    })
}

impl Repository {
    /// List all copies with their book
    pub async fn book_instances_list_details(&self) -> AppResult<Vec<BookInstanceDetails>> {
        let rows = sqlx::query(&format!("{} ORDER BY b.title, bi.imprint", DETAILS_SELECT))
            .fetch_all(&self.pool)
            .await?;

        let details = rows
            .iter()
            .map(details_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(details)
    }

    /// Get one copy with its book
    pub async fn book_instances_get_details(&self, id: Uuid) -> AppResult<Option<BookInstanceDetails>> {
        let row = sqlx::query(&format!("{} WHERE bi.id = $1", DETAILS_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(details_from_row).transpose()?)
    }

    /// Insert a copy
    pub async fn book_instances_insert(&self, data: &NewBookInstance) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstanceRow>(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    /// Replace all mutable fields of a copy
    pub async fn book_instances_replace(
        &self,
        id: Uuid,
        data: &NewBookInstance,
    ) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, BookInstanceRow>(
            r#"
            UPDATE book_instances
            SET book_id = $1, imprint = $2, status = $3, due_back = $4, updated_at = $5
            WHERE id = $6
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    /// Delete a copy
    pub async fn book_instances_remove(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
