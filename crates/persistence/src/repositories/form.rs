//! Form repository for database operations.
//!
//! Forms own their field rows; every multi-step write here runs inside one
//! transaction so a mid-sequence failure cannot leave a form with a partial
//! field set.

use sqlx::PgPool;

use crate::entities::{FieldEntity, FormEntity, FormSummaryEntity};
use crate::metrics::QueryTimer;

/// One field row to insert during a full-replace update. The position is
/// taken from the slice index.
#[derive(Debug, Clone)]
pub struct NewField {
    pub field_key: String,
    pub field_type: String,
    pub field_meta: serde_json::Value,
}

/// Repository for form-related database operations.
#[derive(Clone)]
pub struct FormRepository {
    pool: PgPool,
}

impl FormRepository {
    /// Creates a new FormRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all forms, newest id first. No pagination by design.
    pub async fn list(&self) -> Result<Vec<FormSummaryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_forms");
        let result = sqlx::query_as::<_, FormSummaryEntity>(
            r#"
            SELECT id, title, created_at FROM forms ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a form row by id.
    pub async fn find_by_id(&self, form_id: i64) -> Result<Option<FormEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_form_by_id");
        let result = sqlx::query_as::<_, FormEntity>(
            r#"
            SELECT * FROM forms WHERE id = $1
            "#,
        )
        .bind(form_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All field rows of a form, ordered by position.
    pub async fn fields_for_form(&self, form_id: i64) -> Result<Vec<FieldEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_fields_by_form");
        let result = sqlx::query_as::<_, FieldEntity>(
            r#"
            SELECT * FROM fields WHERE form_id = $1 ORDER BY "position" ASC
            "#,
        )
        .bind(form_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The field keys of a form, ordered by position.
    pub async fn field_keys(&self, form_id: i64) -> Result<Vec<String>, sqlx::Error> {
        let timer = QueryTimer::new("find_field_keys_by_form");
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT field_key FROM fields WHERE form_id = $1 ORDER BY "position" ASC
            "#,
        )
        .bind(form_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(rows.into_iter().map(|(key,)| key).collect())
    }

    /// Create a new form with no fields and no settings yet.
    /// Returns the new id.
    pub async fn create(&self, title: &str) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("create_form");
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO forms (title) VALUES ($1) RETURNING id
            "#,
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(row.0)
    }

    /// Full-replace update: title and settings are rewritten, every field
    /// row is deleted and the new set re-inserted in array order as the new
    /// position sequence. Atomic; returns false when the form does not exist.
    pub async fn replace(
        &self,
        form_id: i64,
        title: &str,
        settings: &serde_json::Value,
        fields: &[NewField],
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("replace_form");
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE forms SET title = $2, settings = $3 WHERE id = $1
            "#,
        )
        .bind(form_id)
        .bind(title)
        .bind(settings)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            timer.record();
            return Ok(false);
        }

        sqlx::query(
            r#"
            DELETE FROM fields WHERE form_id = $1
            "#,
        )
        .bind(form_id)
        .execute(&mut *tx)
        .await?;

        for (position, field) in fields.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO fields (form_id, field_key, field_type, field_meta, "position")
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(form_id)
            .bind(&field.field_key)
            .bind(&field.field_type)
            .bind(&field.field_meta)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();
        Ok(true)
    }

    /// Rewrites field positions to match the given key order. The caller
    /// validates set-equality against the existing keys first.
    pub async fn set_positions(
        &self,
        form_id: i64,
        ordered_keys: &[String],
    ) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("reorder_fields");
        let mut tx = self.pool.begin().await?;

        for (position, key) in ordered_keys.iter().enumerate() {
            sqlx::query(
                r#"
                UPDATE fields SET "position" = $3 WHERE form_id = $1 AND field_key = $2
                "#,
            )
            .bind(form_id)
            .bind(key)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();
        Ok(())
    }

    /// Delete a form and its field rows. Entries are retained on purpose.
    /// Returns false when the form does not exist.
    pub async fn delete(&self, form_id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_form");
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM fields WHERE form_id = $1
            "#,
        )
        .bind(form_id)
        .execute(&mut *tx)
        .await?;

        let deleted = sqlx::query(
            r#"
            DELETE FROM forms WHERE id = $1
            "#,
        )
        .bind(form_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(deleted.rows_affected() > 0)
    }
}
