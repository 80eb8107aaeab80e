//! Repository for the `categories` table.

use sqlx::PgPool;

use crate::models::category::{Category, NewCategory};

const COLUMNS: &str = "id, name, slug, description, created_at, updated_at";

pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert all `rows` in a single statement, returning the created rows.
    pub async fn insert_many(
        pool: &PgPool,
        rows: &[NewCategory],
    ) -> Result<Vec<Category>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        let slugs: Vec<&str> = rows.iter().map(|r| r.slug.as_str()).collect();
        let descriptions: Vec<Option<&str>> =
            rows.iter().map(|r| r.description.as_deref()).collect();

        let query = format!(
            "INSERT INTO categories (name, slug, description) \
             SELECT * FROM UNNEST($1::text[], $2::text[], $3::text[]) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&names)
            .bind(&slugs)
            .bind(&descriptions)
            .fetch_all(pool)
            .await
    }

    /// List all categories ordered by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }
}
