//! Repository for the `tags` table.

use sqlx::PgPool;

use crate::models::tag::{NewTag, Tag};

const COLUMNS: &str = "id, name, slug, created_at, updated_at";

pub struct TagRepo;

impl TagRepo {
    pub async fn insert_many(pool: &PgPool, rows: &[NewTag]) -> Result<Vec<Tag>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        let slugs: Vec<&str> = rows.iter().map(|r| r.slug.as_str()).collect();

        let query = format!(
            "INSERT INTO tags (name, slug) \
             SELECT * FROM UNNEST($1::text[], $2::text[]) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(&names)
            .bind(&slugs)
            .fetch_all(pool)
            .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags ORDER BY name");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }
}
