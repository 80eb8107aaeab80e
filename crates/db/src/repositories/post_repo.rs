//! Repository for the `posts` table.

use folio_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::post::{NewPost, Post};

/// Column list for `posts` queries.
const COLUMNS: &str = "\
    id, title, slug, excerpt, body, status, author_id, category_id, \
    published_at, created_at, updated_at";

/// Provides bulk insert and listing for blog posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert all `rows` in a single statement, returning the created rows.
    ///
    /// Foreign keys to `users` and `categories` are enforced by the database;
    /// a dangling id fails the whole statement.
    pub async fn insert_many(pool: &PgPool, rows: &[NewPost]) -> Result<Vec<Post>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        let slugs: Vec<&str> = rows.iter().map(|r| r.slug.as_str()).collect();
        let excerpts: Vec<Option<&str>> = rows.iter().map(|r| r.excerpt.as_deref()).collect();
        let bodies: Vec<&str> = rows.iter().map(|r| r.body.as_str()).collect();
        let statuses: Vec<&str> = rows.iter().map(|r| r.status.as_str()).collect();
        let author_ids: Vec<DbId> = rows.iter().map(|r| r.author_id).collect();
        let category_ids: Vec<DbId> = rows.iter().map(|r| r.category_id).collect();
        let published: Vec<Option<Timestamp>> = rows.iter().map(|r| r.published_at).collect();

        let query = format!(
            "INSERT INTO posts \
                (title, slug, excerpt, body, status, author_id, category_id, published_at) \
             SELECT * FROM UNNEST(\
                $1::text[], $2::text[], $3::text[], $4::text[], $5::text[], \
                $6::bigint[], $7::bigint[], $8::timestamptz[]) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(&titles)
            .bind(&slugs)
            .bind(&excerpts)
            .bind(&bodies)
            .bind(&statuses)
            .bind(&author_ids)
            .bind(&category_ids)
            .bind(&published)
            .fetch_all(pool)
            .await
    }

    /// List all posts ordered by id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts ORDER BY id");
        sqlx::query_as::<_, Post>(&query).fetch_all(pool).await
    }
}
