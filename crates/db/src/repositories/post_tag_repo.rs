//! Repository for the `post_tags` junction table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::{NewPostTag, PostTag};

const COLUMNS: &str = "post_id, tag_id, created_at";

pub struct PostTagRepo;

impl PostTagRepo {
    /// Link posts to tags in a single statement, returning the created rows.
    pub async fn insert_many(
        pool: &PgPool,
        rows: &[NewPostTag],
    ) -> Result<Vec<PostTag>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<DbId> = rows.iter().map(|r| r.post_id).collect();
        let tag_ids: Vec<DbId> = rows.iter().map(|r| r.tag_id).collect();

        let query = format!(
            "INSERT INTO post_tags (post_id, tag_id) \
             SELECT * FROM UNNEST($1::bigint[], $2::bigint[]) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PostTag>(&query)
            .bind(&post_ids)
            .bind(&tag_ids)
            .fetch_all(pool)
            .await
    }
}
