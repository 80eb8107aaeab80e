//! Per-table query functions over a [`sqlx::PgPool`].
//!
//! Each repository is a unit struct with associated async functions, so
//! callers pass the pool explicitly.

pub mod category_repo;
pub mod contact_submission_repo;
pub mod post_repo;
pub mod post_tag_repo;
pub mod service_repo;
pub mod tag_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use contact_submission_repo::ContactSubmissionRepo;
pub use post_repo::PostRepo;
pub use post_tag_repo::PostTagRepo;
pub use service_repo::ServiceRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;

use sqlx::PgPool;

/// Delete every row from `table`, returning the number of rows removed.
///
/// `table` must come from a fixed list of table names, never user input.
pub async fn delete_all_rows(pool: &PgPool, table: &str) -> Result<u64, sqlx::Error> {
    let query = format!("DELETE FROM {table}");
    let result = sqlx::query(&query).execute(pool).await?;
    Ok(result.rows_affected())
}

/// Count rows in `table`. Same restriction on `table` as [`delete_all_rows`].
pub async fn count_rows(pool: &PgPool, table: &str) -> Result<u64, sqlx::Error> {
    let query = format!("SELECT COUNT(*) FROM {table}");
    let (count,): (i64,) = sqlx::query_as(&query).fetch_one(pool).await?;
    Ok(u64::try_from(count).unwrap_or_default())
}
