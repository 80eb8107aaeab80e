//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::{NewUser, User};

/// Column list for `users` queries. Excludes `password_hash`.
const COLUMNS: &str = "id, email, display_name, role, created_at, updated_at";

/// Provides bulk insert and listing for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert all `rows` in a single statement, returning the created rows.
    pub async fn insert_many(pool: &PgPool, rows: &[NewUser]) -> Result<Vec<User>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let emails: Vec<&str> = rows.iter().map(|r| r.email.as_str()).collect();
        let names: Vec<&str> = rows.iter().map(|r| r.display_name.as_str()).collect();
        let hashes: Vec<&str> = rows.iter().map(|r| r.password_hash.as_str()).collect();
        let roles: Vec<&str> = rows.iter().map(|r| r.role.as_str()).collect();

        let query = format!(
            "INSERT INTO users (email, display_name, password_hash, role) \
             SELECT * FROM UNNEST($1::text[], $2::text[], $3::text[], $4::text[]) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&emails)
            .bind(&names)
            .bind(&hashes)
            .bind(&roles)
            .fetch_all(pool)
            .await
    }

    /// List all users ordered by id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }
}
