//! Repository for the `services` table.

use sqlx::PgPool;

use crate::models::service::{NewService, Service};

const COLUMNS: &str = "\
    id, name, slug, summary, price_cents, sort_order, is_active, \
    created_at, updated_at";

pub struct ServiceRepo;

impl ServiceRepo {
    pub async fn insert_many(
        pool: &PgPool,
        rows: &[NewService],
    ) -> Result<Vec<Service>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        let slugs: Vec<&str> = rows.iter().map(|r| r.slug.as_str()).collect();
        let summaries: Vec<&str> = rows.iter().map(|r| r.summary.as_str()).collect();
        let prices: Vec<Option<i64>> = rows.iter().map(|r| r.price_cents).collect();
        let sort_orders: Vec<i32> = rows.iter().map(|r| r.sort_order).collect();
        let active: Vec<bool> = rows.iter().map(|r| r.is_active).collect();

        let query = format!(
            "INSERT INTO services (name, slug, summary, price_cents, sort_order, is_active) \
             SELECT * FROM UNNEST(\
                $1::text[], $2::text[], $3::text[], $4::bigint[], $5::int[], $6::bool[]) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(&names)
            .bind(&slugs)
            .bind(&summaries)
            .bind(&prices)
            .bind(&sort_orders)
            .bind(&active)
            .fetch_all(pool)
            .await
    }

    /// List all services in display order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services ORDER BY sort_order, id");
        sqlx::query_as::<_, Service>(&query).fetch_all(pool).await
    }
}
