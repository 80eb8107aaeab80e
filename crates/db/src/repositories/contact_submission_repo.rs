//! Repository for the `contact_submissions` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact_submission::{ContactSubmission, NewContactSubmission};

const COLUMNS: &str = "\
    id, name, email, subject, message, service_id, status, created_at, updated_at";

pub struct ContactSubmissionRepo;

impl ContactSubmissionRepo {
    pub async fn insert_many(
        pool: &PgPool,
        rows: &[NewContactSubmission],
    ) -> Result<Vec<ContactSubmission>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        let emails: Vec<&str> = rows.iter().map(|r| r.email.as_str()).collect();
        let subjects: Vec<Option<&str>> = rows.iter().map(|r| r.subject.as_deref()).collect();
        let messages: Vec<&str> = rows.iter().map(|r| r.message.as_str()).collect();
        let service_ids: Vec<Option<DbId>> = rows.iter().map(|r| r.service_id).collect();
        let statuses: Vec<&str> = rows.iter().map(|r| r.status.as_str()).collect();

        let query = format!(
            "INSERT INTO contact_submissions \
                (name, email, subject, message, service_id, status) \
             SELECT * FROM UNNEST(\
                $1::text[], $2::text[], $3::text[], $4::text[], $5::bigint[], $6::text[]) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactSubmission>(&query)
            .bind(&names)
            .bind(&emails)
            .bind(&subjects)
            .bind(&messages)
            .bind(&service_ids)
            .bind(&statuses)
            .fetch_all(pool)
            .await
    }
}
