//! Contact form submissions.

use folio_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// Submission has not been looked at yet.
pub const CONTACT_STATUS_NEW: &str = "new";

/// Someone has replied to the submitter.
pub const CONTACT_STATUS_REPLIED: &str = "replied";

/// A row from the `contact_submissions` table.
#[derive(Debug, Clone, FromRow)]
pub struct ContactSubmission {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    /// Service the enquiry is about, if the visitor picked one.
    pub service_id: Option<DbId>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Validate)]
pub struct NewContactSubmission {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
    pub service_id: Option<DbId>,
    pub status: String,
}
