use folio_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

use super::slug_rule;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Validate)]
pub struct NewCategory {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[validate(custom(function = "slug_rule"))]
    pub slug: String,
    pub description: Option<String>,
}
