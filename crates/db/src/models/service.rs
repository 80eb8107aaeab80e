//! Service offerings listed on the public site.

use folio_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

use super::slug_rule;

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow)]
pub struct Service {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub summary: String,
    /// `None` means "price on request".
    pub price_cents: Option<i64>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Validate)]
pub struct NewService {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(custom(function = "slug_rule"))]
    pub slug: String,
    #[validate(length(min = 1, max = 500))]
    pub summary: String,
    #[validate(range(min = 0))]
    pub price_cents: Option<i64>,
    pub sort_order: i32,
    pub is_active: bool,
}
