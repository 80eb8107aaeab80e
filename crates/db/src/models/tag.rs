//! Tag and post-tag models.

use folio_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

use super::slug_rule;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `post_tags` junction table.
#[derive(Debug, Clone, FromRow)]
pub struct PostTag {
    pub post_id: DbId,
    pub tag_id: DbId,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Insert DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Validate)]
pub struct NewTag {
    #[validate(length(min = 1, max = 60))]
    pub name: String,
    #[validate(custom(function = "slug_rule"))]
    pub slug: String,
}

/// Link between an existing post and an existing tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NewPostTag {
    pub post_id: DbId,
    pub tag_id: DbId,
}
