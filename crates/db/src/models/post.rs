//! Blog post model.

use folio_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

use super::slug_rule;

/// Not yet visible on the public site.
pub const POST_STATUS_DRAFT: &str = "draft";

/// Visible on the public site from `published_at` onward.
pub const POST_STATUS_PUBLISHED: &str = "published";

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub status: String,
    pub author_id: DbId,
    pub category_id: DbId,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload for a post. Author and category must already exist.
#[derive(Debug, Clone, Validate)]
pub struct NewPost {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(custom(function = "slug_rule"))]
    pub slug: String,
    #[validate(length(max = 500))]
    pub excerpt: Option<String>,
    #[validate(length(min = 1))]
    pub body: String,
    pub status: String,
    pub author_id: DbId,
    pub category_id: DbId,
    pub published_at: Option<Timestamp>,
}
