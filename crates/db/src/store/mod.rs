//! Bulk persistence interface consumed by seed operations.
//!
//! [`DataStore`] exposes insert-returning, listing, and delete-all primitives
//! per content [`Entity`]. [`PgStore`] is the production implementation;
//! [`MemoryStore`] keeps everything in process and is used for dry runs and
//! tests.

use std::fmt;

use async_trait::async_trait;

use crate::models::category::{Category, NewCategory};
use crate::models::contact_submission::{ContactSubmission, NewContactSubmission};
use crate::models::post::{NewPost, Post};
use crate::models::service::{NewService, Service};
use crate::models::tag::{NewPostTag, NewTag, PostTag, Tag};
use crate::models::user::{NewUser, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A content table the store can bulk-load and clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    User,
    Category,
    Tag,
    Post,
    PostTag,
    Service,
    ContactSubmission,
}

impl Entity {
    /// Every entity, dependencies before dependents.
    pub const ALL: [Entity; 7] = [
        Entity::User,
        Entity::Category,
        Entity::Tag,
        Entity::Post,
        Entity::PostTag,
        Entity::Service,
        Entity::ContactSubmission,
    ];

    /// Backing table name.
    pub fn table_name(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Category => "categories",
            Self::Tag => "tags",
            Self::Post => "posts",
            Self::PostTag => "post_tags",
            Self::Service => "services",
            Self::ContactSubmission => "contact_submissions",
        }
    }

    /// Entities holding foreign keys into this one.
    ///
    /// Rows of this entity cannot be deleted while any of these still have rows.
    pub fn referenced_by(self) -> &'static [Entity] {
        match self {
            Self::User | Self::Category => &[Entity::Post],
            Self::Tag | Self::Post => &[Entity::PostTag],
            Self::Service => &[Entity::ContactSubmission],
            Self::PostTag | Self::ContactSubmission => &[],
        }
    }

    /// Entities this one holds foreign keys into.
    pub fn parents(self) -> &'static [Entity] {
        match self {
            Self::Post => &[Entity::User, Entity::Category],
            Self::PostTag => &[Entity::Post, Entity::Tag],
            Self::ContactSubmission => &[Entity::Service],
            Self::User | Self::Category | Self::Tag | Self::Service => &[],
        }
    }

    /// Column name dependents use to point at this entity.
    pub(crate) fn foreign_key_column(self) -> Option<&'static str> {
        match self {
            Self::User => Some("author_id"),
            Self::Category => Some("category_id"),
            Self::Tag => Some("tag_id"),
            Self::Post => Some("post_id"),
            Self::Service => Some("service_id"),
            Self::PostTag | Self::ContactSubmission => None,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Any database failure not classified below.
    ///
    /// Rendered inline and not exposed as `source()`, so a `{:#}` chain
    /// prints the server message once.
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// A row points at a parent row that does not exist.
    #[error("{entity} row references missing {referenced} '{key}'")]
    MissingReference {
        entity: Entity,
        referenced: Entity,
        key: String,
    },

    /// A unique key (slug, email, or composite key) is already taken.
    #[error("Duplicate {entity} '{key}'")]
    Duplicate { entity: Entity, key: String },

    /// Delete refused because dependent rows still exist.
    #[error("Cannot delete {entity}: rows in {referenced_by} still reference it")]
    InUse {
        entity: Entity,
        referenced_by: Entity,
    },
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// ---------------------------------------------------------------------------
// DataStore
// ---------------------------------------------------------------------------

/// Bulk insert/delete per content entity.
///
/// Every `insert_*` call is all-or-nothing: either every row is created and
/// returned in input order, or nothing is written. `delete_all` on an empty
/// table succeeds with `0`.
///
/// Used as `Arc<dyn DataStore>`.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn insert_users(&self, rows: &[NewUser]) -> StoreResult<Vec<User>>;

    async fn insert_categories(&self, rows: &[NewCategory]) -> StoreResult<Vec<Category>>;

    async fn insert_tags(&self, rows: &[NewTag]) -> StoreResult<Vec<Tag>>;

    async fn insert_posts(&self, rows: &[NewPost]) -> StoreResult<Vec<Post>>;

    async fn insert_post_tags(&self, rows: &[NewPostTag]) -> StoreResult<Vec<PostTag>>;

    async fn insert_services(&self, rows: &[NewService]) -> StoreResult<Vec<Service>>;

    async fn insert_contact_submissions(
        &self,
        rows: &[NewContactSubmission],
    ) -> StoreResult<Vec<ContactSubmission>>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;

    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    async fn list_tags(&self) -> StoreResult<Vec<Tag>>;

    async fn list_posts(&self) -> StoreResult<Vec<Post>>;

    async fn list_services(&self) -> StoreResult<Vec<Service>>;

    /// Remove every row of `entity`, returning how many were removed.
    async fn delete_all(&self, entity: Entity) -> StoreResult<u64>;

    /// Number of rows currently stored for `entity`.
    async fn count(&self, entity: Entity) -> StoreResult<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_table_name() {
        assert_eq!(Entity::PostTag.to_string(), "post_tags");
        assert_eq!(Entity::ContactSubmission.to_string(), "contact_submissions");
    }

    #[test]
    fn parents_mirror_referenced_by() {
        for entity in Entity::ALL {
            for parent in entity.parents() {
                assert!(parent.referenced_by().contains(&entity));
                assert!(parent.foreign_key_column().is_some());
            }
        }
    }

    #[test]
    fn dependents_come_later_in_all() {
        let position = |e: Entity| Entity::ALL.iter().position(|x| *x == e).unwrap();
        for entity in Entity::ALL {
            for dependent in entity.referenced_by() {
                assert!(
                    position(*dependent) > position(entity),
                    "{dependent} should follow {entity}"
                );
            }
        }
    }

    #[test]
    fn database_error_has_no_source() {
        use std::error::Error as _;

        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(err.source().is_none());
        assert_eq!(
            err.to_string(),
            format!("Database error: {}", sqlx::Error::RowNotFound)
        );
    }
}
