//! PostgreSQL-backed [`DataStore`].

use async_trait::async_trait;
use sqlx::PgPool;

use super::{DataStore, Entity, StoreError, StoreResult};
use crate::models::category::{Category, NewCategory};
use crate::models::contact_submission::{ContactSubmission, NewContactSubmission};
use crate::models::post::{NewPost, Post};
use crate::models::service::{NewService, Service};
use crate::models::tag::{NewPostTag, NewTag, PostTag, Tag};
use crate::models::user::{NewUser, User};
use crate::repositories::{
    self, CategoryRepo, ContactSubmissionRepo, PostRepo, PostTagRepo, ServiceRepo, TagRepo,
    UserRepo,
};

/// PostgreSQL unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// [`DataStore`] over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map constraint violations onto the store's error variants.
///
/// - Unique violations become [`StoreError::Duplicate`] keyed by constraint name.
/// - Foreign key violations on insert become [`StoreError::MissingReference`];
///   on delete they become [`StoreError::InUse`] naming the referencing table.
/// - Everything else is passed through as [`StoreError::Database`].
fn classify(entity: Entity, deleting: bool, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or("unknown").to_string();
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                return StoreError::Duplicate {
                    entity,
                    key: constraint,
                };
            }
            Some(FOREIGN_KEY_VIOLATION) if deleting => {
                let referenced_by = entity.referenced_by().iter().copied().find(|dependent| {
                    let table = dependent.table_name();
                    db_err.table() == Some(table) || constraint.starts_with(&format!("{table}_"))
                });
                if let Some(referenced_by) = referenced_by {
                    return StoreError::InUse {
                        entity,
                        referenced_by,
                    };
                }
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                let referenced = entity
                    .parents()
                    .iter()
                    .copied()
                    .find(|parent| {
                        parent
                            .foreign_key_column()
                            .is_some_and(|column| constraint.contains(column))
                    })
                    .unwrap_or(entity);
                return StoreError::MissingReference {
                    entity,
                    referenced,
                    key: constraint,
                };
            }
            _ => {}
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl DataStore for PgStore {
    async fn insert_users(&self, rows: &[NewUser]) -> StoreResult<Vec<User>> {
        UserRepo::insert_many(&self.pool, rows)
            .await
            .map_err(|e| classify(Entity::User, false, e))
    }

    async fn insert_categories(&self, rows: &[NewCategory]) -> StoreResult<Vec<Category>> {
        CategoryRepo::insert_many(&self.pool, rows)
            .await
            .map_err(|e| classify(Entity::Category, false, e))
    }

    async fn insert_tags(&self, rows: &[NewTag]) -> StoreResult<Vec<Tag>> {
        TagRepo::insert_many(&self.pool, rows)
            .await
            .map_err(|e| classify(Entity::Tag, false, e))
    }

    async fn insert_posts(&self, rows: &[NewPost]) -> StoreResult<Vec<Post>> {
        PostRepo::insert_many(&self.pool, rows)
            .await
            .map_err(|e| classify(Entity::Post, false, e))
    }

    async fn insert_post_tags(&self, rows: &[NewPostTag]) -> StoreResult<Vec<PostTag>> {
        PostTagRepo::insert_many(&self.pool, rows)
            .await
            .map_err(|e| classify(Entity::PostTag, false, e))
    }

    async fn insert_services(&self, rows: &[NewService]) -> StoreResult<Vec<Service>> {
        ServiceRepo::insert_many(&self.pool, rows)
            .await
            .map_err(|e| classify(Entity::Service, false, e))
    }

    async fn insert_contact_submissions(
        &self,
        rows: &[NewContactSubmission],
    ) -> StoreResult<Vec<ContactSubmission>> {
        ContactSubmissionRepo::insert_many(&self.pool, rows)
            .await
            .map_err(|e| classify(Entity::ContactSubmission, false, e))
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(UserRepo::list_all(&self.pool).await?)
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(CategoryRepo::list_all(&self.pool).await?)
    }

    async fn list_tags(&self) -> StoreResult<Vec<Tag>> {
        Ok(TagRepo::list_all(&self.pool).await?)
    }

    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        Ok(PostRepo::list_all(&self.pool).await?)
    }

    async fn list_services(&self) -> StoreResult<Vec<Service>> {
        Ok(ServiceRepo::list_all(&self.pool).await?)
    }

    async fn delete_all(&self, entity: Entity) -> StoreResult<u64> {
        let removed = repositories::delete_all_rows(&self.pool, entity.table_name())
            .await
            .map_err(|e| classify(entity, true, e))?;
        tracing::debug!(table = entity.table_name(), removed, "Deleted all rows");
        Ok(removed)
    }

    async fn count(&self, entity: Entity) -> StoreResult<u64> {
        Ok(repositories::count_rows(&self.pool, entity.table_name()).await?)
    }
}
