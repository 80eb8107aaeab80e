//! In-process [`DataStore`] for dry runs and tests.
//!
//! Mirrors the constraints the SQL schema enforces: unique slugs and emails,
//! foreign keys on insert, and `ON DELETE RESTRICT` on delete. Each insert
//! batch is checked in full before any row is written.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use folio_core::types::DbId;
use tokio::sync::Mutex;

use super::{DataStore, Entity, StoreError, StoreResult};
use crate::models::category::{Category, NewCategory};
use crate::models::contact_submission::{ContactSubmission, NewContactSubmission};
use crate::models::post::{NewPost, Post};
use crate::models::service::{NewService, Service};
use crate::models::tag::{NewPostTag, NewTag, PostTag, Tag};
use crate::models::user::{NewUser, User};

#[derive(Debug, Default)]
struct Tables {
    last_id: DbId,
    users: Vec<User>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
    posts: Vec<Post>,
    post_tags: Vec<PostTag>,
    services: Vec<Service>,
    contact_submissions: Vec<ContactSubmission>,
}

impl Tables {
    /// Ids are never reused, even after `delete_all`, matching BIGSERIAL.
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    fn len(&self, entity: Entity) -> usize {
        match entity {
            Entity::User => self.users.len(),
            Entity::Category => self.categories.len(),
            Entity::Tag => self.tags.len(),
            Entity::Post => self.posts.len(),
            Entity::PostTag => self.post_tags.len(),
            Entity::Service => self.services.len(),
            Entity::ContactSubmission => self.contact_submissions.len(),
        }
    }

    fn clear(&mut self, entity: Entity) {
        match entity {
            Entity::User => self.users.clear(),
            Entity::Category => self.categories.clear(),
            Entity::Tag => self.tags.clear(),
            Entity::Post => self.posts.clear(),
            Entity::PostTag => self.post_tags.clear(),
            Entity::Service => self.services.clear(),
            Entity::ContactSubmission => self.contact_submissions.clear(),
        }
    }
}

/// Reject keys already present in `existing` or repeated within the batch.
fn ensure_unique<'a>(
    entity: Entity,
    existing: impl Iterator<Item = &'a str>,
    incoming: impl Iterator<Item = &'a str>,
) -> StoreResult<()> {
    let mut seen: HashSet<&str> = existing.collect();
    for key in incoming {
        if !seen.insert(key) {
            return Err(StoreError::Duplicate {
                entity,
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

fn ensure_exists(
    entity: Entity,
    referenced: Entity,
    mut ids: impl Iterator<Item = DbId>,
    id: DbId,
) -> StoreResult<()> {
    if ids.any(|existing| existing == id) {
        Ok(())
    } else {
        Err(StoreError::MissingReference {
            entity,
            referenced,
            key: id.to_string(),
        })
    }
}

/// [`DataStore`] holding all tables behind a single async mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn insert_users(&self, rows: &[NewUser]) -> StoreResult<Vec<User>> {
        let mut tables = self.tables.lock().await;
        ensure_unique(
            Entity::User,
            tables.users.iter().map(|u| u.email.as_str()),
            rows.iter().map(|r| r.email.as_str()),
        )?;

        let now = Utc::now();
        let mut created = Vec::with_capacity(rows.len());
        for row in rows {
            let user = User {
                id: tables.next_id(),
                email: row.email.clone(),
                display_name: row.display_name.clone(),
                role: row.role.clone(),
                created_at: now,
                updated_at: now,
            };
            tables.users.push(user.clone());
            created.push(user);
        }
        Ok(created)
    }

    async fn insert_categories(&self, rows: &[NewCategory]) -> StoreResult<Vec<Category>> {
        let mut tables = self.tables.lock().await;
        ensure_unique(
            Entity::Category,
            tables.categories.iter().map(|c| c.slug.as_str()),
            rows.iter().map(|r| r.slug.as_str()),
        )?;

        let now = Utc::now();
        let mut created = Vec::with_capacity(rows.len());
        for row in rows {
            let category = Category {
                id: tables.next_id(),
                name: row.name.clone(),
                slug: row.slug.clone(),
                description: row.description.clone(),
                created_at: now,
                updated_at: now,
            };
            tables.categories.push(category.clone());
            created.push(category);
        }
        Ok(created)
    }

    async fn insert_tags(&self, rows: &[NewTag]) -> StoreResult<Vec<Tag>> {
        let mut tables = self.tables.lock().await;
        ensure_unique(
            Entity::Tag,
            tables.tags.iter().map(|t| t.slug.as_str()),
            rows.iter().map(|r| r.slug.as_str()),
        )?;

        let now = Utc::now();
        let mut created = Vec::with_capacity(rows.len());
        for row in rows {
            let tag = Tag {
                id: tables.next_id(),
                name: row.name.clone(),
                slug: row.slug.clone(),
                created_at: now,
                updated_at: now,
            };
            tables.tags.push(tag.clone());
            created.push(tag);
        }
        Ok(created)
    }

    async fn insert_posts(&self, rows: &[NewPost]) -> StoreResult<Vec<Post>> {
        let mut tables = self.tables.lock().await;
        ensure_unique(
            Entity::Post,
            tables.posts.iter().map(|p| p.slug.as_str()),
            rows.iter().map(|r| r.slug.as_str()),
        )?;
        for row in rows {
            ensure_exists(
                Entity::Post,
                Entity::User,
                tables.users.iter().map(|u| u.id),
                row.author_id,
            )?;
            ensure_exists(
                Entity::Post,
                Entity::Category,
                tables.categories.iter().map(|c| c.id),
                row.category_id,
            )?;
        }

        let now = Utc::now();
        let mut created = Vec::with_capacity(rows.len());
        for row in rows {
            let post = Post {
                id: tables.next_id(),
                title: row.title.clone(),
                slug: row.slug.clone(),
                excerpt: row.excerpt.clone(),
                body: row.body.clone(),
                status: row.status.clone(),
                author_id: row.author_id,
                category_id: row.category_id,
                published_at: row.published_at,
                created_at: now,
                updated_at: now,
            };
            tables.posts.push(post.clone());
            created.push(post);
        }
        Ok(created)
    }

    async fn insert_post_tags(&self, rows: &[NewPostTag]) -> StoreResult<Vec<PostTag>> {
        let mut tables = self.tables.lock().await;

        let mut seen: HashSet<(DbId, DbId)> =
            tables.post_tags.iter().map(|pt| (pt.post_id, pt.tag_id)).collect();
        for row in rows {
            if !seen.insert((row.post_id, row.tag_id)) {
                return Err(StoreError::Duplicate {
                    entity: Entity::PostTag,
                    key: format!("({}, {})", row.post_id, row.tag_id),
                });
            }
            ensure_exists(
                Entity::PostTag,
                Entity::Post,
                tables.posts.iter().map(|p| p.id),
                row.post_id,
            )?;
            ensure_exists(
                Entity::PostTag,
                Entity::Tag,
                tables.tags.iter().map(|t| t.id),
                row.tag_id,
            )?;
        }

        let now = Utc::now();
        let created: Vec<PostTag> = rows
            .iter()
            .map(|row| PostTag {
                post_id: row.post_id,
                tag_id: row.tag_id,
                created_at: now,
            })
            .collect();
        tables.post_tags.extend(created.iter().cloned());
        Ok(created)
    }

    async fn insert_services(&self, rows: &[NewService]) -> StoreResult<Vec<Service>> {
        let mut tables = self.tables.lock().await;
        ensure_unique(
            Entity::Service,
            tables.services.iter().map(|s| s.slug.as_str()),
            rows.iter().map(|r| r.slug.as_str()),
        )?;

        let now = Utc::now();
        let mut created = Vec::with_capacity(rows.len());
        for row in rows {
            let service = Service {
                id: tables.next_id(),
                name: row.name.clone(),
                slug: row.slug.clone(),
                summary: row.summary.clone(),
                price_cents: row.price_cents,
                sort_order: row.sort_order,
                is_active: row.is_active,
                created_at: now,
                updated_at: now,
            };
            tables.services.push(service.clone());
            created.push(service);
        }
        Ok(created)
    }

    async fn insert_contact_submissions(
        &self,
        rows: &[NewContactSubmission],
    ) -> StoreResult<Vec<ContactSubmission>> {
        let mut tables = self.tables.lock().await;
        for service_id in rows.iter().filter_map(|r| r.service_id) {
            ensure_exists(
                Entity::ContactSubmission,
                Entity::Service,
                tables.services.iter().map(|s| s.id),
                service_id,
            )?;
        }

        let now = Utc::now();
        let mut created = Vec::with_capacity(rows.len());
        for row in rows {
            let submission = ContactSubmission {
                id: tables.next_id(),
                name: row.name.clone(),
                email: row.email.clone(),
                subject: row.subject.clone(),
                message: row.message.clone(),
                service_id: row.service_id,
                status: row.status.clone(),
                created_at: now,
                updated_at: now,
            };
            tables.contact_submissions.push(submission.clone());
            created.push(submission);
        }
        Ok(created)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.tables.lock().await.users.clone())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let mut categories = self.tables.lock().await.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn list_tags(&self) -> StoreResult<Vec<Tag>> {
        let mut tags = self.tables.lock().await.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        Ok(self.tables.lock().await.posts.clone())
    }

    async fn list_services(&self) -> StoreResult<Vec<Service>> {
        let mut services = self.tables.lock().await.services.clone();
        services.sort_by_key(|s| (s.sort_order, s.id));
        Ok(services)
    }

    async fn delete_all(&self, entity: Entity) -> StoreResult<u64> {
        let mut tables = self.tables.lock().await;
        if tables.len(entity) == 0 {
            return Ok(0);
        }
        if let Some(referenced_by) = entity
            .referenced_by()
            .iter()
            .copied()
            .find(|dependent| tables.len(*dependent) > 0)
        {
            return Err(StoreError::InUse {
                entity,
                referenced_by,
            });
        }

        let removed = tables.len(entity) as u64;
        tables.clear(entity);
        Ok(removed)
    }

    async fn count(&self, entity: Entity) -> StoreResult<u64> {
        Ok(self.tables.lock().await.len(entity) as u64)
    }
}
