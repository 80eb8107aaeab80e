use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use folio_core::slug::slugify;
use folio_db::models::tag::NewPostTag;
use folio_db::store::{DataStore, Entity};

use super::posts::POSTS;
use super::{clear_entity, key_index, resolve};
use crate::operation::{Operation, OperationConfig};

const CONFIG: OperationConfig =
    OperationConfig::new("post_tags", 50, "Links between posts and tags")
        .depends_on(&["posts", "tags"]);

/// Links seeded posts to their tags. Reads both tables back to resolve ids.
pub struct SeedPostTags {
    store: Arc<dyn DataStore>,
}

impl SeedPostTags {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Operation for SeedPostTags {
    fn config(&self) -> &OperationConfig {
        &CONFIG
    }

    async fn execute(&self) -> anyhow::Result<u64> {
        let posts = self.store.list_posts().await.context("failed to load posts")?;
        let posts = key_index(&posts, |p| p.slug.as_str(), |p| p.id);
        let tags = self.store.list_tags().await.context("failed to load tags")?;
        let tags = key_index(&tags, |t| t.slug.as_str(), |t| t.id);

        let mut rows = Vec::new();
        for fixture in POSTS {
            let post_id = resolve(&posts, "post", &slugify(fixture.title))?;
            for tag in fixture.tags {
                rows.push(NewPostTag {
                    post_id,
                    tag_id: resolve(&tags, "tag", tag)?,
                });
            }
        }

        let created = self
            .store
            .insert_post_tags(&rows)
            .await
            .context("failed to insert post tags")?;
        Ok(created.len() as u64)
    }

    async fn clear(&self) -> anyhow::Result<()> {
        clear_entity(self.store.as_ref(), Entity::PostTag).await
    }
}
