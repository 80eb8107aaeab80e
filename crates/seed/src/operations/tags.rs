use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use folio_core::slug::slugify;
use folio_core::validation::validate_batch;
use folio_db::models::tag::NewTag;
use folio_db::store::{DataStore, Entity};

use super::clear_entity;
use crate::operation::{Operation, OperationConfig};

const CONFIG: OperationConfig = OperationConfig::new("tags", 30, "Blog tags");

pub(crate) const TAGS: &[&str] = &[
    "Rust",
    "PostgreSQL",
    "Accessibility",
    "Product",
    "Hiring",
    "Case Study",
];

pub struct SeedTags {
    store: Arc<dyn DataStore>,
}

impl SeedTags {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Operation for SeedTags {
    fn config(&self) -> &OperationConfig {
        &CONFIG
    }

    async fn execute(&self) -> anyhow::Result<u64> {
        let rows: Vec<NewTag> = TAGS
            .iter()
            .map(|name| NewTag {
                name: name.to_string(),
                slug: slugify(name),
            })
            .collect();
        validate_batch("tag", &rows)?;

        let created = self
            .store
            .insert_tags(&rows)
            .await
            .context("failed to insert tags")?;
        Ok(created.len() as u64)
    }

    async fn clear(&self) -> anyhow::Result<()> {
        clear_entity(self.store.as_ref(), Entity::Tag).await
    }
}
