use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use folio_core::slug::slugify;
use folio_core::validation::validate_batch;
use folio_db::models::category::NewCategory;
use folio_db::store::{DataStore, Entity};

use super::clear_entity;
use crate::operation::{Operation, OperationConfig};

const CONFIG: OperationConfig = OperationConfig::new("categories", 20, "Blog categories");

/// `(name, description)`; slugs are derived from the name.
pub(crate) const CATEGORIES: &[(&str, &str)] = &[
    ("Engineering", "How the platform is built and run."),
    ("Design", "Interface, brand, and accessibility work."),
    ("Company News", "Announcements, hires, and milestones."),
];

pub struct SeedCategories {
    store: Arc<dyn DataStore>,
}

impl SeedCategories {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Operation for SeedCategories {
    fn config(&self) -> &OperationConfig {
        &CONFIG
    }

    async fn execute(&self) -> anyhow::Result<u64> {
        let rows: Vec<NewCategory> = CATEGORIES
            .iter()
            .map(|(name, description)| NewCategory {
                name: name.to_string(),
                slug: slugify(name),
                description: Some(description.to_string()),
            })
            .collect();
        validate_batch("category", &rows)?;

        let created = self
            .store
            .insert_categories(&rows)
            .await
            .context("failed to insert categories")?;
        Ok(created.len() as u64)
    }

    async fn clear(&self) -> anyhow::Result<()> {
        clear_entity(self.store.as_ref(), Entity::Category).await
    }
}
