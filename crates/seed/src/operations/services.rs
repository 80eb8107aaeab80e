use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use folio_core::slug::slugify;
use folio_core::validation::validate_batch;
use folio_db::models::service::NewService;
use folio_db::store::{DataStore, Entity};

use super::clear_entity;
use crate::operation::{Operation, OperationConfig};

const CONFIG: OperationConfig =
    OperationConfig::new("services", 60, "Service offerings shown on the site");

/// `(name, summary, price in cents)`; `None` means "price on request".
const SERVICES: &[(&str, &str, Option<i64>)] = &[
    (
        "Website Design",
        "Discovery, wireframes, and a responsive build on the Folio CMS.",
        Some(450_000),
    ),
    (
        "Content Strategy",
        "Editorial calendar, tone of voice, and SEO review.",
        Some(180_000),
    ),
    (
        "Ongoing Support",
        "Monthly retainer for updates, monitoring, and small changes.",
        None,
    ),
];

pub struct SeedServices {
    store: Arc<dyn DataStore>,
}

impl SeedServices {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Operation for SeedServices {
    fn config(&self) -> &OperationConfig {
        &CONFIG
    }

    async fn execute(&self) -> anyhow::Result<u64> {
        let rows: Vec<NewService> = SERVICES
            .iter()
            .zip(1..)
            .map(|((name, summary, price_cents), sort_order)| NewService {
                name: name.to_string(),
                slug: slugify(name),
                summary: summary.to_string(),
                price_cents: *price_cents,
                sort_order,
                is_active: true,
            })
            .collect();
        validate_batch("service", &rows)?;

        let created = self
            .store
            .insert_services(&rows)
            .await
            .context("failed to insert services")?;
        Ok(created.len() as u64)
    }

    async fn clear(&self) -> anyhow::Result<()> {
        clear_entity(self.store.as_ref(), Entity::Service).await
    }
}
