//! Seed operations for the content tables.
//!
//! Each operation owns one table and receives the store it writes to at
//! construction. [`default_registry`] is the single place they are wired
//! together.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::store::{DataStore, Entity};

use crate::config::SeedConfig;
use crate::registry::{OperationRegistry, RegistryError};

pub mod categories;
pub mod contact_submissions;
pub mod post_tags;
pub mod posts;
pub mod services;
pub mod tags;
pub mod users;

pub use categories::SeedCategories;
pub use contact_submissions::SeedContactSubmissions;
pub use post_tags::SeedPostTags;
pub use posts::SeedPosts;
pub use services::SeedServices;
pub use tags::SeedTags;
pub use users::SeedUsers;

/// Register every content operation against `store`.
pub fn default_registry(
    store: Arc<dyn DataStore>,
    config: &SeedConfig,
) -> Result<OperationRegistry, RegistryError> {
    let mut registry = OperationRegistry::new();
    registry.register(Box::new(SeedUsers::new(Arc::clone(&store), config.admin.clone())))?;
    registry.register(Box::new(SeedCategories::new(Arc::clone(&store))))?;
    registry.register(Box::new(SeedTags::new(Arc::clone(&store))))?;
    registry.register(Box::new(SeedPosts::new(
        Arc::clone(&store),
        config.admin.email.clone(),
    )))?;
    registry.register(Box::new(SeedPostTags::new(Arc::clone(&store))))?;
    registry.register(Box::new(SeedServices::new(Arc::clone(&store))))?;
    registry.register(Box::new(SeedContactSubmissions::new(store)))?;
    Ok(registry)
}

/// Delete every row of `entity`.
async fn clear_entity(store: &dyn DataStore, entity: Entity) -> anyhow::Result<()> {
    let removed = store
        .delete_all(entity)
        .await
        .with_context(|| format!("failed to clear {entity}"))?;
    tracing::debug!(table = entity.table_name(), removed, "Cleared table");
    Ok(())
}

/// Map natural keys (slugs, emails) to ids.
fn key_index<T>(
    rows: &[T],
    key: impl Fn(&T) -> &str,
    id: impl Fn(&T) -> DbId,
) -> HashMap<String, DbId> {
    rows.iter().map(|row| (key(row).to_string(), id(row))).collect()
}

/// Look up a natural key that a fixture refers to.
fn resolve(
    index: &HashMap<String, DbId>,
    entity: &'static str,
    key: &str,
) -> Result<DbId, CoreError> {
    index.get(key).copied().ok_or_else(|| CoreError::NotFound {
        entity,
        key: key.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn resolve_reports_missing_key() {
        let index = HashMap::from([("rust".to_string(), 7)]);
        assert_eq!(resolve(&index, "tag", "rust").unwrap(), 7);
        assert_matches!(
            resolve(&index, "tag", "go"),
            Err(CoreError::NotFound { entity: "tag", ref key }) if key == "go"
        );
    }
}
