//! The unit of work the orchestrator sequences.

use async_trait::async_trait;

/// Static description of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationConfig {
    /// Unique within a registry.
    pub name: &'static str,
    /// Execution position. Lower runs first; gaps are fine.
    pub order: i32,
    /// One-line human description shown by `--list`.
    pub description: &'static str,
    /// Operations whose rows this one reads. Checked by
    /// [`OperationRegistry::validate`](crate::registry::OperationRegistry::validate).
    pub depends_on: &'static [&'static str],
}

impl OperationConfig {
    pub const fn new(name: &'static str, order: i32, description: &'static str) -> Self {
        Self {
            name,
            order,
            description,
            depends_on: &[],
        }
    }

    pub const fn depends_on(self, depends_on: &'static [&'static str]) -> Self {
        Self { depends_on, ..self }
    }
}

/// A named, ordered unit of batch data load/unload logic.
///
/// `clear` must succeed when there is nothing to clear. Implementations
/// receive their [`DataStore`](folio_db::store::DataStore) at construction.
#[async_trait]
pub trait Operation: Send + Sync {
    fn config(&self) -> &OperationConfig;

    /// Load this operation's rows, returning how many records were created.
    async fn execute(&self) -> anyhow::Result<u64>;

    /// Remove this operation's rows.
    async fn clear(&self) -> anyhow::Result<()>;
}
