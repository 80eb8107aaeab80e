//! Explicit registration and ordering of seed operations.

use std::collections::{HashMap, VecDeque};

use crate::operation::Operation;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Problems with the set of registered operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Operation '{0}' is already registered")]
    DuplicateName(String),

    #[error("Operation '{operation}' depends on unregistered operation '{dependency}'")]
    UnknownDependency {
        operation: String,
        dependency: String,
    },

    #[error("Dependency cycle between operations: {}", .0.join(", "))]
    DependencyCycle(Vec<String>),

    #[error(
        "Operation '{operation}' (order {order}) depends on '{dependency}' \
         (order {dependency_order}), which does not run before it"
    )]
    DependencyOrder {
        operation: String,
        order: i32,
        dependency: String,
        dependency_order: i32,
    },
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The full set of operations known to one seed run.
///
/// Operations are stored in registration order, which doubles as the
/// tie-breaker when two operations declare the same `order`.
#[derive(Default)]
pub struct OperationRegistry {
    operations: Vec<Box<dyn Operation>>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation. Names must be unique.
    pub fn register(&mut self, operation: Box<dyn Operation>) -> Result<(), RegistryError> {
        let name = operation.config().name;
        if self.operations.iter().any(|op| op.config().name == name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        self.operations.push(operation);
        Ok(())
    }

    /// Every operation sorted by ascending `order`.
    ///
    /// The sort is stable, so equal orders keep registration order.
    pub fn sorted(&self) -> Vec<&dyn Operation> {
        let mut sorted: Vec<&dyn Operation> =
            self.operations.iter().map(|op| op.as_ref()).collect();
        sorted.sort_by_key(|op| op.config().order);
        sorted
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Operation names in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.sorted().iter().map(|op| op.config().name).collect()
    }

    /// Check declared dependencies against the declared order.
    ///
    /// Fails when a dependency is not registered, when dependencies form a
    /// cycle, or when a dependency does not sort strictly before its
    /// dependent. Equal `order` values only produce a warning, since
    /// registration order still makes them deterministic.
    ///
    /// Only `depends_on` edges are checked. Rows an operation reads without
    /// declaring the dependency are invisible here.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let sorted = self.sorted();
        let position: HashMap<&str, usize> = sorted
            .iter()
            .enumerate()
            .map(|(index, op)| (op.config().name, index))
            .collect();

        for op in &sorted {
            let config = op.config();
            for dependency in config.depends_on {
                if !position.contains_key(dependency) {
                    return Err(RegistryError::UnknownDependency {
                        operation: config.name.to_string(),
                        dependency: dependency.to_string(),
                    });
                }
            }
        }

        check_acyclic(&sorted, &position)?;

        for (index, op) in sorted.iter().enumerate() {
            let config = op.config();
            for dependency in config.depends_on {
                let dependency_index = position[dependency];
                if dependency_index >= index {
                    let dependency_order = sorted[dependency_index].config().order;
                    return Err(RegistryError::DependencyOrder {
                        operation: config.name.to_string(),
                        order: config.order,
                        dependency: dependency.to_string(),
                        dependency_order,
                    });
                }
            }
        }

        for pair in sorted.windows(2) {
            let (first, second) = (pair[0].config(), pair[1].config());
            if first.order == second.order {
                tracing::warn!(
                    order = first.order,
                    first = first.name,
                    second = second.name,
                    "Operations share an order; falling back to registration order"
                );
            }
        }

        Ok(())
    }
}

/// Kahn's algorithm over the `depends_on` edges. Every dependency must
/// already be present in `position`.
fn check_acyclic(
    sorted: &[&dyn Operation],
    position: &HashMap<&str, usize>,
) -> Result<(), RegistryError> {
    let mut in_degree: Vec<usize> = sorted
        .iter()
        .map(|op| op.config().depends_on.len())
        .collect();
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); sorted.len()];
    for (index, op) in sorted.iter().enumerate() {
        for dependency in op.config().depends_on {
            dependents[position[dependency]].push(index);
        }
    }

    let mut ready: VecDeque<usize> = (0..sorted.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut visited = 0;
    while let Some(index) = ready.pop_front() {
        visited += 1;
        for &dependent in &dependents[index] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.push_back(dependent);
            }
        }
    }

    if visited == sorted.len() {
        return Ok(());
    }

    let mut stuck: Vec<String> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, degree)| **degree > 0)
        .map(|(index, _)| sorted[index].config().name.to_string())
        .collect();
    stuck.sort();
    Err(RegistryError::DependencyCycle(stuck))
}
