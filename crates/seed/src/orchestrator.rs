//! Clear-then-load sequencing over an [`OperationRegistry`].
//!
//! A run clears every operation in reverse order (best effort), then
//! executes every operation in declared order, stopping at the first
//! failure. Operations run strictly one at a time: later operations may
//! read rows written by earlier ones.

use std::time::Instant;

use tracing::Instrument;
use uuid::Uuid;

use crate::operation::Operation;
use crate::registry::OperationRegistry;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of one operation's `execute`.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    pub name: String,
    pub records_created: u64,
    pub execution_time_ms: f64,
    pub success: bool,
    pub error: Option<String>,
}

impl OperationResult {
    pub fn succeeded(name: &str, records_created: u64, execution_time_ms: f64) -> Self {
        Self {
            name: name.to_string(),
            records_created,
            execution_time_ms,
            success: true,
            error: None,
        }
    }

    pub fn failed(name: &str, execution_time_ms: f64, error: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            records_created: 0,
            execution_time_ms,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Lifecycle of a single run.
///
/// `Idle -> Clearing -> Executing -> {Completed | FailedEarly}`; an
/// execute-only run skips `Clearing`. Terminal states never transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Clearing,
    Executing,
    Completed,
    FailedEarly,
}

impl RunState {
    pub fn can_transition_to(self, next: RunState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Clearing)
                | (Self::Idle, Self::Executing)
                | (Self::Clearing, Self::Executing)
                | (Self::Executing, Self::Completed)
                | (Self::Executing, Self::FailedEarly)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::FailedEarly)
    }
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub state: RunState,
    /// One entry per attempted operation, in execution order.
    pub results: Vec<OperationResult>,
}

impl RunReport {
    /// True only when every registered operation executed successfully.
    pub fn is_success(&self) -> bool {
        self.state == RunState::Completed
    }

    /// The result that stopped the run, if any.
    pub fn failure(&self) -> Option<&OperationResult> {
        self.results.iter().find(|r| !r.success)
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Runs the operations of a registry.
///
/// Each call to [`run_all`](Self::run_all) is independent; nothing is
/// retained between runs.
pub struct Orchestrator {
    registry: OperationRegistry,
}

impl Orchestrator {
    pub fn new(registry: OperationRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Clear everything in reverse order, then execute everything in order.
    ///
    /// Clear failures are logged and ignored. The first execute failure is
    /// recorded and ends the run; later operations are never attempted.
    pub async fn run_all(&self) -> RunReport {
        let run_id = Uuid::now_v7();
        let span = tracing::info_span!("seed_run", %run_id);
        async {
            let mut state = RunState::Idle;
            tracing::info!(operations = self.registry.len(), "Seed run starting");

            advance(&mut state, RunState::Clearing);
            self.clear_phase().await;

            advance(&mut state, RunState::Executing);
            let results = self.execute_phase().await;
            finish(state, results)
        }
        .instrument(span)
        .await
    }

    /// Clear phase only. Returns how many `clear` calls failed.
    pub async fn clear_all(&self) -> usize {
        let run_id = Uuid::now_v7();
        self.clear_phase()
            .instrument(tracing::info_span!("seed_clear", %run_id))
            .await
    }

    /// Execute phase only, without clearing first.
    pub async fn execute_all(&self) -> RunReport {
        let run_id = Uuid::now_v7();
        async {
            let mut state = RunState::Idle;
            advance(&mut state, RunState::Executing);
            let results = self.execute_phase().await;
            finish(state, results)
        }
        .instrument(tracing::info_span!("seed_execute", %run_id))
        .await
    }

    async fn clear_phase(&self) -> usize {
        let mut failures = 0;
        for op in self.registry.sorted().into_iter().rev() {
            let name = op.config().name;
            match op.clear().await {
                Ok(()) => tracing::debug!(operation = name, "Cleared"),
                Err(err) => {
                    failures += 1;
                    tracing::warn!(
                        operation = name,
                        error = %format!("{err:#}"),
                        "Clear failed, continuing"
                    );
                }
            }
        }
        tracing::info!(failures, "Clear phase finished");
        failures
    }

    async fn execute_phase(&self) -> Vec<OperationResult> {
        let mut results = Vec::with_capacity(self.registry.len());
        for op in self.registry.sorted() {
            let result = execute_one(op).await;
            let failed = !result.success;
            results.push(result);
            if failed {
                break;
            }
        }
        results
    }
}

async fn execute_one(op: &dyn Operation) -> OperationResult {
    let config = op.config();
    tracing::info!(operation = config.name, order = config.order, "Executing");

    let start = Instant::now();
    let outcome = op.execute().await;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    match outcome {
        Ok(records) => {
            tracing::info!(operation = config.name, records, elapsed_ms, "Executed");
            OperationResult::succeeded(config.name, records, elapsed_ms)
        }
        Err(err) => {
            let message = format!("{err:#}");
            tracing::error!(
                operation = config.name,
                elapsed_ms,
                error = %message,
                "Execute failed, stopping"
            );
            OperationResult::failed(config.name, elapsed_ms, message)
        }
    }
}

fn advance(state: &mut RunState, next: RunState) {
    debug_assert!(
        state.can_transition_to(next),
        "invalid run state transition {state:?} -> {next:?}"
    );
    tracing::debug!(from = ?*state, to = ?next, "Run state changed");
    *state = next;
}

fn finish(mut state: RunState, results: Vec<OperationResult>) -> RunReport {
    let next = if results.iter().all(|r| r.success) {
        RunState::Completed
    } else {
        RunState::FailedEarly
    };
    advance(&mut state, next);
    tracing::info!(state = ?state, attempted = results.len(), "Seed run finished");
    RunReport { state, results }
}
