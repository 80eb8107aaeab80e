//! Scripted operations that record every call made to them.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::bail;
use async_trait::async_trait;
use folio_seed::operation::{Operation, OperationConfig};
use folio_seed::registry::OperationRegistry;

/// Shared, ordered record of `clear:<name>` / `execute:<name>` calls.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub struct Recorder {
    config: OperationConfig,
    records: u64,
    execute_error: Option<&'static str>,
    clear_error: Option<&'static str>,
    executed: Arc<AtomicUsize>,
    cleared: Arc<AtomicUsize>,
    log: CallLog,
}

/// Handle kept by the test after the recorder moves into a registry.
#[derive(Clone)]
pub struct CallCounts {
    executed: Arc<AtomicUsize>,
    cleared: Arc<AtomicUsize>,
}

impl CallCounts {
    pub fn executed(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }

    pub fn cleared(&self) -> usize {
        self.cleared.load(Ordering::SeqCst)
    }
}

impl Recorder {
    pub fn new(name: &'static str, order: i32, records: u64, log: &CallLog) -> Self {
        Self {
            config: OperationConfig::new(name, order, "recorder"),
            records,
            execute_error: None,
            clear_error: None,
            executed: Arc::default(),
            cleared: Arc::default(),
            log: Arc::clone(log),
        }
    }

    pub fn failing_execute(mut self, message: &'static str) -> Self {
        self.execute_error = Some(message);
        self
    }

    pub fn failing_clear(mut self, message: &'static str) -> Self {
        self.clear_error = Some(message);
        self
    }

    pub fn counts(&self) -> CallCounts {
        CallCounts {
            executed: Arc::clone(&self.executed),
            cleared: Arc::clone(&self.cleared),
        }
    }
}

#[async_trait]
impl Operation for Recorder {
    fn config(&self) -> &OperationConfig {
        &self.config
    }

    async fn execute(&self) -> anyhow::Result<u64> {
        self.executed.fetch_add(1, Ordering::SeqCst);
        self.log
            .lock()
            .unwrap()
            .push(format!("execute:{}", self.config.name));
        // Yield so a sequencing bug would interleave calls.
        tokio::task::yield_now().await;
        match self.execute_error {
            Some(message) => bail!(message),
            None => Ok(self.records),
        }
    }

    async fn clear(&self) -> anyhow::Result<()> {
        self.cleared.fetch_add(1, Ordering::SeqCst);
        self.log
            .lock()
            .unwrap()
            .push(format!("clear:{}", self.config.name));
        match self.clear_error {
            Some(message) => bail!(message),
            None => Ok(()),
        }
    }
}

pub fn new_log() -> CallLog {
    Arc::default()
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Register recorders in the given order, returning their call counters.
pub fn registry_of(recorders: Vec<Recorder>) -> (OperationRegistry, Vec<CallCounts>) {
    let mut registry = OperationRegistry::new();
    let mut counts = Vec::new();
    for recorder in recorders {
        counts.push(recorder.counts());
        registry.register(Box::new(recorder)).unwrap();
    }
    (registry, counts)
}
