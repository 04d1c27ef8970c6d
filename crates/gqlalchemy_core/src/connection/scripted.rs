//! In-memory connection that records queries and replays canned rows.
//!
//! # Invariants
//! - Every call is recorded, including calls that fail.
//! - Queued result sets are consumed in FIFO order, one per
//!   `execute_and_fetch`; an empty queue yields no rows.
//! - An armed failure is consumed by the next call of either kind.

use super::{Connection, ConnectionError, ConnectionResult};
use crate::model::Record;
use log::debug;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct ScriptState {
    executed: Vec<String>,
    results: VecDeque<Vec<Record>>,
    failure: Option<String>,
}

/// Scripted `Connection` for dry runs and tests.
#[derive(Debug, Default)]
pub struct ScriptedConnection {
    state: Mutex<ScriptState>,
}

impl ScriptedConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues rows for a future `execute_and_fetch`.
    pub fn push_result(&self, records: Vec<Record>) {
        self.lock().results.push_back(records);
    }

    /// Makes the next call fail with `ConnectionError::Query`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.lock().failure = Some(message.into());
    }

    /// Queries received so far, in call order.
    pub fn executed(&self) -> Vec<String> {
        self.lock().executed.clone()
    }

    fn lock(&self) -> MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, query: &str) -> ConnectionResult<MutexGuard<'_, ScriptState>> {
        let mut state = self.lock();
        state.executed.push(query.to_string());
        debug!(
            "event=scripted_call module=connection calls={} query_len={}",
            state.executed.len(),
            query.len()
        );
        match state.failure.take() {
            Some(message) => Err(ConnectionError::Query { message }),
            None => Ok(state),
        }
    }
}

impl Connection for ScriptedConnection {
    fn execute(&self, query: &str) -> ConnectionResult<()> {
        self.record(query).map(|_| ())
    }

    fn execute_and_fetch(&self, query: &str) -> ConnectionResult<Vec<Record>> {
        let mut state = self.record(query)?;
        Ok(state.results.pop_front().unwrap_or_default())
    }
}
