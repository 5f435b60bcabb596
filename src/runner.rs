//! The verification run: connect, insert one entry, read everything back,
//! report, release.
//!
//! A run never returns an error to its caller. Every failure is reported to
//! the sink once and summarized in the returned [`RunOutcome`]; the store is
//! released on every path that managed to connect.

use std::fmt;
use std::future::Future;

use entrycheck_common::{Error, Result};
use entrycheck_db::models::TestEntry;
use entrycheck_db::store::Store;
use serde::Serialize;

use crate::sink::Sink;

/// Name given to the entry each run inserts.
pub const TEST_ENTRY_NAME: &str = "Test Entry";

/// Lifecycle of a runner. `Idle -> Connected -> Closed`, or straight to
/// `Closed` when connecting fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Connected,
    Closed,
}

/// Step of the run that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The runner had already finished a run; no store was contacted.
    Start,
    Connect,
    Insert,
    Query,
    Verify,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Connect => write!(f, "connect"),
            Self::Insert => write!(f, "insert"),
            Self::Query => write!(f, "query"),
            Self::Verify => write!(f, "verify"),
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The entry was created and found in the read-all result of `total`
    /// entries.
    Verified { created: TestEntry, total: usize },
    /// The run stopped at `stage`; `message` is what the sink received.
    Failed { stage: Stage, message: String },
}

impl RunOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }
}

/// Runs the create-then-read check against a store, reporting to a sink.
///
/// A runner is single-use; once it reaches [`RunState::Closed`] further runs
/// fail without touching any store.
pub struct VerificationRunner<K> {
    sink: K,
    state: RunState,
}

impl<K: Sink> VerificationRunner<K> {
    pub fn new(sink: K) -> Self {
        Self {
            sink,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Execute the run. `connect` yields the store handle; it is awaited
    /// first and everything else happens strictly after it.
    pub async fn run<S, C>(&mut self, connect: C) -> RunOutcome
    where
        S: Store,
        C: Future<Output = Result<S>>,
    {
        if self.state != RunState::Idle {
            return self.fail(
                Stage::Start,
                Error::internal("verification runner already used"),
            );
        }

        let store = match connect.await {
            Ok(store) => store,
            Err(e) => {
                self.state = RunState::Closed;
                return self.fail(Stage::Connect, e);
            }
        };
        self.state = RunState::Connected;
        tracing::debug!("Connected; starting verification");

        let outcome = match self.verify(&store).await {
            Ok((created, total)) => {
                tracing::debug!(id = %created.id, total, "Verification succeeded");
                RunOutcome::Verified { created, total }
            }
            Err((stage, e)) => self.fail(stage, e),
        };

        if let Err(e) = store.disconnect().await {
            tracing::warn!("Failed to disconnect from store: {}", e);
        }
        self.state = RunState::Closed;

        outcome
    }

    async fn verify<S: Store>(
        &mut self,
        store: &S,
    ) -> std::result::Result<(TestEntry, usize), (Stage, Error)> {
        let created = store
            .insert_test_entry(TEST_ENTRY_NAME)
            .await
            .map_err(|e| (Stage::Insert, e))?;
        let line = render(&created).map_err(|e| (Stage::Insert, e))?;
        self.sink.info(&format!("Created test entry: {line}"));

        let all = store
            .find_all_test_entries()
            .await
            .map_err(|e| (Stage::Query, e))?;
        let line = render(&all).map_err(|e| (Stage::Query, e))?;
        self.sink.info(&format!("All test entries: {line}"));

        if !all.iter().any(|e| e.id == created.id) {
            return Err((
                Stage::Verify,
                Error::verification(format!(
                    "created test entry {} missing from read-all result",
                    created.id
                )),
            ));
        }

        Ok((created, all.len()))
    }

    // The sink line is the one user-facing report of a failure.
    fn fail(&mut self, stage: Stage, err: Error) -> RunOutcome {
        tracing::debug!(%stage, "Verification failed: {}", err);
        let message = format!("Error: {err}");
        self.sink.error(&message);
        RunOutcome::Failed { stage, message }
    }
}

fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}
