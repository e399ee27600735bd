//! Async refresh orchestrator.
//!
//! Runs the chart pipeline in a tokio task: once on startup, then again each
//! time a [`RefreshTrigger`] fires. Results travel to the TUI over an `mpsc`
//! channel as [`RefreshSnapshot`]s, so the two sides share no mutable state.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;

use recovery_core::chart_config::ChartConfig;
use recovery_core::settings::RefreshPolicy;

use crate::pipeline::{run_pipeline, RenderResult};

/// Produces the charts for one refresh. The argument is the generation.
pub type RefreshSource =
    Arc<dyn Fn(u64) -> recovery_core::error::Result<RenderResult> + Send + Sync>;

// ── Public types ──────────────────────────────────────────────────────────────

/// Outcome of one completed refresh.
#[derive(Debug, Clone)]
pub struct RefreshSnapshot {
    /// Sequence number of the refresh, starting at 0 for the initial load.
    pub generation: u64,
    /// Charts on success, the rendered error message on failure.
    pub outcome: Result<RenderResult, String>,
}

// ── RefreshOrchestrator ───────────────────────────────────────────────────────

/// Background refresh coordinator.
///
/// Call [`RefreshOrchestrator::start`] to spawn the refresh loop and receive
/// the snapshot channel plus a trigger for user-initiated refreshes.
pub struct RefreshOrchestrator {
    source: RefreshSource,
    policy: RefreshPolicy,
}

impl RefreshOrchestrator {
    /// Orchestrator that reloads `data_path` and builds `config`'s charts.
    pub fn new(data_path: PathBuf, config: ChartConfig, policy: RefreshPolicy) -> Self {
        let source: RefreshSource =
            Arc::new(move |_generation: u64| run_pipeline(&data_path, &config, Utc::now()));
        Self::with_source(source, policy)
    }

    /// Orchestrator over an arbitrary chart source.
    pub fn with_source(source: RefreshSource, policy: RefreshPolicy) -> Self {
        Self { source, policy }
    }

    /// Start the refresh loop.
    ///
    /// Returns the snapshot receiver, a cloneable trigger and a handle that
    /// aborts the loop.
    pub fn start(self) -> (mpsc::Receiver<RefreshSnapshot>, RefreshTrigger, RefreshHandle) {
        let (snapshot_tx, snapshot_rx) = mpsc::channel(16);
        let (trigger_tx, trigger_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            self.refresh_loop(trigger_rx, snapshot_tx).await;
        });

        (
            snapshot_rx,
            RefreshTrigger { tx: trigger_tx },
            RefreshHandle { handle },
        )
    }

    // ── Private implementation ────────────────────────────────────────────

    /// Refresh immediately, then on every trigger until the snapshot receiver
    /// is dropped or every trigger is gone with nothing left in flight.
    async fn refresh_loop(
        self,
        mut triggers: mpsc::UnboundedReceiver<()>,
        tx: mpsc::Sender<RefreshSnapshot>,
    ) {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<RefreshSnapshot>();
        let mut next_generation: u64 = 0;
        let mut in_flight: usize = 0;
        let mut last_delivered: Option<u64> = None;
        let mut triggers_open = true;

        self.spawn_refresh(next_generation, done_tx.clone());
        next_generation += 1;
        in_flight += 1;

        loop {
            tokio::select! {
                trigger = triggers.recv(), if triggers_open => {
                    if trigger.is_none() {
                        tracing::debug!("all refresh triggers dropped");
                        triggers_open = false;
                        if in_flight == 0 {
                            break;
                        }
                        continue;
                    }

                    if in_flight > 0 && self.policy == RefreshPolicy::IgnoreWhileInFlight {
                        tracing::debug!(in_flight, "refresh already running; request ignored");
                        continue;
                    }

                    tracing::info!(generation = next_generation, "refresh requested");
                    self.spawn_refresh(next_generation, done_tx.clone());
                    next_generation += 1;
                    in_flight += 1;
                }
                Some(snapshot) = done_rx.recv() => {
                    in_flight -= 1;

                    if last_delivered.is_some_and(|last| snapshot.generation < last) {
                        tracing::debug!(
                            generation = snapshot.generation,
                            "stale refresh result discarded"
                        );
                    } else {
                        last_delivered = Some(snapshot.generation);
                        if tx.send(snapshot).await.is_err() {
                            tracing::debug!("snapshot channel closed; exiting loop");
                            break;
                        }
                    }

                    if !triggers_open && in_flight == 0 {
                        break;
                    }
                }
            }
        }
    }

    /// Run the source on the blocking pool and report back on `done`.
    fn spawn_refresh(&self, generation: u64, done: mpsc::UnboundedSender<RefreshSnapshot>) {
        let source = Arc::clone(&self.source);

        tokio::spawn(async move {
            let outcome = match tokio::task::spawn_blocking(move || source(generation)).await {
                Ok(Ok(result)) => {
                    tracing::info!(
                        generation,
                        records = result.records_loaded,
                        charts = result.charts.len(),
                        "refresh complete"
                    );
                    Ok(result)
                }
                Ok(Err(e)) => {
                    tracing::error!(generation, error = %e, "refresh failed");
                    Err(e.to_string())
                }
                Err(e) => {
                    tracing::error!(generation, error = %e, "refresh task panicked");
                    Err(format!("refresh task failed: {e}"))
                }
            };

            let _ = done.send(RefreshSnapshot {
                generation,
                outcome,
            });
        });
    }
}

// ── RefreshTrigger ────────────────────────────────────────────────────────────

/// Cloneable handle used by any event source to request a refresh.
#[derive(Debug, Clone)]
pub struct RefreshTrigger {
    tx: mpsc::UnboundedSender<()>,
}

impl RefreshTrigger {
    /// Request a refresh. Returns `false` when the loop is no longer running.
    pub fn refresh(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

// ── RefreshHandle ─────────────────────────────────────────────────────────────

/// A handle to the background refresh task.
pub struct RefreshHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl RefreshHandle {
    /// Immediately abort the refresh loop.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
