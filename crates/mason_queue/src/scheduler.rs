//! Fixed-interval tick scheduling.

use crate::{QueueProcessor, TickSummary};
use mason_error::MasonResult;
use mason_sheets::SheetStore;
use mason_social::ChatHost;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, instrument};

/// Time between queue passes.
pub const TICK_INTERVAL: Duration = Duration::from_secs(30);

/// Drives the processor on a fixed interval.
///
/// Ticks are strictly sequential: the interval uses delayed missed-tick
/// behavior and the loop awaits the full pass before sleeping again, so a
/// slow pass postpones the next tick instead of overlapping it.
pub struct Scheduler<S, H> {
    processor: QueueProcessor<S, H>,
    interval: Duration,
}

impl<S: SheetStore, H: ChatHost> Scheduler<S, H> {
    /// Create a scheduler with the standard interval.
    pub fn new(processor: QueueProcessor<S, H>) -> Self {
        Self {
            processor,
            interval: TICK_INTERVAL,
        }
    }

    /// Create a scheduler with a custom interval. Used by tests to run
    /// passes without waiting out the production cadence.
    pub fn with_interval(processor: QueueProcessor<S, H>, interval: Duration) -> Self {
        Self {
            processor,
            interval,
        }
    }

    /// Run passes forever.
    ///
    /// A pass-level fault (row fetch or community enumeration) is logged
    /// and the pass abandoned; row-level faults were already absorbed into
    /// row statuses by the processor.
    #[instrument(skip(self))]
    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_secs = self.interval.as_secs(), "Queue scheduler started");
        loop {
            interval.tick().await;
            info!("Checking queue sheet for actions");
            match self.processor.run_tick().await {
                Ok(summary) => log_summary(summary),
                Err(e) => error!(error = %e, "Queue pass failed"),
            }
        }
    }

    /// Run a single pass immediately, bypassing the interval.
    pub async fn run_once(&self) -> MasonResult<TickSummary> {
        self.processor.run_tick().await
    }
}

fn log_summary(summary: TickSummary) {
    info!(
        done = summary.done,
        errored = summary.errored,
        skipped = summary.skipped,
        "Queue pass complete"
    );
}
