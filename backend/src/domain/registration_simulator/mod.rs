//! Batch registration simulator.
//!
//! Each cycle draws a batch size, generates that many synthetic identities,
//! submits them concurrently through [`UserRegistrationClient`], waits for
//! every submission to settle, logs a summary, then pauses for a random
//! interval. Delivery is best-effort: failures are counted and logged, never
//! retried.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use mockable::Clock;
use rand::{Rng, RngCore};
use synthetic_data::{IdentityGenerator, SyntheticIdentity};
use tracing::{debug, info, warn};

use crate::domain::TraceId;
use crate::domain::ports::{RegistrationError, RegistrationReceipt, UserRegistrationClient};

mod config;
mod runtime;

pub use config::{
    DEFAULT_BATCH_MAX, DEFAULT_BATCH_MIN, DEFAULT_DISPATCH_TIMEOUT, DEFAULT_SLEEP_MAX,
    DEFAULT_SLEEP_MIN, SimulatorConfig, SimulatorConfigError,
};
pub use runtime::{
    ShutdownSignal, ShutdownTrigger, SimulatorRuntime, SimulatorSleeper, TokioSleeper,
    shutdown_channel,
};

/// Outcome of one cycle. `succeeded + failed == attempted` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Identities submitted.
    pub attempted: usize,
    /// Submissions that returned a receipt.
    pub succeeded: usize,
    /// Submissions that failed, timed out or were rejected.
    pub failed: usize,
    /// When the last submission settled.
    pub completed_at: DateTime<Utc>,
}

/// Totals reported when the simulator loop exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorSummary {
    /// Completed cycles.
    pub cycles: u64,
}

/// Domain-owned registration traffic generator.
pub struct RegistrationSimulator {
    client: Arc<dyn UserRegistrationClient>,
    clock: Arc<dyn Clock>,
    sleeper: Arc<dyn SimulatorSleeper>,
    rng: Box<dyn RngCore + Send>,
    generator: IdentityGenerator,
    config: SimulatorConfig,
}

impl RegistrationSimulator {
    /// Build a simulator around a registration client.
    pub fn new(
        client: Arc<dyn UserRegistrationClient>,
        config: SimulatorConfig,
        runtime: SimulatorRuntime,
    ) -> Self {
        let SimulatorRuntime {
            clock,
            sleeper,
            rng,
        } = runtime;
        Self {
            client,
            clock,
            sleeper,
            rng,
            generator: IdentityGenerator::new(config.age_range()),
            config,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Run one generate-and-dispatch cycle under a fresh trace identifier.
    ///
    /// Returns only after every submission has settled, either with a
    /// response or by hitting the dispatch timeout.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let batch = self.draw_batch();
        let trace_id = TraceId::generate();
        let client = Arc::clone(&self.client);
        let timeout = self.config.dispatch_timeout();

        let outcomes = TraceId::scope(trace_id, async move {
            join_all(
                batch
                    .iter()
                    .map(|identity| dispatch_one(client.as_ref(), identity, timeout)),
            )
            .await
        })
        .await;

        let attempted = outcomes.len();
        let succeeded = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
        let report = CycleReport {
            attempted,
            succeeded,
            failed: attempted.saturating_sub(succeeded),
            completed_at: self.clock.utc(),
        };
        info!(
            trace_id = %trace_id,
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed,
            completed_at = %report.completed_at,
            "registration cycle completed"
        );
        report
    }

    /// Loop cycles until `shutdown` fires.
    ///
    /// The signal is checked before every cycle and raced against each
    /// pause, so no new submission starts once shutdown is observed. A cycle
    /// already in flight is allowed to settle.
    pub async fn run(mut self, mut shutdown: ShutdownSignal) -> SimulatorSummary {
        let mut cycles: u64 = 0;
        info!(
            batch_min = *self.config.batch_size().start(),
            batch_max = *self.config.batch_size().end(),
            "registration simulator started"
        );
        loop {
            if shutdown.is_triggered() {
                break;
            }
            self.run_cycle().await;
            cycles = cycles.saturating_add(1);

            let pause = self.draw_pause();
            debug!(pause_ms = pause.as_millis(), "registration simulator sleeping");
            let sleeper = Arc::clone(&self.sleeper);
            tokio::select! {
                () = shutdown.triggered() => break,
                () = sleeper.sleep(pause) => {}
            }
        }
        info!(cycles, "registration simulator stopped");
        SimulatorSummary { cycles }
    }

    fn draw_batch(&mut self) -> Vec<SyntheticIdentity> {
        let size = self.rng.random_range(self.config.batch_size().clone());
        let today = self.clock.utc().date_naive();
        (0..size)
            .map(|_| self.generator.generate(self.rng.as_mut(), today))
            .collect()
    }

    fn draw_pause(&mut self) -> Duration {
        let min = duration_millis(*self.config.sleep().start());
        let max = duration_millis(*self.config.sleep().end());
        Duration::from_millis(self.rng.random_range(min..=max))
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

async fn dispatch_one(
    client: &dyn UserRegistrationClient,
    identity: &SyntheticIdentity,
    timeout: Duration,
) -> Result<RegistrationReceipt, RegistrationError> {
    let outcome = match tokio::time::timeout(timeout, client.register(identity)).await {
        Ok(result) => result,
        Err(_) => Err(RegistrationError::timeout(format!(
            "no response within {}ms",
            timeout.as_millis()
        ))),
    };
    match &outcome {
        Ok(receipt) => debug!(
            identity_id = identity.id,
            status = receipt.status,
            "registration accepted"
        ),
        Err(error) => warn!(
            identity_id = identity.id,
            error = %error,
            "registration failed"
        ),
    }
    outcome
}
