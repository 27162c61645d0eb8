//! Runtime collaborators for the simulator: sleeping, time, randomness and
//! the shutdown signal.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tokio::sync::watch;

/// Async sleeping abstraction so tests can pace the loop.
#[async_trait]
pub trait SimulatorSleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio-based sleeper implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl SimulatorSleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Clock, sleeper and RNG handed to the simulator.
pub struct SimulatorRuntime {
    /// Source of the current time, used for ages and report timestamps.
    pub clock: Arc<dyn Clock>,
    /// Pause implementation between cycles.
    pub sleeper: Arc<dyn SimulatorSleeper>,
    /// Randomness for batch sizes, pauses and identities.
    pub rng: Box<dyn RngCore + Send>,
}

impl Default for SimulatorRuntime {
    fn default() -> Self {
        Self {
            clock: Arc::new(DefaultClock),
            sleeper: Arc::new(TokioSleeper),
            rng: Box::new(StdRng::from_os_rng()),
        }
    }
}

/// Create a linked shutdown trigger and signal.
///
/// ```
/// use storefront::domain::shutdown_channel;
///
/// let (trigger, signal) = shutdown_channel();
/// assert!(!signal.is_triggered());
/// trigger.trigger();
/// assert!(signal.is_triggered());
/// ```
#[must_use]
pub fn shutdown_channel() -> (ShutdownTrigger, ShutdownSignal) {
    let (sender, receiver) = watch::channel(false);
    (ShutdownTrigger(sender), ShutdownSignal(receiver))
}

/// Sending half of the shutdown channel. Dropping it also signals shutdown.
#[derive(Debug)]
pub struct ShutdownTrigger(watch::Sender<bool>);

impl ShutdownTrigger {
    /// Ask every linked signal to stop.
    pub fn trigger(&self) {
        self.0.send_replace(true);
    }
}

/// Receiving half of the shutdown channel.
#[derive(Debug, Clone)]
pub struct ShutdownSignal(watch::Receiver<bool>);

impl ShutdownSignal {
    /// Returns `true` once shutdown was requested or the trigger was dropped.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.0.borrow() || self.0.has_changed().is_err()
    }

    /// Resolves once shutdown is requested or the trigger is dropped.
    pub async fn triggered(&mut self) {
        loop {
            if *self.0.borrow_and_update() {
                return;
            }
            if self.0.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dropping_trigger_counts_as_shutdown() {
        let (trigger, mut signal) = shutdown_channel();
        drop(trigger);
        assert!(signal.is_triggered());
        tokio::time::timeout(Duration::from_secs(1), signal.triggered())
            .await
            .expect("resolves after drop");
    }

    #[tokio::test]
    async fn triggered_wakes_waiting_task() {
        let (trigger, mut signal) = shutdown_channel();
        let waiter = tokio::spawn(async move { signal.triggered().await });
        trigger.trigger();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("resolves after trigger")
            .expect("task joins");
    }
}
