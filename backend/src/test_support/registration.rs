//! Shared test doubles for the registration simulator.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use synthetic_data::SyntheticIdentity;

use crate::domain::TraceId;
use crate::domain::ports::{RegistrationError, RegistrationReceipt, UserRegistrationClient};
use crate::domain::registration_simulator::SimulatorSleeper;

/// Clock whose time only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
            }
        };
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Sleeper that returns at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateSleeper;

#[async_trait]
impl SimulatorSleeper for ImmediateSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

/// Sleeper that returns at once and remembers every requested pause.
#[derive(Default)]
pub struct RecordingSleeper(pub Mutex<Vec<Duration>>);

impl RecordingSleeper {
    /// Pauses requested so far.
    pub fn recorded(&self) -> Vec<Duration> {
        match self.0.lock() {
            Ok(entries) => entries.clone(),
            Err(_) => panic!("sleeper mutex"),
        }
    }
}

#[async_trait]
impl SimulatorSleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        let mut entries = match self.0.lock() {
            Ok(entries) => entries,
            Err(_) => panic!("sleeper mutex"),
        };
        entries.push(duration);
    }
}

/// One call observed by [`ScriptedRegistrationClient`].
#[derive(Debug, Clone)]
pub struct RecordedRegistration {
    /// Identity that was submitted.
    pub identity: SyntheticIdentity,
    /// Trace identifier in scope during the call.
    pub trace_id: Option<TraceId>,
}

/// Registration client that replays queued outcomes.
///
/// Once the script is exhausted every call succeeds with status 200.
#[derive(Default)]
pub struct ScriptedRegistrationClient {
    script: Mutex<VecDeque<Result<RegistrationReceipt, RegistrationError>>>,
    calls: Mutex<Vec<RecordedRegistration>>,
    call_count: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedRegistrationClient {
    /// Client that replays `script` in call order.
    pub fn new(script: Vec<Result<RegistrationReceipt, RegistrationError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    /// Client that waits `delay` before answering each call.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Receipt used for scripted and default successes.
    pub fn created() -> RegistrationReceipt {
        RegistrationReceipt {
            status: 200,
            body: "{}".to_owned(),
        }
    }

    /// Number of calls started so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Calls observed so far, in completion order.
    pub fn calls(&self) -> Vec<RecordedRegistration> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(_) => panic!("calls mutex"),
        }
    }
}

#[async_trait]
impl UserRegistrationClient for ScriptedRegistrationClient {
    async fn register(
        &self,
        identity: &SyntheticIdentity,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.calls.lock() {
            Ok(mut calls) => calls.push(RecordedRegistration {
                identity: identity.clone(),
                trace_id: TraceId::current(),
            }),
            Err(_) => panic!("calls mutex"),
        }
        let next = match self.script.lock() {
            Ok(mut script) => script.pop_front(),
            Err(_) => panic!("script mutex"),
        };
        next.unwrap_or_else(|| Ok(Self::created()))
    }
}
