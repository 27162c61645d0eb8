//! Validated simulator configuration.

use std::ops::RangeInclusive;
use std::time::Duration;

use synthetic_data::{AgeRange, AgeRangeError};
use thiserror::Error;

/// Default smallest batch per cycle.
pub const DEFAULT_BATCH_MIN: usize = 1;
/// Default largest batch per cycle.
pub const DEFAULT_BATCH_MAX: usize = 5;
/// Default shortest pause between cycles.
pub const DEFAULT_SLEEP_MIN: Duration = Duration::from_secs(1);
/// Default longest pause between cycles.
pub const DEFAULT_SLEEP_MAX: Duration = Duration::from_secs(60);
/// Default deadline for one registration call.
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Reasons a simulator configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulatorConfigError {
    /// The batch range starts at zero, so a cycle could register nobody.
    #[error("batch size must be at least 1")]
    ZeroBatchSize,
    /// The batch range is empty.
    #[error("batch size range {min}..={max} is empty")]
    EmptyBatchRange {
        /// Requested minimum batch size.
        min: usize,
        /// Requested maximum batch size.
        max: usize,
    },
    /// The sleep range is inverted.
    #[error("sleep range {min:?}..={max:?} is inverted")]
    InvertedSleepRange {
        /// Requested minimum pause.
        min: Duration,
        /// Requested maximum pause.
        max: Duration,
    },
    /// A zero dispatch timeout would fail every registration.
    #[error("dispatch timeout must be greater than zero")]
    ZeroDispatchTimeout,
    /// The age bounds are unusable.
    #[error(transparent)]
    Ages(#[from] AgeRangeError),
}

/// Batch, pacing and age settings for the registration simulator.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use storefront::domain::SimulatorConfig;
/// use synthetic_data::AgeRange;
///
/// let config = SimulatorConfig::new(
///     2..=3,
///     Duration::from_millis(10)..=Duration::from_millis(20),
///     AgeRange::default(),
///     Duration::from_secs(1),
/// )
/// .expect("valid config");
/// assert_eq!(config.batch_size(), &(2..=3));
///
/// assert!(SimulatorConfig::new(0..=3, Duration::ZERO..=Duration::ZERO, AgeRange::default(), Duration::from_secs(1)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    batch_size: RangeInclusive<usize>,
    sleep: RangeInclusive<Duration>,
    age_range: AgeRange,
    dispatch_timeout: Duration,
}

impl SimulatorConfig {
    /// Validate and build a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorConfigError`] for a zero-based or empty batch
    /// range, an inverted sleep range, or a zero dispatch timeout.
    pub fn new(
        batch_size: RangeInclusive<usize>,
        sleep: RangeInclusive<Duration>,
        age_range: AgeRange,
        dispatch_timeout: Duration,
    ) -> Result<Self, SimulatorConfigError> {
        let (batch_min, batch_max) = (*batch_size.start(), *batch_size.end());
        if batch_min == 0 {
            return Err(SimulatorConfigError::ZeroBatchSize);
        }
        if batch_min > batch_max {
            return Err(SimulatorConfigError::EmptyBatchRange {
                min: batch_min,
                max: batch_max,
            });
        }
        if sleep.start() > sleep.end() {
            return Err(SimulatorConfigError::InvertedSleepRange {
                min: *sleep.start(),
                max: *sleep.end(),
            });
        }
        if dispatch_timeout.is_zero() {
            return Err(SimulatorConfigError::ZeroDispatchTimeout);
        }
        Ok(Self {
            batch_size,
            sleep,
            age_range,
            dispatch_timeout,
        })
    }

    /// Inclusive range the per-cycle batch size is drawn from.
    #[must_use]
    pub const fn batch_size(&self) -> &RangeInclusive<usize> {
        &self.batch_size
    }

    /// Inclusive range the inter-cycle pause is drawn from.
    #[must_use]
    pub const fn sleep(&self) -> &RangeInclusive<Duration> {
        &self.sleep
    }

    /// Age bounds for generated identities.
    #[must_use]
    pub const fn age_range(&self) -> AgeRange {
        self.age_range
    }

    /// Deadline applied to each registration call.
    #[must_use]
    pub const fn dispatch_timeout(&self) -> Duration {
        self.dispatch_timeout
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_MIN..=DEFAULT_BATCH_MAX,
            sleep: DEFAULT_SLEEP_MIN..=DEFAULT_SLEEP_MAX,
            age_range: AgeRange::default(),
            dispatch_timeout: DEFAULT_DISPATCH_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    const fn pause_bounds(config: &SimulatorConfig) -> (&Duration, &Duration) {
        let sleep = config.sleep();
        (sleep.start(), sleep.end())
    }

    const fn batch_floor(config: &SimulatorConfig) -> usize {
        *config.batch_size().start()
    }

    #[test]
    fn default_matches_documented_values() {
        let config = SimulatorConfig::default();
        assert_eq!(config.batch_size(), &(1..=5));
        assert_eq!(config.sleep(), &(SECOND..=Duration::from_secs(60)));
        assert_eq!(config.age_range(), AgeRange::default());
        assert_eq!(config.dispatch_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn accessors_are_usable_from_const_helpers() {
        let config = SimulatorConfig::default();
        assert_eq!(pause_bounds(&config), (&SECOND, &Duration::from_secs(60)));
        assert_eq!(batch_floor(&config), 1);
    }

    #[rstest]
    #[case(0..=5, SECOND..=SECOND, SECOND, SimulatorConfigError::ZeroBatchSize)]
    #[case(4..=2, SECOND..=SECOND, SECOND, SimulatorConfigError::EmptyBatchRange { min: 4, max: 2 })]
    #[case(
        1..=5,
        Duration::from_secs(9)..=SECOND,
        SECOND,
        SimulatorConfigError::InvertedSleepRange { min: Duration::from_secs(9), max: SECOND }
    )]
    #[case(1..=5, SECOND..=SECOND, Duration::ZERO, SimulatorConfigError::ZeroDispatchTimeout)]
    fn rejects_unusable_settings(
        #[case] batch: RangeInclusive<usize>,
        #[case] sleep: RangeInclusive<Duration>,
        #[case] timeout: Duration,
        #[case] expected: SimulatorConfigError,
    ) {
        let result = SimulatorConfig::new(batch, sleep, AgeRange::default(), timeout);
        assert_eq!(result, Err(expected));
    }

    #[test]
    fn accepts_zero_length_sleep() {
        let config = SimulatorConfig::new(1..=1, Duration::ZERO..=Duration::ZERO, AgeRange::default(), SECOND)
            .expect("valid config");
        assert_eq!(config.sleep(), &(Duration::ZERO..=Duration::ZERO));
    }
}
