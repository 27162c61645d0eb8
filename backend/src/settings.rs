//! Application settings loaded via OrthoConfig.
//!
//! Values merge from CLI flags, `STOREFRONT_*` environment variables and
//! configuration files. Every field is optional; accessors apply defaults.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;
use synthetic_data::{AgeRange, DEFAULT_MAX_AGE, DEFAULT_MIN_AGE};
use thiserror::Error;

use crate::domain::{
    DEFAULT_BATCH_MAX, DEFAULT_BATCH_MIN, DEFAULT_DISPATCH_TIMEOUT, DEFAULT_SLEEP_MAX,
    DEFAULT_SLEEP_MIN, SimulatorConfig, SimulatorConfigError,
};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_REGISTRATION_ENDPOINT: &str = "http://127.0.0.1:8000/usuarios/";

fn default_products_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("products.json")
}

/// Settings errors detected after loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The registration endpoint does not parse as a URL.
    #[error("registration endpoint '{value}' is not a valid URL: {message}")]
    InvalidEndpoint {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// The simulator bounds are unusable.
    #[error("invalid simulator settings: {0}")]
    Simulator(#[from] SimulatorConfigError),
}

/// Storefront process configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct AppSettings {
    /// Interface the HTTP server binds to.
    pub host: Option<String>,
    /// Port the HTTP server binds to.
    pub port: Option<u16>,
    /// JSON file mirroring the product catalogue.
    pub products_path: Option<PathBuf>,
    /// Run the registration simulator alongside the server.
    #[ortho_config(default = false)]
    pub simulator_enabled: bool,
    /// URL the simulator POSTs identities to.
    pub registration_endpoint: Option<String>,
    /// Smallest batch per cycle.
    pub batch_min: Option<usize>,
    /// Largest batch per cycle.
    pub batch_max: Option<usize>,
    /// Shortest pause between cycles, in seconds.
    pub sleep_min_secs: Option<u64>,
    /// Longest pause between cycles, in seconds.
    pub sleep_max_secs: Option<u64>,
    /// Youngest generated age.
    pub min_age: Option<u32>,
    /// Oldest generated age.
    pub max_age: Option<u32>,
    /// Deadline for one registration call, in milliseconds.
    pub dispatch_timeout_ms: Option<u64>,
}

impl AppSettings {
    /// Bind host, falling back to loopback.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Bind port, falling back to 8000.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Product file path, falling back to the bundled fixture.
    #[must_use]
    pub fn products_path(&self) -> PathBuf {
        self.products_path
            .clone()
            .unwrap_or_else(default_products_path)
    }

    /// Parsed registration endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidEndpoint`] when the value is not a URL.
    pub fn registration_endpoint(&self) -> Result<Url, SettingsError> {
        let raw = self
            .registration_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_REGISTRATION_ENDPOINT);
        Url::parse(raw).map_err(|err| SettingsError::InvalidEndpoint {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Validate the simulator fields into a [`SimulatorConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Simulator`] when any range is empty or
    /// inverted, or the dispatch timeout is zero.
    pub fn simulator_config(&self) -> Result<SimulatorConfig, SettingsError> {
        let ages = AgeRange::new(
            self.min_age.unwrap_or(DEFAULT_MIN_AGE),
            self.max_age.unwrap_or(DEFAULT_MAX_AGE),
        )
        .map_err(SimulatorConfigError::from)?;
        let sleep_min = self
            .sleep_min_secs
            .map_or(DEFAULT_SLEEP_MIN, Duration::from_secs);
        let sleep_max = self
            .sleep_max_secs
            .map_or(DEFAULT_SLEEP_MAX, Duration::from_secs);
        let dispatch_timeout = self
            .dispatch_timeout_ms
            .map_or(DEFAULT_DISPATCH_TIMEOUT, Duration::from_millis);
        let config = SimulatorConfig::new(
            self.batch_min.unwrap_or(DEFAULT_BATCH_MIN)..=self.batch_max.unwrap_or(DEFAULT_BATCH_MAX),
            sleep_min..=sleep_max,
            ages,
            dispatch_timeout,
        )?;
        Ok(config)
    }
}
