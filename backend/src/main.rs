//! Storefront entry-point: loads settings, opens the stores, serves the REST
//! API and, when enabled, runs the registration simulator alongside it.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use storefront::domain::{RegistrationSimulator, SimulatorRuntime, shutdown_channel};
use storefront::inbound::http::{HealthState, HttpState};
use storefront::outbound::memory::{InMemoryPurchaseRepository, InMemoryUserRepository};
use storefront::outbound::product_file::JsonFileProductRepository;
use storefront::outbound::registration::HttpRegistrationClient;
use storefront::server::{DEFAULT_DRAIN_GRACE, ServerConfig, create_server, drain};
use storefront::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;

    let products_path = settings.products_path();
    let products = JsonFileProductRepository::open(&products_path)
        .wrap_err_with(|| format!("failed to open product catalogue {}", products_path.display()))?;
    let http_state = HttpState::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(products),
        Arc::new(InMemoryPurchaseRepository::new()),
    );

    let bind_addr: SocketAddr = format!("{}:{}", settings.host(), settings.port())
        .parse()
        .wrap_err("invalid bind address")?;
    let health_state = web::Data::new(HealthState::new());
    let bound = create_server(health_state.clone(), http_state, ServerConfig::new(bind_addr))
        .wrap_err("failed to start http server")?;

    let (trigger, signal) = shutdown_channel();
    let simulator = if settings.simulator_enabled {
        let config = settings.simulator_config()?;
        let endpoint = settings.registration_endpoint()?;
        let client = HttpRegistrationClient::new(endpoint, config.dispatch_timeout())
            .wrap_err("failed to build registration client")?;
        let simulator =
            RegistrationSimulator::new(Arc::new(client), config, SimulatorRuntime::default());
        Some(tokio::spawn(simulator.run(signal)))
    } else {
        info!("registration simulator disabled");
        None
    };

    let handle = bound.server.handle();
    let server_task = tokio::spawn(bound.server);
    shutdown_signal().await.wrap_err("failed to listen for shutdown signals")?;
    info!("shutdown requested");

    trigger.trigger();
    drain(&health_state, handle, DEFAULT_DRAIN_GRACE).await;
    if let Some(handle) = simulator {
        let summary = handle.await.wrap_err("registration simulator panicked")?;
        info!(cycles = summary.cycles, "registration simulator joined");
    }
    server_task
        .await
        .wrap_err("http server task panicked")?
        .wrap_err("http server failed")
}

/// Resolve on Ctrl-C, or on SIGTERM where supported.
async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        let mut terminate =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}
