//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::{self, HealthState, HttpState};

/// How long liveness reports 503 before the listener stops.
pub const DEFAULT_DRAIN_GRACE: Duration = Duration::from_secs(2);

/// A listening server and the address it actually bound.
pub struct BoundServer {
    /// Future driving the listener; await it to serve requests.
    pub server: Server,
    /// Bound address, useful when the requested port was 0.
    pub local_addr: SocketAddr,
}

/// Assemble the application with every route, the trace middleware and, in
/// debug builds, Swagger UI at `/docs`.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(http::configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Bind an Actix HTTP server and mark the service ready.
///
/// Actix's own signal handling is disabled; the caller decides when to stop
/// through [`drain`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<BoundServer> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let mut builder = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    });
    builder = builder.disable_signals();
    if let Some(workers) = config.workers {
        builder = builder.workers(workers);
    }
    let bound = builder.bind(config.bind_addr)?;
    let local_addr = bound
        .addrs()
        .first()
        .copied()
        .unwrap_or(config.bind_addr);
    let server = bound.run();

    health_state.mark_ready();
    info!(%local_addr, "http server listening");
    Ok(BoundServer { server, local_addr })
}

/// Fail liveness, keep serving for `grace`, then stop gracefully.
///
/// Probes see 503 on `/health/live` during the grace period, so load
/// balancers stop routing before the listener closes.
pub async fn drain(health_state: &HealthState, handle: ServerHandle, grace: Duration) {
    health_state.mark_unhealthy();
    info!(grace_ms = grace.as_millis(), "http server draining");
    tokio::time::sleep(grace).await;
    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;

    use super::*;
    use crate::domain::TRACE_ID_HEADER;
    use crate::inbound::http::test_utils::seeded_state;

    #[actix_web::test]
    async fn app_serves_routes_with_trace_header() {
        let (state, _temp) = seeded_state();
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        let app =
            actix_test::init_service(build_app(health, web::Data::new(state))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/produtos/1").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));
    }

    #[actix_web::test]
    async fn readiness_probe_is_wired() {
        let (state, _temp) = seeded_state();
        let health = web::Data::new(HealthState::new());
        let app =
            actix_test::init_service(build_app(health.clone(), web::Data::new(state))).await;

        let before = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        health.mark_ready();
        let after = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;

        assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(after.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn liveness_fails_while_draining_then_server_stops() {
        let (state, _temp) = seeded_state();
        let health = web::Data::new(HealthState::new());
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0))).with_workers(1);
        let bound = create_server(health.clone(), state, config).expect("server binds");
        let handle = bound.server.handle();
        let live_url = format!("http://{}/health/live", bound.local_addr);
        let server_task = actix_web::rt::spawn(bound.server);
        let client = reqwest::Client::new();

        let before = client.get(&live_url).send().await.expect("liveness before drain");
        let ((), during) = tokio::join!(
            drain(&health, handle, Duration::from_millis(500)),
            async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                client.get(&live_url).send().await.expect("liveness during drain")
            }
        );

        assert_eq!(before.status().as_u16(), 200);
        assert_eq!(during.status().as_u16(), 503);
        tokio::time::timeout(Duration::from_secs(5), server_task)
            .await
            .expect("server stops after drain")
            .expect("server task joins")
            .expect("server exits cleanly");
    }
}
