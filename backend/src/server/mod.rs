//! Server construction and route wiring.

mod config;

pub use config::{AppSettings, ServerConfig};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use warranty_backend::doc::ApiDoc;
use warranty_backend::domain::ports::{
    ExpirationSweep, FixtureExpirationSweep, FixtureWarrantyCommand, FixtureWarrantyQuery,
    WarrantyCommand, WarrantyQuery,
};
use warranty_backend::domain::{
    ExpirationSweepService, WarrantyCommandService, WarrantyQueryService,
};
use warranty_backend::inbound::http::health::{HealthState, live, ready};
use warranty_backend::inbound::http::state::HttpState;
use warranty_backend::inbound::http::sweeps::run_expiration_sweep;
use warranty_backend::inbound::http::warranties::{
    amend_warranty_terms, create_warranty, expire_warranty, file_warranty_claim, get_warranty,
    list_warranties, reset_warranty, validate_warranty,
};
use warranty_backend::outbound::notifications::LogWarrantyNotificationPublisher;
use warranty_backend::outbound::persistence::{
    DieselWarrantyNumberIssuer, DieselWarrantyRepository,
};

/// Bundle of port implementations selected from the configuration.
struct SelectedPorts {
    warranties: Arc<dyn WarrantyCommand>,
    warranties_query: Arc<dyn WarrantyQuery>,
    sweep: Arc<dyn ExpirationSweep>,
}

/// Build the warranty ports based on configuration.
///
/// Uses the Diesel-backed services when a pool is available, otherwise falls
/// back to the fixtures so the server still boots for smoke tests.
fn build_ports(config: &ServerConfig) -> SelectedPorts {
    match &config.db_pool {
        Some(pool) => {
            let clock = Arc::new(DefaultClock);
            let repository = Arc::new(DieselWarrantyRepository::new(pool.clone()));
            let issuer = Arc::new(DieselWarrantyNumberIssuer::new(pool.clone(), clock.clone()));
            let notifications = Arc::new(LogWarrantyNotificationPublisher);

            SelectedPorts {
                warranties: Arc::new(WarrantyCommandService::new(
                    repository.clone(),
                    issuer,
                    clock,
                )),
                warranties_query: Arc::new(WarrantyQueryService::new(repository.clone())),
                sweep: Arc::new(ExpirationSweepService::new(repository, notifications)),
            }
        }
        None => SelectedPorts {
            warranties: Arc::new(FixtureWarrantyCommand),
            warranties_query: Arc::new(FixtureWarrantyQuery),
            sweep: Arc::new(FixtureExpirationSweep),
        },
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1")
        .service(create_warranty)
        .service(list_warranties)
        .service(get_warranty)
        .service(validate_warranty)
        .service(expire_warranty)
        .service(file_warranty_claim)
        .service(reset_warranty)
        .service(amend_warranty_terms)
        .service(run_expiration_sweep);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] containing the bind address and optional pool.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ports = build_ports(&config);
    let http_state = web::Data::new(HttpState::new(
        ports.warranties,
        ports.warranties_query,
        ports.sweep,
        Arc::new(DefaultClock),
    ));

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
