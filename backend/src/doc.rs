//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (warranties, admin
//!   sweeps, health)
//! - **Schemas**: Request/response bodies plus the domain error payload
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, WarrantyState};
use crate::inbound::http::sweeps::{SweepFailureBody, SweepOutcomeBody, SweepRequestBody};
use crate::inbound::http::warranties::{
    AmendTermsRequestBody, CreateWarrantyRequestBody, FileClaimRequestBody,
    ListWarrantiesResponseBody, WarrantyBody,
};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Warranty backend API",
        description = "HTTP interface for warranty lifecycle management and the expiration sweep.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::warranties::create_warranty,
        crate::inbound::http::warranties::list_warranties,
        crate::inbound::http::warranties::get_warranty,
        crate::inbound::http::warranties::validate_warranty,
        crate::inbound::http::warranties::expire_warranty,
        crate::inbound::http::warranties::file_warranty_claim,
        crate::inbound::http::warranties::reset_warranty,
        crate::inbound::http::warranties::amend_warranty_terms,
        crate::inbound::http::sweeps::run_expiration_sweep,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateWarrantyRequestBody,
        FileClaimRequestBody,
        AmendTermsRequestBody,
        WarrantyBody,
        ListWarrantiesResponseBody,
        SweepRequestBody,
        SweepOutcomeBody,
        SweepFailureBody,
        WarrantyState,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "warranties", description = "Warranty lifecycle operations"),
        (name = "admin", description = "Scheduled maintenance entry points"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
