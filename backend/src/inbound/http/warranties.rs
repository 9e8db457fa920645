//! Warranty HTTP handlers.
//!
//! ```text
//! POST  /api/v1/warranties
//! GET   /api/v1/warranties
//! GET   /api/v1/warranties/{id}
//! PATCH /api/v1/warranties/{id}/terms
//! POST  /api/v1/warranties/{id}/validate
//! POST  /api/v1/warranties/{id}/expire
//! POST  /api/v1/warranties/{id}/claim
//! POST  /api/v1/warranties/{id}/reset
//! ```

use actix_web::{get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    AmendWarrantyTermsRequest, CreateWarrantyRequest, FileWarrantyClaimRequest, GetWarrantyRequest,
    ListWarrantiesRequest, MarkWarrantyExpiredRequest, ResetWarrantyRequest,
    ValidateWarrantyRequest, WarrantyPayload, WarrantyResponse,
};
use crate::domain::{Error, WarrantyState};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_date, parse_optional_date, parse_optional_uuid, parse_uuid,
};

/// Coverage duration applied when a create request omits `durationMonths`.
const DEFAULT_DURATION_MONTHS: u32 = 12;

/// Request payload for registering a warranty.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarrantyRequestBody {
    #[schema(format = "uuid")]
    pub customer_id: String,
    #[schema(format = "uuid")]
    pub product_id: String,
    pub serial_number: String,
    #[schema(format = "date", example = "2026-03-15")]
    pub purchase_date: String,
    /// Defaults to 12 months when omitted.
    pub duration_months: Option<u32>,
    pub problem_description: Option<String>,
}

/// Request payload for filing a claim.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileClaimRequestBody {
    /// Replaces the stored description when provided.
    pub problem_description: Option<String>,
}

/// Request payload for amending coverage terms.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AmendTermsRequestBody {
    #[schema(format = "date", example = "2026-03-15")]
    pub purchase_date: Option<String>,
    pub duration_months: Option<u32>,
}

/// Query parameters filtering warranty listings.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListWarrantiesQueryParams {
    #[schema(format = "uuid")]
    pub customer_id: Option<String>,
    #[schema(format = "uuid")]
    pub product_id: Option<String>,
}

/// JSON representation of one warranty record.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(example = "GAR/2026/00042")]
    pub number: String,
    #[schema(format = "uuid")]
    pub customer_id: String,
    #[schema(format = "uuid")]
    pub product_id: String,
    pub serial_number: String,
    #[schema(format = "date")]
    pub purchase_date: String,
    pub duration_months: u32,
    #[schema(format = "date")]
    pub expiration_date: String,
    pub state: WarrantyState,
    pub problem_description: Option<String>,
}

/// Response payload listing warranties, newest first.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListWarrantiesResponseBody {
    pub warranties: Vec<WarrantyBody>,
}

impl From<WarrantyPayload> for WarrantyBody {
    fn from(value: WarrantyPayload) -> Self {
        Self {
            id: value.id.to_string(),
            number: value.number.into_string(),
            customer_id: value.customer_id.to_string(),
            product_id: value.product_id.to_string(),
            serial_number: value.serial_number,
            purchase_date: value.purchase_date.to_string(),
            duration_months: value.duration_months,
            expiration_date: value.expiration_date.to_string(),
            state: value.state,
            problem_description: value.problem_description,
        }
    }
}

impl From<WarrantyResponse> for WarrantyBody {
    fn from(value: WarrantyResponse) -> Self {
        value.warranty.into()
    }
}

fn parse_create_request(body: CreateWarrantyRequestBody) -> Result<CreateWarrantyRequest, Error> {
    Ok(CreateWarrantyRequest {
        customer_id: parse_uuid(body.customer_id, FieldName::new("customerId"))?,
        product_id: parse_uuid(body.product_id, FieldName::new("productId"))?,
        serial_number: body.serial_number,
        purchase_date: parse_date(body.purchase_date, FieldName::new("purchaseDate"))?,
        duration_months: body.duration_months.unwrap_or(DEFAULT_DURATION_MONTHS),
        problem_description: body.problem_description,
    })
}

fn parse_warranty_id(path: web::Path<String>) -> Result<uuid::Uuid, Error> {
    parse_uuid(path.into_inner(), FieldName::new("id"))
}

/// Register a new warranty.
#[utoipa::path(
    post,
    path = "/api/v1/warranties",
    request_body = CreateWarrantyRequestBody,
    responses(
        (status = 200, description = "Warranty registered", body = WarrantyBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Serial number already registered", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["warranties"],
    operation_id = "createWarranty"
)]
#[post("/warranties")]
pub async fn create_warranty(
    state: web::Data<HttpState>,
    payload: web::Json<CreateWarrantyRequestBody>,
) -> ApiResult<web::Json<WarrantyBody>> {
    let request = parse_create_request(payload.into_inner())?;
    let response = state.warranties.create_warranty(request).await?;
    Ok(web::Json(response.into()))
}

/// Fetch one warranty by id.
#[utoipa::path(
    get,
    path = "/api/v1/warranties/{id}",
    params(("id" = String, Path, description = "Warranty id")),
    responses(
        (status = 200, description = "Warranty record", body = WarrantyBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown warranty", body = Error)
    ),
    tags = ["warranties"],
    operation_id = "getWarranty"
)]
#[get("/warranties/{id}")]
pub async fn get_warranty(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<WarrantyBody>> {
    let warranty_id = parse_warranty_id(path)?;
    let response = state
        .warranties_query
        .get_warranty(GetWarrantyRequest { warranty_id })
        .await?;
    Ok(web::Json(response.warranty.into()))
}

/// List warranties, optionally filtered by customer and/or product.
#[utoipa::path(
    get,
    path = "/api/v1/warranties",
    params(
        ("customerId" = Option<String>, Query, description = "Filter by owning customer"),
        ("productId" = Option<String>, Query, description = "Filter by covered product")
    ),
    responses(
        (status = 200, description = "Matching warranties, newest first", body = ListWarrantiesResponseBody),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["warranties"],
    operation_id = "listWarranties"
)]
#[get("/warranties")]
pub async fn list_warranties(
    state: web::Data<HttpState>,
    query: web::Query<ListWarrantiesQueryParams>,
) -> ApiResult<web::Json<ListWarrantiesResponseBody>> {
    let params = query.into_inner();
    let request = ListWarrantiesRequest {
        customer_id: parse_optional_uuid(params.customer_id, FieldName::new("customerId"))?,
        product_id: parse_optional_uuid(params.product_id, FieldName::new("productId"))?,
    };

    let response = state.warranties_query.list_warranties(request).await?;
    Ok(web::Json(ListWarrantiesResponseBody {
        warranties: response.warranties.into_iter().map(Into::into).collect(),
    }))
}

/// Put a warranty in force; an overdue record expires instead.
#[utoipa::path(
    post,
    path = "/api/v1/warranties/{id}/validate",
    params(("id" = String, Path, description = "Warranty id")),
    responses(
        (status = 200, description = "Post-transition warranty", body = WarrantyBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown warranty", body = Error)
    ),
    tags = ["warranties"],
    operation_id = "validateWarranty"
)]
#[post("/warranties/{id}/validate")]
pub async fn validate_warranty(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<WarrantyBody>> {
    let warranty_id = parse_warranty_id(path)?;
    let response = state
        .warranties
        .validate_warranty(ValidateWarrantyRequest { warranty_id })
        .await?;
    Ok(web::Json(response.into()))
}

/// Retire a warranty immediately.
#[utoipa::path(
    post,
    path = "/api/v1/warranties/{id}/expire",
    params(("id" = String, Path, description = "Warranty id")),
    responses(
        (status = 200, description = "Post-transition warranty", body = WarrantyBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown warranty", body = Error)
    ),
    tags = ["warranties"],
    operation_id = "expireWarranty"
)]
#[post("/warranties/{id}/expire")]
pub async fn expire_warranty(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<WarrantyBody>> {
    let warranty_id = parse_warranty_id(path)?;
    let response = state
        .warranties
        .mark_expired(MarkWarrantyExpiredRequest { warranty_id })
        .await?;
    Ok(web::Json(response.into()))
}

/// File a claim against a warranty.
#[utoipa::path(
    post,
    path = "/api/v1/warranties/{id}/claim",
    params(("id" = String, Path, description = "Warranty id")),
    request_body = FileClaimRequestBody,
    responses(
        (status = 200, description = "Post-transition warranty", body = WarrantyBody),
        (status = 400, description = "Missing problem description", body = Error),
        (status = 404, description = "Unknown warranty", body = Error)
    ),
    tags = ["warranties"],
    operation_id = "fileWarrantyClaim"
)]
#[post("/warranties/{id}/claim")]
pub async fn file_warranty_claim(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<FileClaimRequestBody>,
) -> ApiResult<web::Json<WarrantyBody>> {
    let warranty_id = parse_warranty_id(path)?;
    let response = state
        .warranties
        .file_claim(FileWarrantyClaimRequest {
            warranty_id,
            problem_description: payload.into_inner().problem_description,
        })
        .await?;
    Ok(web::Json(response.into()))
}

/// Return a warranty to draft.
#[utoipa::path(
    post,
    path = "/api/v1/warranties/{id}/reset",
    params(("id" = String, Path, description = "Warranty id")),
    responses(
        (status = 200, description = "Post-transition warranty", body = WarrantyBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown warranty", body = Error)
    ),
    tags = ["warranties"],
    operation_id = "resetWarranty"
)]
#[post("/warranties/{id}/reset")]
pub async fn reset_warranty(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<WarrantyBody>> {
    let warranty_id = parse_warranty_id(path)?;
    let response = state
        .warranties
        .reset_to_draft(ResetWarrantyRequest { warranty_id })
        .await?;
    Ok(web::Json(response.into()))
}

/// Amend purchase date and/or duration, re-deriving the expiration date.
#[utoipa::path(
    patch,
    path = "/api/v1/warranties/{id}/terms",
    params(("id" = String, Path, description = "Warranty id")),
    request_body = AmendTermsRequestBody,
    responses(
        (status = 200, description = "Amended warranty", body = WarrantyBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown warranty", body = Error)
    ),
    tags = ["warranties"],
    operation_id = "amendWarrantyTerms"
)]
#[patch("/warranties/{id}/terms")]
pub async fn amend_warranty_terms(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AmendTermsRequestBody>,
) -> ApiResult<web::Json<WarrantyBody>> {
    let warranty_id = parse_warranty_id(path)?;
    let body = payload.into_inner();
    let response = state
        .warranties
        .amend_terms(AmendWarrantyTermsRequest {
            warranty_id,
            purchase_date: parse_optional_date(
                body.purchase_date,
                FieldName::new("purchaseDate"),
            )?,
            duration_months: body.duration_months,
        })
        .await?;
    Ok(web::Json(response.into()))
}

#[cfg(test)]
#[path = "warranties_tests.rs"]
mod tests;
