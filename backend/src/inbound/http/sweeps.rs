//! Admin endpoint triggering the expiration sweep.
//!
//! The scheduler collaborator posts here on its own cadence (typically once a
//! day); the endpoint only exposes the sweep entry point, never the schedule.

use actix_web::{post, web};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{SweepOutcome, SweepRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_date};

/// Request payload for a sweep run.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SweepRequestBody {
    /// Sweep reference date; defaults to the current date when omitted.
    #[schema(format = "date", example = "2026-04-01")]
    pub as_of: Option<String>,
}

/// One record the sweep could not transition.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SweepFailureBody {
    #[schema(format = "uuid")]
    pub warranty_id: String,
    pub message: String,
}

/// Response payload summarising a sweep run.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SweepOutcomeBody {
    #[schema(format = "date")]
    pub as_of: String,
    pub expired: u64,
    pub skipped: u64,
    pub notification_failures: u64,
    pub failures: Vec<SweepFailureBody>,
}

impl SweepOutcomeBody {
    fn from_outcome(as_of: chrono::NaiveDate, outcome: SweepOutcome) -> Self {
        Self {
            as_of: as_of.to_string(),
            expired: outcome.expired,
            skipped: outcome.skipped,
            notification_failures: outcome.notification_failures,
            failures: outcome
                .failures
                .into_iter()
                .map(|failure| SweepFailureBody {
                    warranty_id: failure.warranty_id.to_string(),
                    message: failure.message,
                })
                .collect(),
        }
    }
}

/// Expire every overdue `valid` warranty as of the given date.
#[utoipa::path(
    post,
    path = "/api/v1/admin/sweeps",
    request_body = SweepRequestBody,
    responses(
        (status = 200, description = "Sweep outcome", body = SweepOutcomeBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "runExpirationSweep"
)]
#[post("/admin/sweeps")]
pub async fn run_expiration_sweep(
    state: web::Data<HttpState>,
    payload: web::Json<SweepRequestBody>,
) -> ApiResult<web::Json<SweepOutcomeBody>> {
    let as_of = parse_optional_date(payload.into_inner().as_of, FieldName::new("asOf"))?
        .unwrap_or_else(|| state.clock.utc().date_naive());

    let outcome = state.sweep.sweep(SweepRequest { as_of }).await?;
    Ok(web::Json(SweepOutcomeBody::from_outcome(as_of, outcome)))
}

#[cfg(test)]
#[path = "sweeps_tests.rs"]
mod tests;
