//! Driving port for warranty mutations.
//!
//! All lifecycle changes — creation, the named state transitions, and term
//! amendments — enter the domain through this port.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, Warranty, WarrantyNumber, WarrantyState};

/// Serializable warranty snapshot returned by driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyPayload {
    pub id: Uuid,
    pub number: WarrantyNumber,
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub serial_number: String,
    pub purchase_date: NaiveDate,
    pub duration_months: u32,
    pub expiration_date: NaiveDate,
    pub state: WarrantyState,
    pub problem_description: Option<String>,
}

impl From<&Warranty> for WarrantyPayload {
    fn from(value: &Warranty) -> Self {
        Self {
            id: value.id(),
            number: value.number().clone(),
            customer_id: value.customer_id(),
            product_id: value.product_id(),
            serial_number: value.serial_number().to_owned(),
            purchase_date: value.purchase_date(),
            duration_months: value.duration_months(),
            expiration_date: value.expiration_date(),
            state: value.state(),
            problem_description: value.problem_description().map(str::to_owned),
        }
    }
}

impl From<Warranty> for WarrantyPayload {
    fn from(value: Warranty) -> Self {
        Self::from(&value)
    }
}

/// Request to register a new warranty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarrantyRequest {
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub serial_number: String,
    pub purchase_date: NaiveDate,
    pub duration_months: u32,
    pub problem_description: Option<String>,
}

/// Request to put a warranty in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateWarrantyRequest {
    pub warranty_id: Uuid,
}

/// Request to retire a warranty immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkWarrantyExpiredRequest {
    pub warranty_id: Uuid,
}

/// Request to file a claim against a warranty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileWarrantyClaimRequest {
    pub warranty_id: Uuid,
    /// Replaces the stored description when provided.
    pub problem_description: Option<String>,
}

/// Request to return a warranty to `draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetWarrantyRequest {
    pub warranty_id: Uuid,
}

/// Request to amend the coverage terms of a warranty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmendWarrantyTermsRequest {
    pub warranty_id: Uuid,
    pub purchase_date: Option<NaiveDate>,
    pub duration_months: Option<u32>,
}

/// Response carrying the post-operation warranty snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyResponse {
    pub warranty: WarrantyPayload,
}

/// Driving port for warranty write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarrantyCommand: Send + Sync {
    /// Register a warranty: allocate a number, derive the expiration date,
    /// and persist the record in `draft`.
    async fn create_warranty(
        &self,
        request: CreateWarrantyRequest,
    ) -> Result<WarrantyResponse, Error>;

    /// Transition a warranty to `valid`, or to `expired` when it is already
    /// overdue.
    async fn validate_warranty(
        &self,
        request: ValidateWarrantyRequest,
    ) -> Result<WarrantyResponse, Error>;

    /// Transition a warranty to `expired` from any state.
    async fn mark_expired(
        &self,
        request: MarkWarrantyExpiredRequest,
    ) -> Result<WarrantyResponse, Error>;

    /// Transition a warranty to `claim`, requiring a problem description.
    async fn file_claim(&self, request: FileWarrantyClaimRequest)
    -> Result<WarrantyResponse, Error>;

    /// Transition a warranty back to `draft` from any state.
    async fn reset_to_draft(
        &self,
        request: ResetWarrantyRequest,
    ) -> Result<WarrantyResponse, Error>;

    /// Amend purchase date and/or duration, re-deriving the expiration date.
    async fn amend_terms(
        &self,
        request: AmendWarrantyTermsRequest,
    ) -> Result<WarrantyResponse, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
///
/// `create_warranty` echoes a validated record; the id-addressed operations
/// report the record as missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureWarrantyCommand;

impl FixtureWarrantyCommand {
    fn missing(warranty_id: Uuid) -> Error {
        Error::not_found(format!("warranty {warranty_id} not found"))
    }
}

#[async_trait]
impl WarrantyCommand for FixtureWarrantyCommand {
    async fn create_warranty(
        &self,
        request: CreateWarrantyRequest,
    ) -> Result<WarrantyResponse, Error> {
        let warranty = Warranty::new(
            crate::domain::WarrantyDraft {
                id: Uuid::new_v4(),
                number: WarrantyNumber::compose(1970, 1),
                customer_id: request.customer_id,
                product_id: request.product_id,
                serial_number: request.serial_number,
                purchase_date: request.purchase_date,
                duration_months: request.duration_months,
                problem_description: request.problem_description,
            },
            request.purchase_date,
        )
        .map_err(|err| Error::invalid_input(err.to_string()))?;

        Ok(WarrantyResponse {
            warranty: warranty.into(),
        })
    }

    async fn validate_warranty(
        &self,
        request: ValidateWarrantyRequest,
    ) -> Result<WarrantyResponse, Error> {
        Err(Self::missing(request.warranty_id))
    }

    async fn mark_expired(
        &self,
        request: MarkWarrantyExpiredRequest,
    ) -> Result<WarrantyResponse, Error> {
        Err(Self::missing(request.warranty_id))
    }

    async fn file_claim(
        &self,
        request: FileWarrantyClaimRequest,
    ) -> Result<WarrantyResponse, Error> {
        Err(Self::missing(request.warranty_id))
    }

    async fn reset_to_draft(
        &self,
        request: ResetWarrantyRequest,
    ) -> Result<WarrantyResponse, Error> {
        Err(Self::missing(request.warranty_id))
    }

    async fn amend_terms(
        &self,
        request: AmendWarrantyTermsRequest,
    ) -> Result<WarrantyResponse, Error> {
        Err(Self::missing(request.warranty_id))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_create_echoes_a_draft_record() {
        let command = FixtureWarrantyCommand;
        let response = command
            .create_warranty(CreateWarrantyRequest {
                customer_id: Uuid::new_v4(),
                product_id: Uuid::new_v4(),
                serial_number: "SN-0001".to_owned(),
                purchase_date: NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid calendar date"),
                duration_months: 12,
                problem_description: None,
            })
            .await
            .expect("fixture create succeeds");

        assert_eq!(response.warranty.state, WarrantyState::Draft);
        assert_eq!(response.warranty.duration_months, 12);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_transitions_report_missing_records() {
        let command = FixtureWarrantyCommand;
        let result = command
            .validate_warranty(ValidateWarrantyRequest {
                warranty_id: Uuid::new_v4(),
            })
            .await;

        assert!(result.is_err());
    }
}
