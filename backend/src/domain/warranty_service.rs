//! Warranty domain services.
//!
//! These services implement the warranty driving ports: commands orchestrate
//! the number issuer and the repository around the aggregate's transitions,
//! queries serve read models.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    AmendWarrantyTermsRequest, CreateWarrantyRequest, FileWarrantyClaimRequest,
    GetWarrantyRequest, GetWarrantyResponse, ListWarrantiesRequest, ListWarrantiesResponse,
    MarkWarrantyExpiredRequest, ResetWarrantyRequest, ValidateWarrantyRequest, WarrantyCommand,
    WarrantyListFilter, WarrantyNumberIssuer, WarrantyNumberIssuerError, WarrantyQuery,
    WarrantyRepository, WarrantyRepositoryError, WarrantyResponse,
};
use crate::domain::{Error, Warranty, WarrantyDraft, WarrantyValidationError};

pub(crate) fn map_repository_error(error: WarrantyRepositoryError) -> Error {
    match error {
        WarrantyRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("warranty repository unavailable: {message}"))
        }
        WarrantyRepositoryError::Query { message } => {
            Error::internal(format!("warranty repository error: {message}"))
        }
        WarrantyRepositoryError::Conflict { .. } => {
            Error::conflict("serial number is already registered to another warranty")
        }
    }
}

fn map_issuer_error(error: WarrantyNumberIssuerError) -> Error {
    match error {
        WarrantyNumberIssuerError::Connection { message } => {
            Error::service_unavailable(format!("warranty number issuer unavailable: {message}"))
        }
        WarrantyNumberIssuerError::Allocation { message } => {
            Error::internal(format!("warranty number allocation failed: {message}"))
        }
    }
}

fn map_validation_error(error: WarrantyValidationError) -> Error {
    match error {
        WarrantyValidationError::ExpirationNotComputable { .. } => {
            Error::invalid_state(error.to_string())
        }
        _ => Error::invalid_input(error.to_string()),
    }
}

/// Warranty service implementing the command driving port.
#[derive(Clone)]
pub struct WarrantyCommandService<R, I> {
    warranty_repo: Arc<R>,
    number_issuer: Arc<I>,
    clock: Arc<dyn Clock>,
}

impl<R, I> WarrantyCommandService<R, I>
where
    R: WarrantyRepository,
    I: WarrantyNumberIssuer,
{
    /// Create a new command service over the repository and issuer.
    pub fn new(warranty_repo: Arc<R>, number_issuer: Arc<I>, clock: Arc<dyn Clock>) -> Self {
        Self {
            warranty_repo,
            number_issuer,
            clock,
        }
    }

    async fn load(&self, warranty_id: Uuid) -> Result<Warranty, Error> {
        self.warranty_repo
            .find_by_id(warranty_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("warranty {warranty_id} not found")))
    }

    async fn persist(&self, warranty: Warranty) -> Result<WarrantyResponse, Error> {
        self.warranty_repo
            .update(&warranty)
            .await
            .map_err(map_repository_error)?;

        Ok(WarrantyResponse {
            warranty: warranty.into(),
        })
    }
}

#[async_trait]
impl<R, I> WarrantyCommand for WarrantyCommandService<R, I>
where
    R: WarrantyRepository,
    I: WarrantyNumberIssuer,
{
    async fn create_warranty(
        &self,
        request: CreateWarrantyRequest,
    ) -> Result<WarrantyResponse, Error> {
        let number = self
            .number_issuer
            .next()
            .await
            .map_err(map_issuer_error)?;

        let warranty = Warranty::new(
            WarrantyDraft {
                id: Uuid::new_v4(),
                number,
                customer_id: request.customer_id,
                product_id: request.product_id,
                serial_number: request.serial_number,
                purchase_date: request.purchase_date,
                duration_months: request.duration_months,
                problem_description: request.problem_description,
            },
            self.clock.utc().date_naive(),
        )
        .map_err(map_validation_error)?;

        self.warranty_repo
            .insert(&warranty)
            .await
            .map_err(map_repository_error)?;

        Ok(WarrantyResponse {
            warranty: warranty.into(),
        })
    }

    async fn validate_warranty(
        &self,
        request: ValidateWarrantyRequest,
    ) -> Result<WarrantyResponse, Error> {
        let mut warranty = self.load(request.warranty_id).await?;
        warranty.validate(self.clock.utc().date_naive());
        self.persist(warranty).await
    }

    async fn mark_expired(
        &self,
        request: MarkWarrantyExpiredRequest,
    ) -> Result<WarrantyResponse, Error> {
        let mut warranty = self.load(request.warranty_id).await?;
        warranty.mark_expired();
        self.persist(warranty).await
    }

    async fn file_claim(
        &self,
        request: FileWarrantyClaimRequest,
    ) -> Result<WarrantyResponse, Error> {
        let mut warranty = self.load(request.warranty_id).await?;
        warranty
            .file_claim(request.problem_description)
            .map_err(map_validation_error)?;
        self.persist(warranty).await
    }

    async fn reset_to_draft(
        &self,
        request: ResetWarrantyRequest,
    ) -> Result<WarrantyResponse, Error> {
        let mut warranty = self.load(request.warranty_id).await?;
        warranty.reset_to_draft();
        self.persist(warranty).await
    }

    async fn amend_terms(
        &self,
        request: AmendWarrantyTermsRequest,
    ) -> Result<WarrantyResponse, Error> {
        let mut warranty = self.load(request.warranty_id).await?;
        warranty
            .amend_terms(
                request.purchase_date,
                request.duration_months,
                self.clock.utc().date_naive(),
            )
            .map_err(map_validation_error)?;
        self.persist(warranty).await
    }
}

/// Warranty service implementing the query driving port.
#[derive(Clone)]
pub struct WarrantyQueryService<R> {
    warranty_repo: Arc<R>,
}

impl<R> WarrantyQueryService<R> {
    /// Create a new query service over the repository.
    pub fn new(warranty_repo: Arc<R>) -> Self {
        Self { warranty_repo }
    }
}

#[async_trait]
impl<R> WarrantyQuery for WarrantyQueryService<R>
where
    R: WarrantyRepository,
{
    async fn get_warranty(
        &self,
        request: GetWarrantyRequest,
    ) -> Result<GetWarrantyResponse, Error> {
        let warranty = self
            .warranty_repo
            .find_by_id(request.warranty_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!("warranty {} not found", request.warranty_id))
            })?;

        Ok(GetWarrantyResponse {
            warranty: warranty.into(),
        })
    }

    async fn list_warranties(
        &self,
        request: ListWarrantiesRequest,
    ) -> Result<ListWarrantiesResponse, Error> {
        let warranties = self
            .warranty_repo
            .list(WarrantyListFilter {
                customer_id: request.customer_id,
                product_id: request.product_id,
            })
            .await
            .map_err(map_repository_error)?;

        Ok(ListWarrantiesResponse {
            warranties: warranties.into_iter().map(Into::into).collect(),
        })
    }
}

#[cfg(test)]
#[path = "warranty_service_tests.rs"]
mod tests;
