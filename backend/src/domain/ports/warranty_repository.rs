//! Driven port for warranty persistence.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::Warranty;

use super::define_port_error;

define_port_error! {
    /// Errors raised by warranty repository adapters.
    pub enum WarrantyRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "warranty repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "warranty repository query failed: {message}",
        /// A storage uniqueness constraint was violated.
        Conflict { message: String } =>
            "warranty uniqueness conflict: {message}",
    }
}

/// Optional filters applied by [`WarrantyRepository::list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarrantyListFilter {
    /// Restrict to warranties held by this customer.
    pub customer_id: Option<Uuid>,
    /// Restrict to warranties covering this product.
    pub product_id: Option<Uuid>,
}

/// Port for writing and reading warranty records.
///
/// The storage layer enforces the global uniqueness of serial numbers;
/// adapters surface violations as [`WarrantyRepositoryError::Conflict`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarrantyRepository: Send + Sync {
    /// Persist a freshly created warranty.
    async fn insert(&self, warranty: &Warranty) -> Result<(), WarrantyRepositoryError>;

    /// Persist the current state of an existing warranty.
    async fn update(&self, warranty: &Warranty) -> Result<(), WarrantyRepositoryError>;

    /// Find a warranty by id.
    async fn find_by_id(&self, warranty_id: Uuid)
    -> Result<Option<Warranty>, WarrantyRepositoryError>;

    /// List warranties matching the filter, newest first.
    async fn list(
        &self,
        filter: WarrantyListFilter,
    ) -> Result<Vec<Warranty>, WarrantyRepositoryError>;

    /// List every `valid` warranty whose expiration date lies strictly
    /// before `as_of`.
    async fn list_valid_expiring_before(
        &self,
        as_of: NaiveDate,
    ) -> Result<Vec<Warranty>, WarrantyRepositoryError>;

    /// Expire one warranty, guarded by "still `valid` and still overdue".
    ///
    /// Returns the updated record when the guard matched, or `None` when a
    /// concurrent transition already moved the record on — the caller lost
    /// the race and must not treat the record as swept.
    async fn expire_if_still_overdue(
        &self,
        warranty_id: Uuid,
        as_of: NaiveDate,
    ) -> Result<Option<Warranty>, WarrantyRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureWarrantyRepository;

#[async_trait]
impl WarrantyRepository for FixtureWarrantyRepository {
    async fn insert(&self, _warranty: &Warranty) -> Result<(), WarrantyRepositoryError> {
        Ok(())
    }

    async fn update(&self, _warranty: &Warranty) -> Result<(), WarrantyRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _warranty_id: Uuid,
    ) -> Result<Option<Warranty>, WarrantyRepositoryError> {
        Ok(None)
    }

    async fn list(
        &self,
        _filter: WarrantyListFilter,
    ) -> Result<Vec<Warranty>, WarrantyRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_valid_expiring_before(
        &self,
        _as_of: NaiveDate,
    ) -> Result<Vec<Warranty>, WarrantyRepositoryError> {
        Ok(Vec::new())
    }

    async fn expire_if_still_overdue(
        &self,
        _warranty_id: Uuid,
        _as_of: NaiveDate,
    ) -> Result<Option<Warranty>, WarrantyRepositoryError> {
        Ok(None)
    }
}
