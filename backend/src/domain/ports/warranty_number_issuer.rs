//! Driven port for warranty number allocation.

use async_trait::async_trait;

use crate::domain::WarrantyNumber;

use super::define_port_error;

define_port_error! {
    /// Errors raised by warranty number issuer adapters.
    pub enum WarrantyNumberIssuerError {
        /// Issuer backing store could not be reached.
        Connection { message: String } =>
            "warranty number issuer connection failed: {message}",
        /// The atomic allocation statement failed.
        Allocation { message: String } =>
            "warranty number allocation failed: {message}",
    }
}

/// Port handing out unique, monotonically increasing warranty numbers.
///
/// Allocation must be a single atomic increment-and-read: two concurrent
/// callers never receive the same number. The sequence is gap-tolerant — an
/// allocated number whose owning create transaction aborts is not reclaimed —
/// and the counter never resets when the year segment rolls over.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarrantyNumberIssuer: Send + Sync {
    /// Allocate the next warranty number.
    async fn next(&self) -> Result<WarrantyNumber, WarrantyNumberIssuerError>;
}

/// Fixture issuer for tests that do not care about numbering.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureWarrantyNumberIssuer;

#[async_trait]
impl WarrantyNumberIssuer for FixtureWarrantyNumberIssuer {
    async fn next(&self) -> Result<WarrantyNumber, WarrantyNumberIssuerError> {
        Ok(WarrantyNumber::compose(1970, 1))
    }
}
