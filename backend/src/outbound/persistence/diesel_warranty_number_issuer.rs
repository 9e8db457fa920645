//! PostgreSQL-backed `WarrantyNumberIssuer` implementation using Diesel ORM.
//!
//! Allocation is one upsert statement against a named counter row: the first
//! call seeds the row at 1, every later call increments and returns the new
//! value. The statement is atomic at the database, so concurrent callers can
//! never observe the same counter, and a second seed of the same code is a
//! no-op rather than a reset.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;

use crate::domain::WarrantyNumber;
use crate::domain::ports::{WarrantyNumberIssuer, WarrantyNumberIssuerError};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewWarrantyCounterRow;
use super::pool::{DbPool, PoolError};
use super::schema::warranty_counters;

/// Logical sequence code for the warranty number counter row.
const WARRANTY_SEQUENCE_CODE: &str = "warranty.number";

/// Diesel-backed implementation of the warranty number issuer port.
///
/// The year segment reflects the injected clock at allocation time; the
/// counter itself never resets across year changes.
#[derive(Clone)]
pub struct DieselWarrantyNumberIssuer {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselWarrantyNumberIssuer {
    /// Create a new issuer with the given connection pool and clock.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

/// Map pool errors to domain issuer errors.
fn map_pool_error(error: PoolError) -> WarrantyNumberIssuerError {
    map_basic_pool_error(error, |message| {
        WarrantyNumberIssuerError::connection(message)
    })
}

/// Map Diesel errors to domain issuer errors.
fn map_diesel_error(error: diesel::result::Error) -> WarrantyNumberIssuerError {
    map_basic_diesel_error(
        error,
        WarrantyNumberIssuerError::allocation,
        WarrantyNumberIssuerError::connection,
    )
}

#[async_trait]
impl WarrantyNumberIssuer for DieselWarrantyNumberIssuer {
    async fn next(&self) -> Result<WarrantyNumber, WarrantyNumberIssuerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let allocated: i64 = diesel::insert_into(warranty_counters::table)
            .values(NewWarrantyCounterRow {
                code: WARRANTY_SEQUENCE_CODE,
                last_value: 1,
            })
            .on_conflict(warranty_counters::code)
            .do_update()
            .set(warranty_counters::last_value.eq(warranty_counters::last_value + 1))
            .returning(warranty_counters::last_value)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(WarrantyNumber::compose(self.clock.utc().year(), allocated))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let issuer_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(
            issuer_err,
            WarrantyNumberIssuerError::Connection { .. }
        ));
    }

    #[rstest]
    fn diesel_error_maps_to_allocation_error() {
        let issuer_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(
            issuer_err,
            WarrantyNumberIssuerError::Allocation { .. }
        ));
    }

    #[rstest]
    fn sequence_code_is_stable() {
        // The counter row is addressed by this code; renaming it would orphan
        // the live sequence.
        assert_eq!(WARRANTY_SEQUENCE_CODE, "warranty.number");
    }
}
