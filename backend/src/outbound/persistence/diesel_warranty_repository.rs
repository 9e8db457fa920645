//! PostgreSQL-backed `WarrantyRepository` implementation using Diesel ORM.
//!
//! This adapter persists warranty records and rehydrates them through the
//! validated domain constructor. The database enforces serial-number
//! uniqueness; violations surface as conflict errors.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{WarrantyListFilter, WarrantyRepository, WarrantyRepositoryError};
use crate::domain::{RestoredWarranty, Warranty, WarrantyNumber, WarrantyState};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewWarrantyRow, WarrantyRow, WarrantyUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::warranties;

/// Diesel-backed implementation of the warranty repository port.
#[derive(Clone)]
pub struct DieselWarrantyRepository {
    pool: DbPool,
}

impl DieselWarrantyRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> WarrantyRepositoryError {
    map_basic_pool_error(error, |message| {
        WarrantyRepositoryError::connection(message)
    })
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> WarrantyRepositoryError {
    map_basic_diesel_error(
        error,
        WarrantyRepositoryError::query,
        WarrantyRepositoryError::connection,
    )
}

/// Map Diesel write errors, surfacing unique violations as conflicts.
fn map_write_error(error: diesel::result::Error) -> WarrantyRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            WarrantyRepositoryError::conflict(info.message())
        }
        _ => map_diesel_error(error),
    }
}

/// Convert a database row into a validated domain warranty.
fn row_to_warranty(row: WarrantyRow) -> Result<Warranty, WarrantyRepositoryError> {
    let WarrantyRow {
        id,
        number,
        customer_id,
        product_id,
        serial_number,
        purchase_date,
        duration_months,
        state,
        problem_description,
        ..
    } = row;

    let number = WarrantyNumber::from_str(number.as_str())
        .map_err(|err| WarrantyRepositoryError::query(err.to_string()))?;
    let state = WarrantyState::from_str(state.as_str())
        .map_err(|err| WarrantyRepositoryError::query(err.to_string()))?;
    let duration_months = u32::try_from(duration_months)
        .map_err(|_| WarrantyRepositoryError::query("negative warranty duration in storage"))?;

    Warranty::restore(RestoredWarranty {
        id,
        number,
        customer_id,
        product_id,
        serial_number,
        purchase_date,
        duration_months,
        state,
        problem_description,
    })
    .map_err(|err| WarrantyRepositoryError::query(err.to_string()))
}

fn duration_to_row(warranty: &Warranty) -> Result<i32, WarrantyRepositoryError> {
    i32::try_from(warranty.duration_months())
        .map_err(|_| WarrantyRepositoryError::query("warranty duration exceeds storage range"))
}

#[async_trait]
impl WarrantyRepository for DieselWarrantyRepository {
    async fn insert(&self, warranty: &Warranty) -> Result<(), WarrantyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewWarrantyRow {
            id: warranty.id(),
            number: warranty.number().as_str(),
            customer_id: warranty.customer_id(),
            product_id: warranty.product_id(),
            serial_number: warranty.serial_number(),
            purchase_date: warranty.purchase_date(),
            duration_months: duration_to_row(warranty)?,
            expiration_date: warranty.expiration_date(),
            state: warranty.state().as_str(),
            problem_description: warranty.problem_description(),
        };

        diesel::insert_into(warranties::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_write_error)
    }

    async fn update(&self, warranty: &Warranty) -> Result<(), WarrantyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update_row = WarrantyUpdate {
            purchase_date: warranty.purchase_date(),
            duration_months: duration_to_row(warranty)?,
            expiration_date: warranty.expiration_date(),
            state: warranty.state().as_str(),
            problem_description: warranty.problem_description(),
        };

        let updated = diesel::update(warranties::table.find(warranty.id()))
            .set(&update_row)
            .execute(&mut conn)
            .await
            .map_err(map_write_error)?;

        if updated == 0 {
            return Err(WarrantyRepositoryError::query("record not found"));
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        warranty_id: Uuid,
    ) -> Result<Option<Warranty>, WarrantyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = warranties::table
            .find(warranty_id)
            .select(WarrantyRow::as_select())
            .first::<WarrantyRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_warranty).transpose()
    }

    async fn list(
        &self,
        filter: WarrantyListFilter,
    ) -> Result<Vec<Warranty>, WarrantyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = warranties::table.into_boxed();
        if let Some(customer_id) = filter.customer_id {
            query = query.filter(warranties::customer_id.eq(customer_id));
        }
        if let Some(product_id) = filter.product_id {
            query = query.filter(warranties::product_id.eq(product_id));
        }

        let rows: Vec<WarrantyRow> = query
            .order((warranties::created_at.desc(), warranties::id.desc()))
            .select(WarrantyRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_warranty).collect()
    }

    async fn list_valid_expiring_before(
        &self,
        as_of: NaiveDate,
    ) -> Result<Vec<Warranty>, WarrantyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<WarrantyRow> = warranties::table
            .filter(
                warranties::state
                    .eq(WarrantyState::Valid.as_str())
                    .and(warranties::expiration_date.lt(as_of)),
            )
            .order(warranties::expiration_date.asc())
            .select(WarrantyRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_warranty).collect()
    }

    async fn expire_if_still_overdue(
        &self,
        warranty_id: Uuid,
        as_of: NaiveDate,
    ) -> Result<Option<Warranty>, WarrantyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Single-statement compare-and-set: the guard loses against any
        // concurrent transition committed since the candidate was selected.
        let row = diesel::update(
            warranties::table.filter(
                warranties::id
                    .eq(warranty_id)
                    .and(warranties::state.eq(WarrantyState::Valid.as_str()))
                    .and(warranties::expiration_date.lt(as_of)),
            ),
        )
        .set(warranties::state.eq(WarrantyState::Expired.as_str()))
        .returning(WarrantyRow::as_returning())
        .get_result::<WarrantyRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_warranty).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::Utc;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> WarrantyRow {
        let now = Utc::now();
        WarrantyRow {
            id: Uuid::new_v4(),
            number: "GAR/2026/00042".to_owned(),
            customer_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            serial_number: "SN-0042".to_owned(),
            purchase_date: NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid calendar date"),
            duration_months: 12,
            expiration_date: NaiveDate::from_ymd_opt(2027, 3, 15).expect("valid calendar date"),
            state: "valid".to_owned(),
            problem_description: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::checkout("connection refused");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(
            repo_err,
            WarrantyRepositoryError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let diesel_err = diesel::result::Error::NotFound;
        let repo_err = map_diesel_error(diesel_err);

        assert!(matches!(repo_err, WarrantyRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn unique_violation_maps_to_conflict() {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let diesel_err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        );
        let repo_err = map_write_error(diesel_err);

        assert!(matches!(repo_err, WarrantyRepositoryError::Conflict { .. }));
        assert!(repo_err.to_string().contains("duplicate key"));
    }

    #[rstest]
    fn row_conversion_rehydrates_the_aggregate(valid_row: WarrantyRow) {
        let warranty = row_to_warranty(valid_row).expect("valid row converts");

        assert_eq!(warranty.state(), WarrantyState::Valid);
        assert_eq!(warranty.number().as_str(), "GAR/2026/00042");
        assert_eq!(
            warranty.expiration_date(),
            NaiveDate::from_ymd_opt(2027, 3, 15).expect("valid calendar date")
        );
    }

    #[rstest]
    fn row_conversion_rejects_unknown_state(mut valid_row: WarrantyRow) {
        valid_row.state = "pending".to_owned();

        let error = row_to_warranty(valid_row).expect_err("unknown state should fail");
        assert!(matches!(error, WarrantyRepositoryError::Query { .. }));
        assert!(error.to_string().contains("pending"));
    }

    #[rstest]
    fn row_conversion_rejects_malformed_number(mut valid_row: WarrantyRow) {
        valid_row.number = "not-a-number".to_owned();

        let error = row_to_warranty(valid_row).expect_err("malformed number should fail");
        assert!(matches!(error, WarrantyRepositoryError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_rejects_negative_duration(mut valid_row: WarrantyRow) {
        valid_row.duration_months = -1;

        let error = row_to_warranty(valid_row).expect_err("negative duration should fail");
        assert!(error.to_string().contains("negative warranty duration"));
    }
}
