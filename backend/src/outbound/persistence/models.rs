//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{warranties, warranty_counters};

/// Row struct for reading from the warranties table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = warranties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WarrantyRow {
    pub id: Uuid,
    pub number: String,
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub serial_number: String,
    pub purchase_date: NaiveDate,
    pub duration_months: i32,
    #[expect(dead_code, reason = "derived column re-computed by the aggregate on load")]
    pub expiration_date: NaiveDate,
    pub state: String,
    pub problem_description: Option<String>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new warranty records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = warranties)]
pub(crate) struct NewWarrantyRow<'a> {
    pub id: Uuid,
    pub number: &'a str,
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub serial_number: &'a str,
    pub purchase_date: NaiveDate,
    pub duration_months: i32,
    pub expiration_date: NaiveDate,
    pub state: &'a str,
    pub problem_description: Option<&'a str>,
}

/// Changeset struct for updating existing warranty records.
///
/// Identity, number, references, and serial number are immutable after
/// creation and deliberately absent here.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = warranties)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct WarrantyUpdate<'a> {
    pub purchase_date: NaiveDate,
    pub duration_months: i32,
    pub expiration_date: NaiveDate,
    pub state: &'a str,
    pub problem_description: Option<&'a str>,
}

/// Insertable struct seeding a named counter row on first use.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = warranty_counters)]
pub(crate) struct NewWarrantyCounterRow<'a> {
    pub code: &'a str,
    pub last_value: i64,
}
