//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Warranty records table.
    ///
    /// One row per registered warranty. `serial_number` carries a `UNIQUE`
    /// constraint and `duration_months` a positive `CHECK`; both are enforced
    /// by the database in addition to domain validation.
    warranties (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Issuer-assigned warranty number, unique.
        number -> Varchar,
        /// Owning customer reference.
        customer_id -> Uuid,
        /// Covered product reference.
        product_id -> Uuid,
        /// Globally unique product serial number.
        serial_number -> Varchar,
        /// Date the product was purchased.
        purchase_date -> Date,
        /// Coverage duration in months, strictly positive.
        duration_months -> Int4,
        /// Derived expiration date, kept for sweep selection.
        expiration_date -> Date,
        /// Lifecycle state: draft, valid, expired, or claim.
        state -> Varchar,
        /// Free-text defect description backing claims.
        problem_description -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Named counters backing the warranty number issuer.
    ///
    /// A single row per logical sequence; allocation increments `last_value`
    /// atomically in one statement.
    warranty_counters (code) {
        /// Logical sequence code.
        code -> Varchar,
        /// Most recently allocated counter value.
        last_value -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}
