//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Async-safe pooling**: Connections are managed via `bb8` pools with
//!   proper async integration through `diesel-async`.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   persistence error types.
//!
//! # Example
//!
//! ```ignore
//! use warranty_backend::outbound::persistence::{DbPool, PoolConfig, DieselWarrantyRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/warranties");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselWarrantyRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_warranty_number_issuer;
mod diesel_warranty_repository;
mod models;
mod pool;
mod schema;

pub use diesel_warranty_number_issuer::DieselWarrantyNumberIssuer;
pub use diesel_warranty_repository::DieselWarrantyRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
