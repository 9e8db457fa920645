//! Domain primitives, aggregates, and services.
//!
//! Purpose: own the warranty lifecycle — entity invariants, named state
//! transitions, number issuance orchestration, and the expiration sweep —
//! independent of transport and storage. Adapters depend on the ports in
//! [`ports`]; nothing in this module touches Actix or Diesel.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] — transport-agnostic failure payload.
//! - [`Warranty`] and friends — the aggregate and its value types.
//! - [`WarrantyCommandService`] / [`WarrantyQueryService`] — driving-port
//!   implementations over a repository and number issuer.
//! - [`ExpirationSweepService`] — the scheduled sweep implementation.

pub mod error;
pub mod expiration_sweep_service;
pub mod ports;
pub mod warranty;
pub mod warranty_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::expiration_sweep_service::ExpirationSweepService;
pub use self::warranty::{
    ParseWarrantyNumberError, ParseWarrantyStateError, RestoredWarranty, Warranty, WarrantyDraft,
    WarrantyNumber, WarrantyState, WarrantyValidationError,
};
pub use self::warranty_service::{WarrantyCommandService, WarrantyQueryService};
