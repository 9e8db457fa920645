//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod expiration_sweep;
mod warranty_command;
mod warranty_notifications;
mod warranty_number_issuer;
mod warranty_query;
mod warranty_repository;

#[cfg(test)]
pub use expiration_sweep::MockExpirationSweep;
pub use expiration_sweep::{
    ExpirationSweep, FixtureExpirationSweep, SweepFailure, SweepOutcome, SweepRequest,
};
#[cfg(test)]
pub use warranty_command::MockWarrantyCommand;
pub use warranty_command::{
    AmendWarrantyTermsRequest, CreateWarrantyRequest, FileWarrantyClaimRequest,
    FixtureWarrantyCommand, MarkWarrantyExpiredRequest, ResetWarrantyRequest,
    ValidateWarrantyRequest, WarrantyCommand, WarrantyPayload, WarrantyResponse,
};
#[cfg(test)]
pub use warranty_notifications::MockWarrantyNotificationPublisher;
pub use warranty_notifications::{
    NoOpWarrantyNotificationPublisher, WarrantyExpiredEvent, WarrantyNotificationError,
    WarrantyNotificationPublisher,
};
#[cfg(test)]
pub use warranty_number_issuer::MockWarrantyNumberIssuer;
pub use warranty_number_issuer::{
    FixtureWarrantyNumberIssuer, WarrantyNumberIssuer, WarrantyNumberIssuerError,
};
#[cfg(test)]
pub use warranty_query::MockWarrantyQuery;
pub use warranty_query::{
    FixtureWarrantyQuery, GetWarrantyRequest, GetWarrantyResponse, ListWarrantiesRequest,
    ListWarrantiesResponse, WarrantyQuery,
};
#[cfg(test)]
pub use warranty_repository::MockWarrantyRepository;
pub use warranty_repository::{
    FixtureWarrantyRepository, WarrantyListFilter, WarrantyRepository, WarrantyRepositoryError,
};
