//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{ExpirationSweep, WarrantyCommand, WarrantyQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Warranty write operations.
    pub warranties: Arc<dyn WarrantyCommand>,
    /// Warranty read operations.
    pub warranties_query: Arc<dyn WarrantyQuery>,
    /// The expiration sweep entry point.
    pub sweep: Arc<dyn ExpirationSweep>,
    /// Clock supplying the default sweep date.
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Construct state from the port implementations.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use warranty_backend::domain::ports::{
    ///     FixtureExpirationSweep, FixtureWarrantyCommand, FixtureWarrantyQuery,
    /// };
    /// use warranty_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureWarrantyCommand),
    ///     Arc::new(FixtureWarrantyQuery),
    ///     Arc::new(FixtureExpirationSweep),
    ///     Arc::new(DefaultClock),
    /// );
    /// let _warranties = state.warranties.clone();
    /// ```
    pub fn new(
        warranties: Arc<dyn WarrantyCommand>,
        warranties_query: Arc<dyn WarrantyQuery>,
        sweep: Arc<dyn ExpirationSweep>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            warranties,
            warranties_query,
            sweep,
            clock,
        }
    }
}
