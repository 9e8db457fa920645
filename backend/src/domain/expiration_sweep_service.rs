//! Domain service advancing time-dependent warranty state.
//!
//! The sweep selects overdue `valid` records and expires each one through a
//! guarded conditional update, so it never overwrites a concurrent manual
//! transition and re-running it immediately transitions nothing. Per-record
//! failures are isolated: one broken record never aborts the batch.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::Error;
use crate::domain::ports::{
    ExpirationSweep, SweepFailure, SweepOutcome, SweepRequest, WarrantyExpiredEvent,
    WarrantyNotificationPublisher, WarrantyRepository,
};
use crate::domain::warranty_service::map_repository_error;

/// Sweep service implementing the [`ExpirationSweep`] driving port.
#[derive(Clone)]
pub struct ExpirationSweepService<R, N> {
    warranty_repo: Arc<R>,
    notifications: Arc<N>,
}

impl<R, N> ExpirationSweepService<R, N>
where
    R: WarrantyRepository,
    N: WarrantyNotificationPublisher,
{
    /// Create a new sweep service over the repository and event publisher.
    pub fn new(warranty_repo: Arc<R>, notifications: Arc<N>) -> Self {
        Self {
            warranty_repo,
            notifications,
        }
    }

    async fn publish_expired(&self, event: WarrantyExpiredEvent, outcome: &mut SweepOutcome) {
        if let Err(error) = self.notifications.publish_expired(&event).await {
            // The transition is already committed; delivery is best-effort.
            warn!(
                warranty_id = %event.warranty_id,
                error = %error,
                "warranty expiration event publication failed"
            );
            outcome.notification_failures += 1;
        }
    }
}

#[async_trait]
impl<R, N> ExpirationSweep for ExpirationSweepService<R, N>
where
    R: WarrantyRepository,
    N: WarrantyNotificationPublisher,
{
    async fn sweep(&self, request: SweepRequest) -> Result<SweepOutcome, Error> {
        let candidates = self
            .warranty_repo
            .list_valid_expiring_before(request.as_of)
            .await
            .map_err(map_repository_error)?;

        let mut outcome = SweepOutcome::default();
        for candidate in candidates {
            match self
                .warranty_repo
                .expire_if_still_overdue(candidate.id(), request.as_of)
                .await
            {
                Ok(Some(expired)) => {
                    outcome.expired += 1;
                    self.publish_expired(
                        WarrantyExpiredEvent {
                            warranty_id: expired.id(),
                            number: expired.number().clone(),
                            expiration_date: expired.expiration_date(),
                        },
                        &mut outcome,
                    )
                    .await;
                }
                Ok(None) => {
                    // A concurrent manual transition won the race.
                    outcome.skipped += 1;
                }
                Err(error) => {
                    warn!(
                        warranty_id = %candidate.id(),
                        error = %error,
                        "warranty expiration sweep failed for record"
                    );
                    outcome.failures.push(SweepFailure {
                        warranty_id: candidate.id(),
                        message: error.to_string(),
                    });
                }
            }
        }

        info!(
            as_of = %request.as_of,
            expired = outcome.expired,
            skipped = outcome.skipped,
            failed = outcome.failures.len(),
            "warranty expiration sweep completed"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "expiration_sweep_service_tests.rs"]
mod tests;
