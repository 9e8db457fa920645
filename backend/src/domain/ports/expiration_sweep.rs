//! Driving port for the scheduled expiration sweep.
//!
//! The scheduler collaborator invokes this port on its own cadence; the
//! domain only exposes the entry point, never the schedule.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Error;

/// Request to sweep overdue `valid` warranties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepRequest {
    /// Warranties expiring strictly before this date are swept.
    pub as_of: NaiveDate,
}

/// One candidate the sweep could not transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepFailure {
    pub warranty_id: Uuid,
    pub message: String,
}

/// Result of one sweep run.
///
/// A re-run immediately after a successful sweep reports zero `expired`
/// records: every transition is guarded by "still valid and still overdue".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepOutcome {
    /// Records transitioned to `expired` by this run.
    pub expired: u64,
    /// Candidates skipped because a concurrent transition won the race.
    pub skipped: u64,
    /// Events whose publication failed; the transitions themselves stand.
    pub notification_failures: u64,
    /// Candidates whose transition failed; the sweep continued past them.
    pub failures: Vec<SweepFailure>,
}

/// Driving port for the expiration sweep.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpirationSweep: Send + Sync {
    /// Expire every `valid` warranty overdue as of the request date.
    async fn sweep(&self, request: SweepRequest) -> Result<SweepOutcome, Error>;
}

/// Fixture sweep implementation reporting an empty run.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureExpirationSweep;

#[async_trait]
impl ExpirationSweep for FixtureExpirationSweep {
    async fn sweep(&self, _request: SweepRequest) -> Result<SweepOutcome, Error> {
        Ok(SweepOutcome::default())
    }
}
