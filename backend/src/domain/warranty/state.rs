//! Warranty lifecycle states and their storage text form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of a warranty record.
///
/// There is no terminal state: `Expired` and `Claim` both remain reachable
/// and re-enterable through the transitions on the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WarrantyState {
    /// Freshly created, not yet in force.
    Draft,
    /// In force until the expiration date passes.
    Valid,
    /// Past its expiration date, or explicitly retired.
    Expired,
    /// A claim is being processed for this warranty.
    Claim,
}

impl WarrantyState {
    /// Storage and wire text form of the state.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Valid => "valid",
            Self::Expired => "expired",
            Self::Claim => "claim",
        }
    }
}

impl fmt::Display for WarrantyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a stored value does not name a warranty state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarrantyStateError {
    value: String,
}

impl fmt::Display for ParseWarrantyStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid warranty state", self.value)
    }
}

impl std::error::Error for ParseWarrantyStateError {}

impl FromStr for WarrantyState {
    type Err = ParseWarrantyStateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(Self::Draft),
            "valid" => Ok(Self::Valid),
            "expired" => Ok(Self::Expired),
            "claim" => Ok(Self::Claim),
            other => Err(ParseWarrantyStateError {
                value: other.to_owned(),
            }),
        }
    }
}
