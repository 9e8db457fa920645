//! Driven port for warranty lifecycle event publication.
//!
//! The sweeper emits one event per expired record; rendering and delivery of
//! the resulting notification belong to an external collaborator.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::WarrantyNumber;

use super::define_port_error;

/// Event published when the sweeper expires a warranty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyExpiredEvent {
    /// Identity of the expired record.
    pub warranty_id: Uuid,
    /// Human-readable warranty number for the notification body.
    pub number: WarrantyNumber,
    /// The expiration date that was crossed.
    pub expiration_date: NaiveDate,
}

define_port_error! {
    /// Errors raised by notification publisher adapters.
    pub enum WarrantyNotificationError {
        /// The event could not be handed to the notification collaborator.
        Publish { message: String } =>
            "warranty notification publish failed: {message}",
    }
}

/// Port consuming warranty lifecycle events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarrantyNotificationPublisher: Send + Sync {
    /// Publish one expiration event.
    async fn publish_expired(
        &self,
        event: &WarrantyExpiredEvent,
    ) -> Result<(), WarrantyNotificationError>;
}

/// Publisher that drops every event, for wiring without a consumer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpWarrantyNotificationPublisher;

#[async_trait]
impl WarrantyNotificationPublisher for NoOpWarrantyNotificationPublisher {
    async fn publish_expired(
        &self,
        _event: &WarrantyExpiredEvent,
    ) -> Result<(), WarrantyNotificationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn noop_publisher_accepts_events() {
        let publisher = NoOpWarrantyNotificationPublisher;
        let event = WarrantyExpiredEvent {
            warranty_id: Uuid::new_v4(),
            number: WarrantyNumber::compose(2026, 1),
            expiration_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 1)
                .expect("valid calendar date"),
        };

        publisher
            .publish_expired(&event)
            .await
            .expect("noop publish succeeds");
    }

    #[rstest]
    fn event_serialises_with_camel_case_fields() {
        let event = WarrantyExpiredEvent {
            warranty_id: Uuid::nil(),
            number: WarrantyNumber::compose(2026, 7),
            expiration_date: chrono::NaiveDate::from_ymd_opt(2026, 5, 1)
                .expect("valid calendar date"),
        };

        let encoded = serde_json::to_value(&event).expect("event serialises");
        assert_eq!(encoded["number"], "GAR/2026/00007");
        assert!(encoded.get("expirationDate").is_some());
    }
}
