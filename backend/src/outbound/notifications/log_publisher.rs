//! Structured-log adapter for the warranty notification port.
//!
//! The notification collaborator owns rendering and delivery; this adapter
//! hands each event to the log pipeline, where downstream shippers pick it
//! up. It never fails, which keeps the sweep's event emission decoupled from
//! any delivery backend.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    WarrantyExpiredEvent, WarrantyNotificationError, WarrantyNotificationPublisher,
};

/// Publisher emitting each expiration event as a structured log record.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogWarrantyNotificationPublisher;

#[async_trait]
impl WarrantyNotificationPublisher for LogWarrantyNotificationPublisher {
    async fn publish_expired(
        &self,
        event: &WarrantyExpiredEvent,
    ) -> Result<(), WarrantyNotificationError> {
        info!(
            warranty_id = %event.warranty_id,
            number = %event.number,
            expiration_date = %event.expiration_date,
            "warranty expired"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::NaiveDate;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;
    use crate::domain::WarrantyNumber;

    #[rstest]
    #[tokio::test]
    async fn log_publisher_never_fails() {
        let publisher = LogWarrantyNotificationPublisher;
        let event = WarrantyExpiredEvent {
            warranty_id: Uuid::new_v4(),
            number: WarrantyNumber::compose(2026, 1),
            expiration_date: NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid calendar date"),
        };

        publisher
            .publish_expired(&event)
            .await
            .expect("log publish succeeds");
    }
}
