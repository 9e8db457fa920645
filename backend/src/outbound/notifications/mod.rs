//! Outbound adapters for warranty lifecycle events.

mod log_publisher;

pub use log_publisher::LogWarrantyNotificationPublisher;
