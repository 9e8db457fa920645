//! In-memory adapters for the warranty driven ports.
//!
//! These stand in for PostgreSQL in integration tests: the repository
//! enforces serial-number uniqueness and the guarded expiry update, the
//! issuer allocates from an atomic counter, and the publisher records every
//! event for assertions.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    WarrantyExpiredEvent, WarrantyListFilter, WarrantyNotificationError,
    WarrantyNotificationPublisher, WarrantyNumberIssuer, WarrantyNumberIssuerError,
    WarrantyRepository, WarrantyRepositoryError,
};
use crate::domain::{Warranty, WarrantyNumber, WarrantyState};

/// Map-backed warranty repository with a serial-number uniqueness guard.
#[derive(Default)]
pub struct InMemoryWarrantyRepository {
    records: Mutex<Vec<(Uuid, Warranty)>>,
}

impl InMemoryWarrantyRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the stored state of one warranty.
    pub fn stored(&self, warranty_id: Uuid) -> Option<Warranty> {
        self.lock_records()
            .iter()
            .find(|(id, _)| *id == warranty_id)
            .map(|(_, warranty)| warranty.clone())
    }

    fn lock_records(&self) -> MutexGuard<'_, Vec<(Uuid, Warranty)>> {
        match self.records.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("repository mutex"),
        }
    }
}

#[async_trait]
impl WarrantyRepository for InMemoryWarrantyRepository {
    async fn insert(&self, warranty: &Warranty) -> Result<(), WarrantyRepositoryError> {
        let mut records = self.lock_records();
        if records
            .iter()
            .any(|(_, stored)| stored.serial_number() == warranty.serial_number())
        {
            return Err(WarrantyRepositoryError::conflict(format!(
                "serial number {} already registered",
                warranty.serial_number()
            )));
        }
        records.push((warranty.id(), warranty.clone()));
        Ok(())
    }

    async fn update(&self, warranty: &Warranty) -> Result<(), WarrantyRepositoryError> {
        let mut records = self.lock_records();
        let slot = records
            .iter_mut()
            .find(|(id, _)| *id == warranty.id())
            .ok_or_else(|| WarrantyRepositoryError::query("record not found"))?;
        slot.1 = warranty.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        warranty_id: Uuid,
    ) -> Result<Option<Warranty>, WarrantyRepositoryError> {
        Ok(self.stored(warranty_id))
    }

    async fn list(
        &self,
        filter: WarrantyListFilter,
    ) -> Result<Vec<Warranty>, WarrantyRepositoryError> {
        let records = self.lock_records();
        // Insertion order stands in for creation time; newest first.
        Ok(records
            .iter()
            .rev()
            .filter(|(_, warranty)| {
                filter
                    .customer_id
                    .is_none_or(|customer_id| warranty.customer_id() == customer_id)
                    && filter
                        .product_id
                        .is_none_or(|product_id| warranty.product_id() == product_id)
            })
            .map(|(_, warranty)| warranty.clone())
            .collect())
    }

    async fn list_valid_expiring_before(
        &self,
        as_of: NaiveDate,
    ) -> Result<Vec<Warranty>, WarrantyRepositoryError> {
        let records = self.lock_records();
        Ok(records
            .iter()
            .filter(|(_, warranty)| {
                warranty.state() == WarrantyState::Valid && warranty.is_overdue(as_of)
            })
            .map(|(_, warranty)| warranty.clone())
            .collect())
    }

    async fn expire_if_still_overdue(
        &self,
        warranty_id: Uuid,
        as_of: NaiveDate,
    ) -> Result<Option<Warranty>, WarrantyRepositoryError> {
        let mut records = self.lock_records();
        let Some(slot) = records.iter_mut().find(|(id, _)| *id == warranty_id) else {
            return Ok(None);
        };
        if slot.1.state() != WarrantyState::Valid || !slot.1.is_overdue(as_of) {
            return Ok(None);
        }
        slot.1.mark_expired();
        Ok(Some(slot.1.clone()))
    }
}

/// Issuer allocating from an atomic counter, one-based like the SQL adapter.
pub struct CountingWarrantyNumberIssuer {
    last_value: AtomicI64,
    clock: Arc<dyn Clock>,
}

impl CountingWarrantyNumberIssuer {
    /// Create an issuer whose year segment follows `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            last_value: AtomicI64::new(0),
            clock,
        }
    }

    /// The most recently allocated counter value.
    pub fn last_value(&self) -> i64 {
        self.last_value.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WarrantyNumberIssuer for CountingWarrantyNumberIssuer {
    async fn next(&self) -> Result<WarrantyNumber, WarrantyNumberIssuerError> {
        let allocated = self.last_value.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(WarrantyNumber::compose(
            self.clock.utc().year(),
            allocated,
        ))
    }
}

/// Publisher recording every event for later assertions.
#[derive(Default)]
pub struct RecordingWarrantyNotificationPublisher {
    events: Mutex<Vec<WarrantyExpiredEvent>>,
}

impl RecordingWarrantyNotificationPublisher {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the published events in publication order.
    pub fn events(&self) -> Vec<WarrantyExpiredEvent> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => panic!("events mutex"),
        }
    }
}

#[async_trait]
impl WarrantyNotificationPublisher for RecordingWarrantyNotificationPublisher {
    async fn publish_expired(
        &self,
        event: &WarrantyExpiredEvent,
    ) -> Result<(), WarrantyNotificationError> {
        match self.events.lock() {
            Ok(mut guard) => {
                guard.push(event.clone());
                Ok(())
            }
            Err(_) => Err(WarrantyNotificationError::publish("events mutex poisoned")),
        }
    }
}
