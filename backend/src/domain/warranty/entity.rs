//! Warranty entity: derived expiration and named state transitions.

use chrono::{Months, NaiveDate};
use uuid::Uuid;

use super::{WarrantyNumber, WarrantyState, WarrantyValidationError};

/// Input payload for [`Warranty::new`].
#[derive(Debug, Clone)]
pub struct WarrantyDraft {
    pub id: Uuid,
    pub number: WarrantyNumber,
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub serial_number: String,
    pub purchase_date: NaiveDate,
    pub duration_months: u32,
    pub problem_description: Option<String>,
}

/// Input payload for [`Warranty::restore`], rehydrating a stored record.
#[derive(Debug, Clone)]
pub struct RestoredWarranty {
    pub id: Uuid,
    pub number: WarrantyNumber,
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub serial_number: String,
    pub purchase_date: NaiveDate,
    pub duration_months: u32,
    pub state: WarrantyState,
    pub problem_description: Option<String>,
}

/// A warranty record with a derived expiration date and a state machine.
///
/// Fields are private; the state can only change through the named
/// transition methods, and the expiration date is recomputed whenever one of
/// its source fields changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warranty {
    id: Uuid,
    number: WarrantyNumber,
    customer_id: Uuid,
    product_id: Uuid,
    serial_number: String,
    purchase_date: NaiveDate,
    duration_months: u32,
    expiration_date: NaiveDate,
    state: WarrantyState,
    problem_description: Option<String>,
}

/// Calendar-month addition with month-end clamping.
///
/// `2023-01-31 + 1` is `2023-02-28`; `2024-01-31 + 1` is `2024-02-29`.
fn expiration_for(
    purchase_date: NaiveDate,
    duration_months: u32,
) -> Result<NaiveDate, WarrantyValidationError> {
    purchase_date
        .checked_add_months(Months::new(duration_months))
        .ok_or(WarrantyValidationError::ExpirationNotComputable {
            purchase_date,
            duration_months,
        })
}

fn normalise_description(description: Option<String>) -> Option<String> {
    description.filter(|text| !text.trim().is_empty())
}

impl Warranty {
    /// Create a validated warranty in the `Draft` state.
    ///
    /// Rejects purchase dates after `today` and zero durations; computes the
    /// expiration date from the validated source fields.
    pub fn new(draft: WarrantyDraft, today: NaiveDate) -> Result<Self, WarrantyValidationError> {
        if draft.purchase_date > today {
            return Err(WarrantyValidationError::PurchaseDateInFuture {
                purchase_date: draft.purchase_date,
                today,
            });
        }

        Self::restore(RestoredWarranty {
            id: draft.id,
            number: draft.number,
            customer_id: draft.customer_id,
            product_id: draft.product_id,
            serial_number: draft.serial_number,
            purchase_date: draft.purchase_date,
            duration_months: draft.duration_months,
            state: WarrantyState::Draft,
            problem_description: draft.problem_description,
        })
    }

    /// Rehydrate a stored record, re-deriving the expiration date.
    ///
    /// The purchase date is not compared against the current date here: that
    /// invariant binds at creation and amendment time, and a historical row
    /// must load regardless of when it is read.
    pub fn restore(record: RestoredWarranty) -> Result<Self, WarrantyValidationError> {
        if record.serial_number.trim().is_empty() {
            return Err(WarrantyValidationError::BlankSerialNumber);
        }
        if record.duration_months == 0 {
            return Err(WarrantyValidationError::NonPositiveDuration);
        }

        let expiration_date = expiration_for(record.purchase_date, record.duration_months)?;

        Ok(Self {
            id: record.id,
            number: record.number,
            customer_id: record.customer_id,
            product_id: record.product_id,
            serial_number: record.serial_number,
            purchase_date: record.purchase_date,
            duration_months: record.duration_months,
            expiration_date,
            state: record.state,
            problem_description: normalise_description(record.problem_description),
        })
    }

    /// Returns the record identity.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the issuer-assigned warranty number.
    pub fn number(&self) -> &WarrantyNumber {
        &self.number
    }

    /// Returns the owning customer reference.
    pub fn customer_id(&self) -> Uuid {
        self.customer_id
    }

    /// Returns the covered product reference.
    pub fn product_id(&self) -> Uuid {
        self.product_id
    }

    /// Returns the unique product serial number.
    pub fn serial_number(&self) -> &str {
        self.serial_number.as_str()
    }

    /// Returns the purchase date.
    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    /// Returns the coverage duration in months.
    pub fn duration_months(&self) -> u32 {
        self.duration_months
    }

    /// Returns the derived expiration date.
    pub fn expiration_date(&self) -> NaiveDate {
        self.expiration_date
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> WarrantyState {
        self.state
    }

    /// Returns the stored problem description, if any.
    pub fn problem_description(&self) -> Option<&str> {
        self.problem_description.as_deref()
    }

    /// Returns whether the warranty is overdue relative to `as_of`.
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.expiration_date < as_of
    }

    /// Put the warranty in force.
    ///
    /// A record whose expiration date already lies strictly in the past is
    /// moved to `Expired` instead: validation self-corrects rather than
    /// producing a stale `Valid` record or rejecting the request.
    pub fn validate(&mut self, today: NaiveDate) -> WarrantyState {
        self.state = if self.is_overdue(today) {
            WarrantyState::Expired
        } else {
            WarrantyState::Valid
        };
        self.state
    }

    /// Unconditionally mark the warranty as expired.
    pub fn mark_expired(&mut self) {
        self.state = WarrantyState::Expired;
    }

    /// File a claim, replacing the stored description when one is provided.
    ///
    /// Fails when neither the provided nor the stored description carries any
    /// non-whitespace content; the state is untouched on failure.
    pub fn file_claim(
        &mut self,
        problem_description: Option<String>,
    ) -> Result<(), WarrantyValidationError> {
        let description = normalise_description(problem_description)
            .or_else(|| self.problem_description.clone())
            .ok_or(WarrantyValidationError::MissingProblemDescription)?;

        self.problem_description = Some(description);
        self.state = WarrantyState::Claim;
        Ok(())
    }

    /// Unconditionally return the warranty to `Draft`.
    pub fn reset_to_draft(&mut self) {
        self.state = WarrantyState::Draft;
    }

    /// Amend the coverage terms, re-deriving the expiration date.
    ///
    /// `None` leaves the corresponding field unchanged. Either amendment
    /// re-checks the relevant invariant; no field changes on failure.
    pub fn amend_terms(
        &mut self,
        purchase_date: Option<NaiveDate>,
        duration_months: Option<u32>,
        today: NaiveDate,
    ) -> Result<(), WarrantyValidationError> {
        let next_purchase_date = purchase_date.unwrap_or(self.purchase_date);
        let next_duration = duration_months.unwrap_or(self.duration_months);

        if next_purchase_date > today {
            return Err(WarrantyValidationError::PurchaseDateInFuture {
                purchase_date: next_purchase_date,
                today,
            });
        }
        if next_duration == 0 {
            return Err(WarrantyValidationError::NonPositiveDuration);
        }

        self.expiration_date = expiration_for(next_purchase_date, next_duration)?;
        self.purchase_date = next_purchase_date;
        self.duration_months = next_duration;
        Ok(())
    }
}
