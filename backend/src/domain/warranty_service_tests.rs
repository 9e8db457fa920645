//! Tests for the warranty command and query services.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{
    MockWarrantyNumberIssuer, MockWarrantyRepository, WarrantyRepositoryError,
};
use crate::domain::{ErrorCode, WarrantyNumber, WarrantyState};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Clock pinned to 2026-04-01.
fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: Utc
            .with_ymd_and_hms(2026, 4, 1, 10, 0, 0)
            .single()
            .expect("valid fixture timestamp"),
    })
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

fn sample_create_request() -> CreateWarrantyRequest {
    CreateWarrantyRequest {
        customer_id: Uuid::new_v4(),
        product_id: Uuid::new_v4(),
        serial_number: "SN-0001".to_owned(),
        purchase_date: date(2026, 3, 15),
        duration_months: 12,
        problem_description: None,
    }
}

fn sample_warranty(purchase_date: NaiveDate, duration_months: u32) -> Warranty {
    Warranty::new(
        WarrantyDraft {
            id: Uuid::new_v4(),
            number: WarrantyNumber::compose(2026, 7),
            customer_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            serial_number: "SN-0007".to_owned(),
            purchase_date,
            duration_months,
            problem_description: None,
        },
        purchase_date,
    )
    .expect("valid warranty")
}

fn issuer_returning(number: WarrantyNumber) -> MockWarrantyNumberIssuer {
    let mut issuer = MockWarrantyNumberIssuer::new();
    issuer
        .expect_next()
        .times(1)
        .return_once(move || Ok(number));
    issuer
}

fn command_service(
    repo: MockWarrantyRepository,
    issuer: MockWarrantyNumberIssuer,
) -> WarrantyCommandService<MockWarrantyRepository, MockWarrantyNumberIssuer> {
    WarrantyCommandService::new(Arc::new(repo), Arc::new(issuer), fixture_clock())
}

#[tokio::test]
async fn create_warranty_persists_a_numbered_draft() {
    let mut repo = MockWarrantyRepository::new();
    repo.expect_insert().times(1).return_once(|_| Ok(()));
    let issuer = issuer_returning(WarrantyNumber::compose(2026, 42));

    let service = command_service(repo, issuer);
    let response = service
        .create_warranty(sample_create_request())
        .await
        .expect("create succeeds");

    assert_eq!(response.warranty.number.as_str(), "GAR/2026/00042");
    assert_eq!(response.warranty.state, WarrantyState::Draft);
    assert_eq!(response.warranty.expiration_date, date(2027, 3, 15));
}

#[tokio::test]
async fn create_warranty_rejects_future_purchase_date() {
    let mut repo = MockWarrantyRepository::new();
    repo.expect_insert().times(0);
    // The number is allocated before validation; an aborted create leaves an
    // acceptable gap in the sequence.
    let issuer = issuer_returning(WarrantyNumber::compose(2026, 43));

    let service = command_service(repo, issuer);
    let mut request = sample_create_request();
    request.purchase_date = date(2026, 4, 2);

    let error = service
        .create_warranty(request)
        .await
        .expect_err("future purchase date rejected");

    assert_eq!(error.code(), ErrorCode::InvalidInput);
}

#[tokio::test]
async fn create_warranty_rejects_zero_duration() {
    let mut repo = MockWarrantyRepository::new();
    repo.expect_insert().times(0);
    let issuer = issuer_returning(WarrantyNumber::compose(2026, 44));

    let service = command_service(repo, issuer);
    let mut request = sample_create_request();
    request.duration_months = 0;

    let error = service
        .create_warranty(request)
        .await
        .expect_err("zero duration rejected");

    assert_eq!(error.code(), ErrorCode::InvalidInput);
}

#[tokio::test]
async fn create_warranty_maps_duplicate_serial_to_conflict() {
    let mut repo = MockWarrantyRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(WarrantyRepositoryError::conflict("duplicate key")));
    let issuer = issuer_returning(WarrantyNumber::compose(2026, 45));

    let service = command_service(repo, issuer);
    let error = service
        .create_warranty(sample_create_request())
        .await
        .expect_err("duplicate serial rejected");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn create_warranty_maps_issuer_outage_to_service_unavailable() {
    let mut repo = MockWarrantyRepository::new();
    repo.expect_insert().times(0);
    let mut issuer = MockWarrantyNumberIssuer::new();
    issuer
        .expect_next()
        .times(1)
        .return_once(|| Err(WarrantyNumberIssuerError::connection("pool unavailable")));

    let service = command_service(repo, issuer);
    let error = service
        .create_warranty(sample_create_request())
        .await
        .expect_err("issuer outage surfaces");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn validate_warranty_puts_current_record_in_force() {
    let warranty = sample_warranty(date(2026, 3, 15), 12);
    let warranty_id = warranty.id();

    let mut repo = MockWarrantyRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(warranty)));
    repo.expect_update().times(1).return_once(|_| Ok(()));

    let service = command_service(repo, MockWarrantyNumberIssuer::new());
    let response = service
        .validate_warranty(ValidateWarrantyRequest { warranty_id })
        .await
        .expect("validate succeeds");

    assert_eq!(response.warranty.state, WarrantyState::Valid);
}

#[tokio::test]
async fn validate_warranty_self_corrects_overdue_record_to_expired() {
    // Expired 2025-07-10, well before the fixture clock's 2026-04-01.
    let warranty = sample_warranty(date(2025, 1, 10), 6);
    let warranty_id = warranty.id();

    let mut repo = MockWarrantyRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(warranty)));
    repo.expect_update().times(1).return_once(|_| Ok(()));

    let service = command_service(repo, MockWarrantyNumberIssuer::new());
    let response = service
        .validate_warranty(ValidateWarrantyRequest { warranty_id })
        .await
        .expect("validate succeeds");

    assert_eq!(response.warranty.state, WarrantyState::Expired);
}

#[tokio::test]
async fn validate_warranty_reports_missing_record() {
    let mut repo = MockWarrantyRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let service = command_service(repo, MockWarrantyNumberIssuer::new());
    let error = service
        .validate_warranty(ValidateWarrantyRequest {
            warranty_id: Uuid::new_v4(),
        })
        .await
        .expect_err("missing record");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn file_claim_without_description_is_rejected_before_persisting() {
    let warranty = sample_warranty(date(2026, 3, 15), 12);
    let warranty_id = warranty.id();

    let mut repo = MockWarrantyRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(warranty)));
    repo.expect_update().times(0);

    let service = command_service(repo, MockWarrantyNumberIssuer::new());
    let error = service
        .file_claim(FileWarrantyClaimRequest {
            warranty_id,
            problem_description: None,
        })
        .await
        .expect_err("claim without description rejected");

    assert_eq!(error.code(), ErrorCode::InvalidInput);
}

#[tokio::test]
async fn file_claim_with_description_transitions_to_claim() {
    let warranty = sample_warranty(date(2026, 3, 15), 12);
    let warranty_id = warranty.id();

    let mut repo = MockWarrantyRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(warranty)));
    repo.expect_update().times(1).return_once(|_| Ok(()));

    let service = command_service(repo, MockWarrantyNumberIssuer::new());
    let response = service
        .file_claim(FileWarrantyClaimRequest {
            warranty_id,
            problem_description: Some("broken screen".to_owned()),
        })
        .await
        .expect("claim succeeds");

    assert_eq!(response.warranty.state, WarrantyState::Claim);
    assert_eq!(
        response.warranty.problem_description.as_deref(),
        Some("broken screen")
    );
}

#[tokio::test]
async fn mark_expired_and_reset_round_trip() {
    let warranty = sample_warranty(date(2026, 3, 15), 12);
    let warranty_id = warranty.id();
    let reloaded = warranty.clone();

    let mut repo = MockWarrantyRepository::new();
    let mut sequence = mockall::Sequence::new();
    repo.expect_find_by_id()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(move |_| Ok(Some(warranty)));
    repo.expect_update()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|_| Ok(()));
    repo.expect_find_by_id()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(move |_| Ok(Some(reloaded)));
    repo.expect_update()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|_| Ok(()));

    let service = command_service(repo, MockWarrantyNumberIssuer::new());

    let expired = service
        .mark_expired(MarkWarrantyExpiredRequest { warranty_id })
        .await
        .expect("mark expired succeeds");
    assert_eq!(expired.warranty.state, WarrantyState::Expired);

    let reset = service
        .reset_to_draft(ResetWarrantyRequest { warranty_id })
        .await
        .expect("reset succeeds");
    assert_eq!(reset.warranty.state, WarrantyState::Draft);
}

#[tokio::test]
async fn amend_terms_recomputes_expiration() {
    let warranty = sample_warranty(date(2026, 3, 15), 12);
    let warranty_id = warranty.id();

    let mut repo = MockWarrantyRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(warranty)));
    repo.expect_update().times(1).return_once(|_| Ok(()));

    let service = command_service(repo, MockWarrantyNumberIssuer::new());
    let response = service
        .amend_terms(AmendWarrantyTermsRequest {
            warranty_id,
            purchase_date: Some(date(2026, 1, 31)),
            duration_months: Some(1),
        })
        .await
        .expect("amendment succeeds");

    assert_eq!(response.warranty.expiration_date, date(2026, 2, 28));
}

#[tokio::test]
async fn amend_terms_rejects_future_purchase_date() {
    let warranty = sample_warranty(date(2026, 3, 15), 12);
    let warranty_id = warranty.id();

    let mut repo = MockWarrantyRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(warranty)));
    repo.expect_update().times(0);

    let service = command_service(repo, MockWarrantyNumberIssuer::new());
    let error = service
        .amend_terms(AmendWarrantyTermsRequest {
            warranty_id,
            purchase_date: Some(date(2026, 4, 2)),
            duration_months: None,
        })
        .await
        .expect_err("future purchase date rejected");

    assert_eq!(error.code(), ErrorCode::InvalidInput);
}

#[tokio::test]
async fn get_warranty_returns_not_found_when_missing() {
    let mut repo = MockWarrantyRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let service = WarrantyQueryService::new(Arc::new(repo));
    let error = service
        .get_warranty(GetWarrantyRequest {
            warranty_id: Uuid::new_v4(),
        })
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn list_warranties_passes_filter_and_returns_payloads() {
    let customer_id = Uuid::new_v4();
    let warranty = sample_warranty(date(2026, 3, 15), 12);

    let mut repo = MockWarrantyRepository::new();
    repo.expect_list()
        .times(1)
        .withf(move |filter| filter.customer_id == Some(customer_id) && filter.product_id.is_none())
        .return_once(move |_| Ok(vec![warranty]));

    let service = WarrantyQueryService::new(Arc::new(repo));
    let response = service
        .list_warranties(ListWarrantiesRequest {
            customer_id: Some(customer_id),
            product_id: None,
        })
        .await
        .expect("list succeeds");

    assert_eq!(response.warranties.len(), 1);
}

#[tokio::test]
async fn list_warranties_maps_connection_error_to_service_unavailable() {
    let mut repo = MockWarrantyRepository::new();
    repo.expect_list()
        .times(1)
        .return_once(|_| Err(WarrantyRepositoryError::connection("pool unavailable")));

    let service = WarrantyQueryService::new(Arc::new(repo));
    let error = service
        .list_warranties(ListWarrantiesRequest::default())
        .await
        .expect_err("service unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
