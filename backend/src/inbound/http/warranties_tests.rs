//! Tests for warranty HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::NaiveDate;
use mockable::DefaultClock;
use serde_json::Value;
use uuid::Uuid;

use super::*;
use crate::domain::WarrantyNumber;
use crate::domain::ports::{
    FixtureExpirationSweep, FixtureWarrantyCommand, FixtureWarrantyQuery, MockWarrantyCommand,
    MockWarrantyQuery, WarrantyCommand, WarrantyQuery,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

fn sample_payload() -> WarrantyPayload {
    WarrantyPayload {
        id: Uuid::from_u128(0x5001),
        number: WarrantyNumber::compose(2026, 42),
        customer_id: Uuid::from_u128(0x5002),
        product_id: Uuid::from_u128(0x5003),
        serial_number: "SN-0042".to_owned(),
        purchase_date: date(2026, 3, 15),
        duration_months: 12,
        expiration_date: date(2027, 3, 15),
        state: WarrantyState::Draft,
        problem_description: None,
    }
}

fn state_with(
    warranties: Arc<dyn WarrantyCommand>,
    warranties_query: Arc<dyn WarrantyQuery>,
) -> HttpState {
    HttpState::new(
        warranties,
        warranties_query,
        Arc::new(FixtureExpirationSweep),
        Arc::new(DefaultClock),
    )
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .service(create_warranty)
            .service(list_warranties)
            .service(get_warranty)
            .service(validate_warranty)
            .service(expire_warranty)
            .service(file_warranty_claim)
            .service(reset_warranty)
            .service(amend_warranty_terms),
    )
}

fn sample_create_body() -> Value {
    serde_json::json!({
        "customerId": "00000000-0000-0000-0000-000000005002",
        "productId": "00000000-0000-0000-0000-000000005003",
        "serialNumber": "SN-0042",
        "purchaseDate": "2026-03-15"
    })
}

#[actix_rt::test]
async fn create_warranty_returns_the_registered_record() {
    let mut command = MockWarrantyCommand::new();
    command
        .expect_create_warranty()
        .withf(|request| request.duration_months == 12 && request.serial_number == "SN-0042")
        .times(1)
        .return_once(|_| {
            Ok(WarrantyResponse {
                warranty: sample_payload(),
            })
        });

    let app = actix_test::init_service(test_app(state_with(
        Arc::new(command),
        Arc::new(FixtureWarrantyQuery),
    )))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/warranties")
        .set_json(sample_create_body())
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["number"], "GAR/2026/00042");
    assert_eq!(body["state"], "draft");
    assert_eq!(body["expirationDate"], "2027-03-15");
}

#[actix_rt::test]
async fn create_warranty_forwards_explicit_duration() {
    let mut command = MockWarrantyCommand::new();
    command
        .expect_create_warranty()
        .withf(|request| request.duration_months == 24)
        .times(1)
        .return_once(|_| {
            Ok(WarrantyResponse {
                warranty: sample_payload(),
            })
        });

    let app = actix_test::init_service(test_app(state_with(
        Arc::new(command),
        Arc::new(FixtureWarrantyQuery),
    )))
    .await;

    let mut body = sample_create_body();
    body["durationMonths"] = serde_json::json!(24);
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/warranties")
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn create_warranty_rejects_malformed_customer_id() {
    let app = actix_test::init_service(test_app(state_with(
        Arc::new(FixtureWarrantyCommand),
        Arc::new(FixtureWarrantyQuery),
    )))
    .await;

    let mut body = sample_create_body();
    body["customerId"] = serde_json::json!("not-a-uuid");
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/warranties")
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_input");
    assert_eq!(body["details"]["field"], "customerId");
}

#[actix_rt::test]
async fn create_warranty_rejects_malformed_purchase_date() {
    let app = actix_test::init_service(test_app(state_with(
        Arc::new(FixtureWarrantyCommand),
        Arc::new(FixtureWarrantyQuery),
    )))
    .await;

    let mut body = sample_create_body();
    body["purchaseDate"] = serde_json::json!("15/03/2026");
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/warranties")
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_date");
}

#[actix_rt::test]
async fn get_warranty_reports_missing_records() {
    let app = actix_test::init_service(test_app(state_with(
        Arc::new(FixtureWarrantyCommand),
        Arc::new(FixtureWarrantyQuery),
    )))
    .await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/warranties/00000000-0000-0000-0000-000000005001")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn list_warranties_passes_parsed_filters() {
    let customer_id = Uuid::from_u128(0x5002);

    let mut query = MockWarrantyQuery::new();
    query
        .expect_list_warranties()
        .withf(move |request| {
            request.customer_id == Some(customer_id) && request.product_id.is_none()
        })
        .times(1)
        .return_once(|_| {
            Ok(crate::domain::ports::ListWarrantiesResponse {
                warranties: vec![sample_payload()],
            })
        });

    let app = actix_test::init_service(test_app(state_with(
        Arc::new(FixtureWarrantyCommand),
        Arc::new(query),
    )))
    .await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/warranties?customerId=00000000-0000-0000-0000-000000005002")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["warranties"]
            .as_array()
            .expect("warranties array")
            .len(),
        1
    );
}

#[actix_rt::test]
async fn claim_without_description_maps_to_bad_request() {
    let mut command = MockWarrantyCommand::new();
    command
        .expect_file_claim()
        .times(1)
        .return_once(|_| Err(Error::invalid_input("describe the problem before filing a claim")));

    let app = actix_test::init_service(test_app(state_with(
        Arc::new(command),
        Arc::new(FixtureWarrantyQuery),
    )))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/warranties/00000000-0000-0000-0000-000000005001/claim")
        .set_json(serde_json::json!({}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn validate_returns_post_transition_state() {
    let mut command = MockWarrantyCommand::new();
    command
        .expect_validate_warranty()
        .times(1)
        .return_once(|_| {
            let mut payload = sample_payload();
            payload.state = WarrantyState::Valid;
            Ok(WarrantyResponse { warranty: payload })
        });

    let app = actix_test::init_service(test_app(state_with(
        Arc::new(command),
        Arc::new(FixtureWarrantyQuery),
    )))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/warranties/00000000-0000-0000-0000-000000005001/validate")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["state"], "valid");
}

#[actix_rt::test]
async fn amend_terms_parses_optional_fields() {
    let mut command = MockWarrantyCommand::new();
    command
        .expect_amend_terms()
        .withf(|request| {
            request.purchase_date == Some(date(2026, 1, 31)) && request.duration_months.is_none()
        })
        .times(1)
        .return_once(|_| {
            Ok(WarrantyResponse {
                warranty: sample_payload(),
            })
        });

    let app = actix_test::init_service(test_app(state_with(
        Arc::new(command),
        Arc::new(FixtureWarrantyQuery),
    )))
    .await;

    let request = actix_test::TestRequest::patch()
        .uri("/api/v1/warranties/00000000-0000-0000-0000-000000005001/terms")
        .set_json(serde_json::json!({ "purchaseDate": "2026-01-31" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}
