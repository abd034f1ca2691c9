use amadeus_enterprise_rest::{
    AmadeusConfig, CardBrand, CommissionType, Currency, DocumentType, FlightApi, FlightSdk, Gender,
    PaymentData, PaymentMethod, ReservePax, SdkError, SdkOptions, SearchAvailabilityItinerary,
    SearchAvailabilityPax, TravelerType,
};
use anyhow::Result;
use httpmock::prelude::*;
use httpmock::Mock;
use httpmock::Method::PATCH;
use serde_json::json;

const TOKEN: &str = "test_access_token_123";
const BEARER: &str = "Bearer test_access_token_123";
const BOOKING_ID: &str = "eJzTd9d39PYzCwoBAAsAAlw";

fn sdk_for(server: &MockServer) -> FlightSdk {
    let config = AmadeusConfig::new(server.base_url(), "flight_client", "secret_123");
    let options = SdkOptions::default()
        .with_prefix_ama_ref("CLT")
        .with_suffix_ama_ref("user1")
        .with_currency(Currency::Jmd)
        .with_debug(true);
    FlightSdk::new(config, options).expect("sdk should build")
}

async fn mock_login(server: &MockServer) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/security/oauth2/token")
                .header("content-type", "application/x-www-form-urlencoded")
                .body_contains("grant_type=client_credentials")
                .body_contains("client_id=flight_client")
                .body_contains("client_secret=secret_123");
            then.status(200).json_body(json!({
                "type": "amadeusOAuth2Token",
                "token_type": "Bearer",
                "access_token": TOKEN,
                "expires_in": 1799,
                "state": "approved"
            }));
        })
        .await
}

fn traveler() -> ReservePax {
    ReservePax {
        id: "1".to_string(),
        date_of_birth: "1992-12-28".to_string(),
        first_name: "Jose Angel".to_string(),
        last_name: "Alvarez Abraira".to_string(),
        gender: Gender::Male,
        email: "jose@example.com".to_string(),
        phone_country_code: "34".to_string(),
        phone_number: "600000000".to_string(),
        document_type: DocumentType::Passport,
        document_number: "K111111".to_string(),
        document_issuance_date: "2024-05-01".to_string(),
        document_expiry_date: "2026-05-01".to_string(),
        document_issuance_country_code: "CU".to_string(),
        nationality_code: "CU".to_string(),
    }
}

/// 搜尋航班：先登入，再帶 Bearer token 送出搜尋 payload
#[tokio::test]
async fn test_search_availability_logs_in_and_posts_payload() -> Result<()> {
    let server = MockServer::start_async().await;
    let login_mock = mock_login(&server).await;

    let search_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v2/shopping/flight-offers")
                .header("authorization", BEARER)
                .header("content-type", "application/json")
                .header_exists("ama-client-ref")
                .json_body_partial(
                    r#"{
                        "currencyCode": "JMD",
                        "originDestinations": [
                            {"id": "1", "originLocationCode": "BOG", "destinationLocationCode": "MIA", "departureDateTimeRange": {"date": "2026-02-10"}},
                            {"id": "2", "originLocationCode": "MIA", "destinationLocationCode": "BOG", "departureDateTimeRange": {"date": "2026-02-20"}}
                        ],
                        "sources": ["GDS"],
                        "searchCriteria": {
                            "flightFilters": {"carrierRestrictions": {"includedCarrierCodes": ["CM"]}}
                        }
                    }"#,
                );
            then.status(200).json_body(json!({
                "meta": {"count": 1},
                "data": [{"type": "flight-offer", "id": "1", "source": "GDS"}]
            }));
        })
        .await;

    let sdk = sdk_for(&server);
    let itinerary = vec![
        SearchAvailabilityItinerary::new("1", "BOG", "MIA", "2026-02-10"),
        SearchAvailabilityItinerary::new("2", "MIA", "BOG", "2026-02-20"),
    ];
    let travelers = vec![SearchAvailabilityPax::new("1", TravelerType::Adult)];
    let carriers = vec!["CM".to_string()];

    let response = sdk
        .search_availability(&itinerary, &travelers, Some(&carriers))
        .await?;

    login_mock.assert_async().await;
    search_mock.assert_async().await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body["data"][0]["id"], "1");
    assert_eq!(sdk.access_token().as_deref(), Some(TOKEN));

    Ok(())
}

/// 每次操作都會重新登入一次
#[tokio::test]
async fn test_every_call_logs_in_again() -> Result<()> {
    let server = MockServer::start_async().await;
    let login_mock = mock_login(&server).await;

    let retrieve_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/v1/booking/flight-orders/{}", BOOKING_ID))
                .header("authorization", BEARER);
            then.status(200)
                .json_body(json!({"data": {"type": "flight-order", "id": BOOKING_ID}}));
        })
        .await;

    let sdk = sdk_for(&server);
    sdk.retrieve_by_booking_id(BOOKING_ID).await?;
    let response = sdk.retrieve_by_booking_id(BOOKING_ID).await?;

    login_mock.assert_hits_async(2).await;
    retrieve_mock.assert_hits_async(2).await;
    assert_eq!(response.data().unwrap()["id"], BOOKING_ID);

    Ok(())
}

#[tokio::test]
async fn test_pricing_with_credit_card() -> Result<()> {
    let server = MockServer::start_async().await;
    mock_login(&server).await;

    let pricing_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/shopping/flight-offers/pricing")
                .header("authorization", BEARER)
                .json_body_partial(
                    r#"{
                        "data": {
                            "type": "flight-offers-pricing",
                            "flightOffers": [{"type": "flight-offer", "id": "1"}],
                            "payments": [{"brand": "AMERICAN_EXPRESS", "flightOfferIds": ["1"]}]
                        }
                    }"#,
                );
            then.status(200).json_body(json!({
                "data": {
                    "type": "flight-offers-pricing",
                    "flightOffers": [{"type": "flight-offer", "id": "1", "price": {"total": "543.20"}}]
                }
            }));
        })
        .await;

    let sdk = sdk_for(&server);
    let offer = json!({"type": "flight-offer", "id": "1"});
    let response = sdk
        .pricing(&offer, PaymentMethod::CreditCard, Some(CardBrand::AmericanExpress))
        .await?;

    pricing_mock.assert_async().await;
    assert!(response.is_success());
    assert_eq!(
        response.body["data"]["flightOffers"][0]["price"]["total"],
        "543.20"
    );

    Ok(())
}

#[tokio::test]
async fn test_reserve_with_cash() -> Result<()> {
    let server = MockServer::start_async().await;
    mock_login(&server).await;

    let reserve_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/booking/flight-orders")
                .header("authorization", BEARER)
                .json_body_partial(
                    r#"{
                        "data": {
                            "type": "flight-order",
                            "formOfPayments": [{"other": {"method": "CASH", "flightOfferIds": ["1"]}}]
                        }
                    }"#,
                );
            then.status(201).json_body(json!({
                "data": {
                    "type": "flight-order",
                    "id": BOOKING_ID,
                    "associatedRecords": [{"reference": "AKODEY", "originSystemCode": "GDS"}]
                }
            }));
        })
        .await;

    let sdk = sdk_for(&server);
    let offer = json!({"type": "flight-offer", "id": "1"});
    let travelers = vec![traveler()];

    let response = sdk
        .reserve(&offer, PaymentMethod::Cash, &travelers, None)
        .await?;

    reserve_mock.assert_async().await;
    assert_eq!(response.status, 201);
    assert_eq!(response.body["data"]["associatedRecords"][0]["reference"], "AKODEY");

    Ok(())
}

#[tokio::test]
async fn test_reserve_with_credit_card() -> Result<()> {
    let server = MockServer::start_async().await;
    mock_login(&server).await;

    let reserve_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/booking/flight-orders")
                .json_body_partial(
                    r#"{
                        "data": {
                            "travelers": [{
                                "id": "1",
                                "name": {"firstName": "Jose Angel", "lastName": "Alvarez Abraira"},
                                "documents": [{"documentType": "PASSPORT", "number": "K111111", "holder": true}]
                            }],
                            "formOfPayments": [{"creditCard": {
                                "brand": "AMERICAN_EXPRESS",
                                "holder": "CORPORATE",
                                "number": "370000000000002",
                                "expiryDate": "2030-03",
                                "securityCode": "1234",
                                "flightOfferIds": ["1"]
                            }}]
                        }
                    }"#,
                );
            then.status(201)
                .json_body(json!({"data": {"type": "flight-order", "id": BOOKING_ID}}));
        })
        .await;

    let sdk = sdk_for(&server);
    let offer = json!({"type": "flight-offer", "id": "1"});
    let travelers = vec![traveler()];
    let card = PaymentData {
        brand: Some(CardBrand::AmericanExpress),
        holder: Some("CORPORATE".to_string()),
        number: Some("370000000000002".to_string()),
        expiry_date: Some("2030-03".to_string()),
        security_code: Some("1234".to_string()),
    };

    let response = sdk
        .reserve(&offer, PaymentMethod::CreditCard, &travelers, Some(&card))
        .await?;

    reserve_mock.assert_async().await;
    assert_eq!(response.body["data"]["id"], BOOKING_ID);

    Ok(())
}

#[tokio::test]
async fn test_retrieve_by_locator_sends_reference_query() -> Result<()> {
    let server = MockServer::start_async().await;
    mock_login(&server).await;

    let locator_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/booking/flight-orders/by-reference")
                .query_param("reference", "AKODEY")
                .query_param("originSystemCode", "GDS")
                .header("authorization", BEARER);
            then.status(200)
                .json_body(json!({"data": [{"type": "flight-order", "id": BOOKING_ID}]}));
        })
        .await;

    let sdk = sdk_for(&server);
    let response = sdk.retrieve_by_locator("AKODEY").await?;

    locator_mock.assert_async().await;
    assert_eq!(response.body["data"][0]["id"], BOOKING_ID);

    Ok(())
}

/// 依訂位代號取回後再開票
#[tokio::test]
async fn test_retrieve_then_issue() -> Result<()> {
    let server = MockServer::start_async().await;
    let login_mock = mock_login(&server).await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/booking/flight-orders/by-reference");
            then.status(200)
                .json_body(json!({"data": [{"type": "flight-order", "id": BOOKING_ID}]}));
        })
        .await;

    let issue_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/v1/booking/flight-orders/{}/issuance", BOOKING_ID))
                .header("authorization", BEARER);
            then.status(200).json_body(json!({
                "data": {"type": "flight-order", "id": BOOKING_ID, "tickets": [{"documentNumber": "2302345678901"}]}
            }));
        })
        .await;

    let sdk = sdk_for(&server);
    let retrieved = sdk.retrieve_by_locator("AKODEY").await?;
    assert_eq!(retrieved.status, 200);

    let booking_id = retrieved.body["data"][0]["id"].as_str().unwrap().to_string();
    let issued = sdk.issue_booking(&booking_id).await?;

    login_mock.assert_hits_async(2).await;
    issue_mock.assert_async().await;
    assert_eq!(issued.body["data"]["tickets"][0]["documentNumber"], "2302345678901");

    Ok(())
}

#[tokio::test]
async fn test_cancel_booking_no_content() -> Result<()> {
    let server = MockServer::start_async().await;
    mock_login(&server).await;

    let cancel_mock = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path(format!("/v1/booking/flight-orders/{}", BOOKING_ID))
                .header("authorization", BEARER);
            then.status(204);
        })
        .await;

    let sdk = sdk_for(&server);
    let response = sdk.cancel_booking(BOOKING_ID).await?;

    cancel_mock.assert_async().await;
    assert_eq!(response.status, 204);
    assert_eq!(response.body, json!({}));
    assert!(response.is_success());

    Ok(())
}

#[tokio::test]
async fn test_retrieve_by_booking_id() -> Result<()> {
    let server = MockServer::start_async().await;
    mock_login(&server).await;

    let retrieve_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/v1/booking/flight-orders/{}", BOOKING_ID))
                .header("authorization", BEARER)
                .header_exists("ama-client-ref");
            then.status(200).json_body(json!({
                "data": {"type": "flight-order", "id": BOOKING_ID}
            }));
        })
        .await;

    let sdk = sdk_for(&server);
    let response = sdk.retrieve_by_booking_id(BOOKING_ID).await?;

    retrieve_mock.assert_async().await;
    assert_eq!(response.data().and_then(|d| d["id"].as_str()), Some(BOOKING_ID));

    Ok(())
}

#[tokio::test]
async fn test_fm_commission_booking_patch() -> Result<()> {
    let server = MockServer::start_async().await;
    mock_login(&server).await;

    let commission_mock = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path(format!("/v1/booking/flight-orders/{}", BOOKING_ID))
                .header("authorization", BEARER)
                .header("content-type", "application/json")
                .json_body(json!({
                    "data": {
                        "type": "flight-order",
                        "commissions": [{
                            "controls": ["MANUAL"],
                            "values": [{"commissionType": "NEW", "percentage": 5.0}]
                        }]
                    }
                }));
            then.status(200)
                .json_body(json!({"data": {"type": "flight-order", "id": BOOKING_ID}}));
        })
        .await;

    let sdk = sdk_for(&server);
    let response = sdk
        .fm_commission_booking(BOOKING_ID, CommissionType::Percentage, 5.0)
        .await?;

    commission_mock.assert_async().await;
    assert_eq!(response.status, 200);

    Ok(())
}

/// 供應商回傳 4xx 時仍回傳狀態碼與內容，由呼叫端決定如何處理
#[tokio::test]
async fn test_vendor_error_is_returned_as_response() -> Result<()> {
    let server = MockServer::start_async().await;
    mock_login(&server).await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/shopping/flight-offers/pricing");
            then.status(400).json_body(json!({
                "errors": [{"status": 400, "code": 4926, "title": "INVALID DATA RECEIVED", "detail": "Flight offer is no longer available"}]
            }));
        })
        .await;

    let sdk = sdk_for(&server);
    let offer = json!({"type": "flight-offer", "id": "1"});
    let response = sdk.pricing(&offer, PaymentMethod::Cash, None).await?;

    assert_eq!(response.status, 400);
    assert!(!response.is_success());

    match response.into_result() {
        Err(SdkError::ApiError { status, message, .. }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "INVALID DATA RECEIVED: Flight offer is no longer available");
        }
        other => panic!("unexpected result: {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn test_non_json_response_is_an_error() -> Result<()> {
    let server = MockServer::start_async().await;
    mock_login(&server).await;

    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/v1/booking/flight-orders/{}/issuance", BOOKING_ID));
            then.status(502).body("<html>Bad Gateway</html>");
        })
        .await;

    let sdk = sdk_for(&server);
    let result = sdk.issue_booking(BOOKING_ID).await;

    match result {
        Err(SdkError::InvalidResponse { status, body }) => {
            assert_eq!(status, 502);
            assert!(body.contains("Bad Gateway"));
        }
        other => panic!("unexpected result: {:?}", other),
    }

    Ok(())
}

/// 輸入不合法時不會送出任何請求
#[tokio::test]
async fn test_invalid_input_never_reaches_the_api() -> Result<()> {
    let server = MockServer::start_async().await;
    let login_mock = mock_login(&server).await;

    let sdk = sdk_for(&server);

    let result = sdk
        .search_availability(&[], &[SearchAvailabilityPax::new("1", TravelerType::Adult)], None)
        .await;
    assert!(matches!(result, Err(SdkError::ValidationError { .. })));

    let offer = json!({"type": "flight-offer", "id": "1"});
    let result = sdk
        .reserve(&offer, PaymentMethod::CreditCard, &[traveler()], None)
        .await;
    assert!(matches!(result, Err(SdkError::ValidationError { .. })));

    let result = sdk.cancel_booking("  ").await;
    assert!(matches!(result, Err(SdkError::ValidationError { .. })));

    // `..` 會讓 DELETE 落到整個 flight-orders 集合
    let result = sdk.cancel_booking("..").await;
    assert!(matches!(result, Err(SdkError::ValidationError { .. })));
    let result = sdk.issue_booking(".").await;
    assert!(matches!(result, Err(SdkError::ValidationError { .. })));

    // 出發日未補零
    let result = sdk
        .search_availability(
            &[SearchAvailabilityItinerary::new("1", "MAD", "HAV", "2026-2-1")],
            &[SearchAvailabilityPax::new("1", TravelerType::Adult)],
            None,
        )
        .await;
    assert!(matches!(result, Err(SdkError::ValidationError { .. })));

    login_mock.assert_hits_async(0).await;

    Ok(())
}
