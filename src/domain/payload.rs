//! 將型別化的請求資料組成供應商 JSON payload。
//!
//! 這裡只做資料轉換與輕量的輸入檢查，不做任何 IO。

use crate::domain::model::{
    CardBrand, CommissionType, Currency, PaymentData, PaymentMethod, ReservePax,
    SearchAvailabilityItinerary, SearchAvailabilityPax, TravelerType,
};
use crate::utils::error::{Result, SdkError};
use crate::utils::validation::{
    validate_date, validate_non_empty_list, validate_non_empty_string, validate_required_field,
    validate_year_month,
};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

const FARE_OPTION_STANDARD: &str = "STANDARD";
const SOURCE_GDS: &str = "GDS";
const FARE_TYPE_PUBLISHED: &str = "PUBLISHED";
const DEVICE_TYPE_MOBILE: &str = "MOBILE";
const COMMISSION_CONTROL_MANUAL: &str = "MANUAL";
const COMMISSION_TYPE_NEW: &str = "NEW";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffersSearch<'a> {
    pub currency_code: Currency,
    pub origin_destinations: Vec<OriginDestination<'a>>,
    pub travelers: Vec<SearchTraveler<'a>>,
    pub sources: Vec<&'static str>,
    pub search_criteria: SearchCriteria<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginDestination<'a> {
    pub id: &'a str,
    pub origin_location_code: &'a str,
    pub destination_location_code: &'a str,
    pub departure_date_time_range: DateTimeRange<'a>,
}

#[derive(Debug, Serialize)]
pub struct DateTimeRange<'a> {
    pub date: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTraveler<'a> {
    pub id: &'a str,
    pub traveler_type: TravelerType,
    pub fare_options: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_adult_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria<'a> {
    pub pricing_options: PricingOptions,
    pub additional_information: AdditionalInformation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_filters: Option<FlightFilters<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingOptions {
    pub fare_type: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInformation {
    pub branded_fares: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightFilters<'a> {
    pub carrier_restrictions: CarrierRestrictions<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierRestrictions<'a> {
    pub included_carrier_codes: &'a [String],
}

/// `{"data": ...}` 外層包裝
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffersPricing<'a> {
    pub r#type: &'static str,
    pub flight_offers: [&'a Value; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payments: Option<Vec<PricingPayment<'a>>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPayment<'a> {
    pub brand: CardBrand,
    pub flight_offer_ids: [&'a Value; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOrder<'a> {
    pub r#type: &'static str,
    pub flight_offers: [&'a Value; 1],
    pub travelers: Vec<OrderTraveler<'a>>,
    pub form_of_payments: Vec<FormOfPayment<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTraveler<'a> {
    pub id: &'a str,
    pub date_of_birth: &'a str,
    pub name: TravelerName<'a>,
    pub gender: crate::domain::model::Gender,
    pub contact: TravelerContact<'a>,
    pub documents: Vec<TravelerDocument<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerName<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerContact<'a> {
    pub email_address: &'a str,
    pub phones: Vec<TravelerPhone<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerPhone<'a> {
    pub device_type: &'static str,
    pub country_calling_code: &'a str,
    pub number: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerDocument<'a> {
    pub document_type: crate::domain::model::DocumentType,
    pub number: &'a str,
    pub issuance_date: &'a str,
    pub expiry_date: &'a str,
    pub issuance_country: &'a str,
    pub nationality: &'a str,
    pub holder: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormOfPayment<'a> {
    Other(OtherPayment<'a>),
    CreditCard(CreditCardPayment<'a>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherPayment<'a> {
    pub method: PaymentMethod,
    pub flight_offer_ids: [&'a Value; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardPayment<'a> {
    pub brand: CardBrand,
    pub holder: &'a str,
    pub number: &'a str,
    pub expiry_date: &'a str,
    pub security_code: &'a str,
    pub flight_offer_ids: [&'a Value; 1],
}

impl fmt::Debug for CreditCardPayment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCardPayment")
            .field("brand", &self.brand)
            .field("holder", &self.holder)
            .field("number", &"***")
            .field("expiry_date", &self.expiry_date)
            .field("security_code", &"***")
            .field("flight_offer_ids", &self.flight_offer_ids)
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct FlightOrderCommissions {
    pub r#type: &'static str,
    pub commissions: Vec<Commission>,
}

#[derive(Debug, Serialize)]
pub struct Commission {
    pub controls: Vec<&'static str>,
    pub values: Vec<Value>,
}

/// 驗證搜尋條件
pub fn validate_search(
    itinerary: &[SearchAvailabilityItinerary],
    travelers: &[SearchAvailabilityPax],
) -> Result<()> {
    validate_non_empty_list("itinerary", itinerary)?;
    validate_non_empty_list("travelers", travelers)?;

    for route in itinerary {
        validate_non_empty_string("itinerary.origin_location_code", &route.origin_location_code)?;
        validate_non_empty_string(
            "itinerary.destination_location_code",
            &route.destination_location_code,
        )?;
        validate_date("itinerary.departure_date", &route.departure_date)?;
    }

    let has_infant = travelers
        .iter()
        .any(|pax| pax.traveler_type == TravelerType::Infant);
    if has_infant && first_adult_id(travelers).is_none() {
        return Err(SdkError::ValidationError {
            field: "travelers".to_string(),
            message: "An infant must travel with at least one adult".to_string(),
        });
    }

    Ok(())
}

fn first_adult_id(travelers: &[SearchAvailabilityPax]) -> Option<&str> {
    travelers
        .iter()
        .find(|pax| pax.traveler_type == TravelerType::Adult)
        .map(|pax| pax.id.as_str())
}

pub fn search_payload<'a>(
    currency: Currency,
    itinerary: &'a [SearchAvailabilityItinerary],
    travelers: &'a [SearchAvailabilityPax],
    only_carriers: Option<&'a [String]>,
) -> FlightOffersSearch<'a> {
    let adult_id = first_adult_id(travelers);

    let flight_filters = only_carriers
        .filter(|carriers| !carriers.is_empty())
        .map(|carriers| FlightFilters {
            carrier_restrictions: CarrierRestrictions {
                included_carrier_codes: carriers,
            },
        });

    FlightOffersSearch {
        currency_code: currency,
        origin_destinations: itinerary
            .iter()
            .map(|route| OriginDestination {
                id: &route.id,
                origin_location_code: &route.origin_location_code,
                destination_location_code: &route.destination_location_code,
                departure_date_time_range: DateTimeRange {
                    date: &route.departure_date,
                },
            })
            .collect(),
        travelers: travelers
            .iter()
            .map(|pax| SearchTraveler {
                id: &pax.id,
                traveler_type: pax.traveler_type,
                fare_options: vec![FARE_OPTION_STANDARD],
                associated_adult_id: match pax.traveler_type {
                    TravelerType::Infant => adult_id,
                    _ => None,
                },
            })
            .collect(),
        sources: vec![SOURCE_GDS],
        search_criteria: SearchCriteria {
            pricing_options: PricingOptions {
                fare_type: vec![FARE_TYPE_PUBLISHED],
            },
            additional_information: AdditionalInformation {
                branded_fares: true,
            },
            flight_filters,
        },
    }
}

/// 取出 flight offer 的 `id`，定價與訂位都需要它
pub fn offer_id(offer: &Value) -> Result<&Value> {
    match offer.get("id") {
        Some(id) if !id.is_null() => Ok(id),
        _ => Err(SdkError::ValidationError {
            field: "flight_offer.id".to_string(),
            message: "Flight offer has no id".to_string(),
        }),
    }
}

pub fn pricing_payload(
    flight_offer: &Value,
    payment_method: PaymentMethod,
    card_brand: Option<CardBrand>,
) -> Result<DataEnvelope<FlightOffersPricing<'_>>> {
    let id = offer_id(flight_offer)?;

    let payments = match payment_method {
        PaymentMethod::Cash => None,
        PaymentMethod::CreditCard => {
            let brand = validate_required_field("card_brand", &card_brand)?;
            Some(vec![PricingPayment {
                brand: *brand,
                flight_offer_ids: [id],
            }])
        }
    };

    Ok(DataEnvelope {
        data: FlightOffersPricing {
            r#type: "flight-offers-pricing",
            flight_offers: [flight_offer],
            payments,
        },
    })
}

fn validate_traveler(traveler: &ReservePax) -> Result<()> {
    validate_non_empty_string("travelers.id", &traveler.id)?;
    validate_non_empty_string("travelers.first_name", &traveler.first_name)?;
    validate_non_empty_string("travelers.last_name", &traveler.last_name)?;
    validate_date("travelers.date_of_birth", &traveler.date_of_birth)?;
    validate_date("travelers.document_issuance_date", &traveler.document_issuance_date)?;
    validate_date("travelers.document_expiry_date", &traveler.document_expiry_date)?;
    Ok(())
}

fn credit_card_payment<'a>(
    payment_data: Option<&'a PaymentData>,
    id: &'a Value,
) -> Result<CreditCardPayment<'a>> {
    let data = payment_data.ok_or_else(|| SdkError::ValidationError {
        field: "payment_data".to_string(),
        message: "Card data is required for credit card payments".to_string(),
    })?;

    let expiry_date = validate_required_field("payment_data.expiry_date", &data.expiry_date)?;
    validate_year_month("payment_data.expiry_date", expiry_date)?;

    Ok(CreditCardPayment {
        brand: *validate_required_field("payment_data.brand", &data.brand)?,
        holder: validate_required_field("payment_data.holder", &data.holder)?,
        number: validate_required_field("payment_data.number", &data.number)?,
        expiry_date,
        security_code: validate_required_field("payment_data.security_code", &data.security_code)?,
        flight_offer_ids: [id],
    })
}

pub fn reserve_payload<'a>(
    priced_offer: &'a Value,
    payment_method: PaymentMethod,
    travelers: &'a [ReservePax],
    payment_data: Option<&'a PaymentData>,
) -> Result<DataEnvelope<FlightOrder<'a>>> {
    let id = offer_id(priced_offer)?;
    validate_non_empty_list("travelers", travelers)?;
    for traveler in travelers {
        validate_traveler(traveler)?;
    }

    let payment = match payment_method {
        PaymentMethod::Cash => FormOfPayment::Other(OtherPayment {
            method: PaymentMethod::Cash,
            flight_offer_ids: [id],
        }),
        PaymentMethod::CreditCard => FormOfPayment::CreditCard(credit_card_payment(payment_data, id)?),
    };

    Ok(DataEnvelope {
        data: FlightOrder {
            r#type: "flight-order",
            flight_offers: [priced_offer],
            travelers: travelers
                .iter()
                .map(|traveler| OrderTraveler {
                    id: &traveler.id,
                    date_of_birth: &traveler.date_of_birth,
                    name: TravelerName {
                        first_name: &traveler.first_name,
                        last_name: &traveler.last_name,
                    },
                    gender: traveler.gender,
                    contact: TravelerContact {
                        email_address: &traveler.email,
                        phones: vec![TravelerPhone {
                            device_type: DEVICE_TYPE_MOBILE,
                            country_calling_code: &traveler.phone_country_code,
                            number: &traveler.phone_number,
                        }],
                    },
                    documents: vec![TravelerDocument {
                        document_type: traveler.document_type,
                        number: &traveler.document_number,
                        issuance_date: &traveler.document_issuance_date,
                        expiry_date: &traveler.document_expiry_date,
                        issuance_country: &traveler.document_issuance_country_code,
                        nationality: &traveler.nationality_code,
                        holder: true,
                    }],
                })
                .collect(),
            form_of_payments: vec![payment],
        },
    })
}

pub fn commission_payload(
    commission_type: CommissionType,
    value: f64,
) -> Result<DataEnvelope<FlightOrderCommissions>> {
    if !value.is_finite() || value < 0.0 {
        return Err(SdkError::ValidationError {
            field: "commission.value".to_string(),
            message: format!("Commission value must be a non-negative number, got {}", value),
        });
    }

    let mut entry = serde_json::Map::new();
    entry.insert(
        "commissionType".to_string(),
        Value::String(COMMISSION_TYPE_NEW.to_string()),
    );
    entry.insert(commission_type.as_str().to_string(), serde_json::json!(value));

    Ok(DataEnvelope {
        data: FlightOrderCommissions {
            r#type: "flight-order",
            commissions: vec![Commission {
                controls: vec![COMMISSION_CONTROL_MANUAL],
                values: vec![Value::Object(entry)],
            }],
        },
    })
}
