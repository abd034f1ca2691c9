use crate::core::client::ApiResponse;
use crate::domain::model::{
    CardBrand, CommissionType, PaymentData, PaymentMethod, ReservePax, SearchAvailabilityItinerary,
    SearchAvailabilityPax,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn client_id(&self) -> &str;
    fn client_secret(&self) -> &str;
    fn production(&self) -> bool;
}

/// 航班訂位 API 的操作集合，每次呼叫都是一次獨立的登入 + 請求
#[async_trait]
pub trait FlightApi: Send + Sync {
    async fn search_availability(
        &self,
        itinerary: &[SearchAvailabilityItinerary],
        travelers: &[SearchAvailabilityPax],
        only_carriers: Option<&[String]>,
    ) -> Result<ApiResponse>;

    async fn pricing(
        &self,
        flight_offer: &Value,
        payment_method: PaymentMethod,
        card_brand: Option<CardBrand>,
    ) -> Result<ApiResponse>;

    async fn reserve(
        &self,
        priced_offer: &Value,
        payment_method: PaymentMethod,
        travelers: &[ReservePax],
        payment_data: Option<&PaymentData>,
    ) -> Result<ApiResponse>;

    async fn retrieve_by_locator(&self, locator: &str) -> Result<ApiResponse>;

    async fn retrieve_by_booking_id(&self, booking_id: &str) -> Result<ApiResponse>;

    async fn issue_booking(&self, booking_id: &str) -> Result<ApiResponse>;

    async fn cancel_booking(&self, booking_id: &str) -> Result<ApiResponse>;

    async fn fm_commission_booking(
        &self,
        booking_id: &str,
        commission_type: CommissionType,
        value: f64,
    ) -> Result<ApiResponse>;
}
