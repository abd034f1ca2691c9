use crate::config::toml_config::TomlConfig;
use crate::config::{AmadeusConfig, SdkOptions};
use crate::core::auth::{request_token, AccessToken, TokenStore};
use crate::core::client::{ApiResponse, HttpClient, RequestSpec};
use crate::core::endpoints::FlightEndpoint;
use crate::domain::model::{
    CardBrand, CommissionType, PaymentData, PaymentMethod, ReservePax, SearchAvailabilityItinerary,
    SearchAvailabilityPax,
};
use crate::domain::payload;
use crate::domain::ports::{ConfigProvider, FlightApi};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path_segment, Validate};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// 航班 API 的 SDK。每個操作都會先重新登入，再送出一次請求。
pub struct FlightSdk<C: ConfigProvider = AmadeusConfig> {
    config: C,
    options: SdkOptions,
    http: HttpClient,
    token: TokenStore,
}

impl<C: ConfigProvider> FlightSdk<C> {
    pub fn new(config: C, options: SdkOptions) -> Result<Self> {
        let http = HttpClient::new(&options.prefix_ama_ref, &options.suffix_ama_ref, options.debug)?;
        Ok(Self::with_http_client(config, options, http))
    }

    pub fn with_http_client(config: C, options: SdkOptions, http: HttpClient) -> Self {
        tracing::debug!(
            "FlightSdk ready for {} (production: {}, currency: {})",
            config.api_url(),
            config.production(),
            options.currency
        );
        Self {
            config,
            options,
            http,
            token: TokenStore::default(),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn options(&self) -> &SdkOptions {
        &self.options
    }

    /// 產生一個新的 ama-client-ref 追蹤編號
    pub fn build_ama_ref(&self) -> String {
        self.http.build_ama_ref()
    }

    pub fn access_token(&self) -> Option<String> {
        self.token.access_token()
    }

    pub fn auth_data(&self) -> Option<AccessToken> {
        self.token.get()
    }

    /// 取得新的 access token 並回傳，失敗時清掉舊的
    pub async fn login(&self) -> Result<AccessToken> {
        match request_token(&self.http, &self.config).await {
            Ok(token) => {
                tracing::debug!("🔑 Obtained access token (expires in {:?}s)", token.expires_in);
                self.token.set(Some(token.clone()));
                Ok(token)
            }
            Err(e) => {
                tracing::error!("❌ Login failed: {}", e);
                self.token.set(None);
                Err(e)
            }
        }
    }

    async fn call(
        &self,
        endpoint: FlightEndpoint<'_>,
        payload: Option<Value>,
        show_response: bool,
    ) -> Result<ApiResponse> {
        // 用這次登入拿到的 token，不回頭讀共用的 store
        let token = self.login().await?;

        let url = endpoint.url(self.config.api_url())?;
        let mut spec = RequestSpec::new(endpoint.method(), url).show_response(show_response);
        if let Some(payload) = payload {
            spec = spec.payload(payload);
        }

        let response = self.http.request(spec, Some(token.access_token.as_str())).await?;

        if response.is_success() {
            tracing::info!("✅ {}: HTTP {}", endpoint.name(), response.status);
        } else {
            tracing::warn!(
                "⚠️ {}: HTTP {} {}",
                endpoint.name(),
                response.status,
                response.error_message().unwrap_or_default()
            );
        }

        Ok(response)
    }

    async fn call_with<T: Serialize>(
        &self,
        endpoint: FlightEndpoint<'_>,
        payload: &T,
        show_response: bool,
    ) -> Result<ApiResponse> {
        let payload = serde_json::to_value(payload)?;
        self.call(endpoint, Some(payload), show_response).await
    }
}

impl FlightSdk<AmadeusConfig> {
    /// 從環境變數 (與 `.env`) 建立
    pub fn from_env(options: SdkOptions) -> Result<Self> {
        let config = AmadeusConfig::from_env()?;
        config.validate()?;
        Self::new(config, options)
    }

    /// 從 TOML 設定檔建立，`[sdk]` 區塊提供 SDK 選項
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = TomlConfig::from_file(path)?;
        config.validate()?;
        let (amadeus, options) = config.into_parts();
        Self::new(amadeus, options)
    }
}

#[async_trait]
impl<C: ConfigProvider> FlightApi for FlightSdk<C> {
    async fn search_availability(
        &self,
        itinerary: &[SearchAvailabilityItinerary],
        travelers: &[SearchAvailabilityPax],
        only_carriers: Option<&[String]>,
    ) -> Result<ApiResponse> {
        payload::validate_search(itinerary, travelers)?;
        let body = payload::search_payload(self.options.currency, itinerary, travelers, only_carriers);
        self.call_with(FlightEndpoint::Availability, &body, false).await
    }

    async fn pricing(
        &self,
        flight_offer: &Value,
        payment_method: PaymentMethod,
        card_brand: Option<CardBrand>,
    ) -> Result<ApiResponse> {
        let body = payload::pricing_payload(flight_offer, payment_method, card_brand)?;
        self.call_with(FlightEndpoint::Pricing, &body, false).await
    }

    async fn reserve(
        &self,
        priced_offer: &Value,
        payment_method: PaymentMethod,
        travelers: &[ReservePax],
        payment_data: Option<&PaymentData>,
    ) -> Result<ApiResponse> {
        let body = payload::reserve_payload(priced_offer, payment_method, travelers, payment_data)?;
        self.call_with(FlightEndpoint::Reserve, &body, true).await
    }

    async fn retrieve_by_locator(&self, locator: &str) -> Result<ApiResponse> {
        validate_non_empty_string("locator", locator)?;
        self.call(FlightEndpoint::RetrieveByLocator(locator), None, true)
            .await
    }

    async fn retrieve_by_booking_id(&self, booking_id: &str) -> Result<ApiResponse> {
        validate_path_segment("booking_id", booking_id)?;
        self.call(FlightEndpoint::RetrieveById(booking_id), None, true)
            .await
    }

    async fn issue_booking(&self, booking_id: &str) -> Result<ApiResponse> {
        validate_path_segment("booking_id", booking_id)?;
        self.call(FlightEndpoint::Issue(booking_id), None, true).await
    }

    async fn cancel_booking(&self, booking_id: &str) -> Result<ApiResponse> {
        validate_path_segment("booking_id", booking_id)?;
        self.call(FlightEndpoint::Cancel(booking_id), None, false).await
    }

    async fn fm_commission_booking(
        &self,
        booking_id: &str,
        commission_type: CommissionType,
        value: f64,
    ) -> Result<ApiResponse> {
        validate_path_segment("booking_id", booking_id)?;
        let body = payload::commission_payload(commission_type, value)?;
        self.call_with(FlightEndpoint::Commission(booking_id), &body, false)
            .await
    }
}
