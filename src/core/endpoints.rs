use crate::domain::model::RequestMethod;
use crate::utils::error::{Result, SdkError};
use crate::utils::validation::validate_path_segment;
use url::Url;

const FLIGHT_ORDERS: [&str; 3] = ["v1", "booking", "flight-orders"];

/// 供應商 API 的端點，路徑相對於設定的 base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightEndpoint<'a> {
    Login,
    Availability,
    Pricing,
    Reserve,
    RetrieveByLocator(&'a str),
    RetrieveById(&'a str),
    Issue(&'a str),
    Cancel(&'a str),
    Commission(&'a str),
}

impl FlightEndpoint<'_> {
    pub fn method(&self) -> RequestMethod {
        match self {
            FlightEndpoint::RetrieveByLocator(_) | FlightEndpoint::RetrieveById(_) => RequestMethod::Get,
            FlightEndpoint::Cancel(_) => RequestMethod::Delete,
            FlightEndpoint::Commission(_) => RequestMethod::Patch,
            _ => RequestMethod::Post,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FlightEndpoint::Login => "login",
            FlightEndpoint::Availability => "search_availability",
            FlightEndpoint::Pricing => "pricing",
            FlightEndpoint::Reserve => "reserve",
            FlightEndpoint::RetrieveByLocator(_) => "retrieve_by_locator",
            FlightEndpoint::RetrieveById(_) => "retrieve_by_booking_id",
            FlightEndpoint::Issue(_) => "issue_booking",
            FlightEndpoint::Cancel(_) => "cancel_booking",
            FlightEndpoint::Commission(_) => "fm_commission_booking",
        }
    }

    fn segments(&self) -> Vec<&str> {
        match *self {
            FlightEndpoint::Login => vec!["v1", "security", "oauth2", "token"],
            FlightEndpoint::Availability => vec!["v2", "shopping", "flight-offers"],
            FlightEndpoint::Pricing => vec!["v1", "shopping", "flight-offers", "pricing"],
            FlightEndpoint::Reserve => FLIGHT_ORDERS.to_vec(),
            FlightEndpoint::RetrieveByLocator(_) => {
                let mut segments = FLIGHT_ORDERS.to_vec();
                segments.push("by-reference");
                segments
            }
            FlightEndpoint::RetrieveById(id)
            | FlightEndpoint::Cancel(id)
            | FlightEndpoint::Commission(id) => {
                let mut segments = FLIGHT_ORDERS.to_vec();
                segments.push(id);
                segments
            }
            FlightEndpoint::Issue(id) => {
                let mut segments = FLIGHT_ORDERS.to_vec();
                segments.extend([id, "issuance"]);
                segments
            }
        }
    }

    fn path_id(&self) -> Option<&str> {
        match *self {
            FlightEndpoint::RetrieveById(id)
            | FlightEndpoint::Issue(id)
            | FlightEndpoint::Cancel(id)
            | FlightEndpoint::Commission(id) => Some(id),
            _ => None,
        }
    }

    /// 組出完整 URL，路徑片段會做 percent-encoding
    pub fn url(&self, base_url: &str) -> Result<Url> {
        // url 會直接略過 `.` / `..` 片段，必須先擋下
        if let Some(id) = self.path_id() {
            validate_path_segment("booking_id", id)?;
        }

        let mut url = Url::parse(base_url).map_err(|e| SdkError::InvalidConfigValueError {
            field: "amadeus.api_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        url.path_segments_mut()
            .map_err(|_| SdkError::InvalidConfigValueError {
                field: "amadeus.api_url".to_string(),
                value: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(self.segments());

        if let FlightEndpoint::RetrieveByLocator(locator) = self {
            url.query_pairs_mut()
                .append_pair("reference", locator)
                .append_pair("originSystemCode", "GDS");
        }

        Ok(url)
    }
}
