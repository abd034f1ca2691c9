use crate::config::SdkOptions;
use crate::core::client::ApiResponse;
use crate::domain::model::{
    CardBrand, CommissionType, Currency, PaymentData, PaymentMethod, ReservePax,
    SearchAvailabilityItinerary, SearchAvailabilityPax,
};
use crate::domain::ports::FlightApi;
use crate::utils::error::{Result, SdkError};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "amadeus-flights")]
#[command(about = "Command line client for the Amadeus Enterprise flight booking API")]
pub struct CliConfig {
    /// TOML config file; credentials come from the environment / .env when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "AMADEUS_CURRENCY")]
    pub currency: Option<Currency>,

    #[arg(long, global = true)]
    pub prefix_ama_ref: Option<String>,

    #[arg(long, global = true)]
    pub suffix_ama_ref: Option<String>,

    #[arg(long, global = true, help = "Trace every request and response")]
    pub debug: bool,

    #[arg(long, short, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// 命令列參數覆蓋設定檔中的 SDK 選項
    pub fn apply_to(&self, mut options: SdkOptions) -> SdkOptions {
        if let Some(currency) = self.currency {
            options.currency = currency;
        }
        if let Some(prefix) = &self.prefix_ama_ref {
            options.prefix_ama_ref = prefix.clone();
        }
        if let Some(suffix) = &self.suffix_ama_ref {
            options.suffix_ama_ref = suffix.clone();
        }
        options.debug = options.debug || self.debug;
        options
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Search flight offers
    Search {
        /// ID:ORIGIN:DESTINATION:YYYY-MM-DD, repeat for each leg
        #[arg(long = "leg", required = true, value_parser = parse_leg)]
        legs: Vec<SearchAvailabilityItinerary>,

        /// ID:TYPE (ADULT, CHILD, HELD_INFANT), repeat for each traveler
        #[arg(long = "traveler", required = true, value_parser = parse_pax)]
        travelers: Vec<SearchAvailabilityPax>,

        /// Only include these carriers (comma separated IATA codes)
        #[arg(long = "carrier", value_delimiter = ',')]
        carriers: Vec<String>,
    },
    /// Price a flight offer taken from a search response file
    Price {
        #[arg(long)]
        offer: PathBuf,

        #[arg(long, default_value_t = 0)]
        index: usize,

        #[arg(long, default_value = "cash")]
        payment: PaymentMethod,

        #[arg(long)]
        brand: Option<CardBrand>,
    },
    /// Create a flight order from a priced offer
    Reserve {
        #[arg(long)]
        offer: PathBuf,

        #[arg(long, default_value_t = 0)]
        index: usize,

        /// JSON array of travelers
        #[arg(long)]
        travelers: PathBuf,

        #[arg(long, default_value = "cash")]
        payment: PaymentMethod,

        /// JSON object with the card data
        #[arg(long)]
        card: Option<PathBuf>,
    },
    /// Retrieve a flight order by record locator or booking id
    Retrieve {
        #[arg(long, conflicts_with = "booking_id", required_unless_present = "booking_id")]
        locator: Option<String>,

        #[arg(long)]
        booking_id: Option<String>,
    },
    /// Issue the tickets of a flight order
    Issue {
        #[arg(long)]
        booking_id: String,
    },
    /// Cancel a flight order
    Cancel {
        #[arg(long)]
        booking_id: String,
    },
    /// Set a manual commission on a flight order
    Commission {
        #[arg(long)]
        booking_id: String,

        #[arg(long, default_value = "percentage")]
        kind: CommissionType,

        #[arg(long)]
        value: f64,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Search { .. } => "search",
            Command::Price { .. } => "price",
            Command::Reserve { .. } => "reserve",
            Command::Retrieve { .. } => "retrieve",
            Command::Issue { .. } => "issue",
            Command::Cancel { .. } => "cancel",
            Command::Commission { .. } => "commission",
        }
    }

    pub async fn execute(&self, api: &dyn FlightApi) -> Result<ApiResponse> {
        match self {
            Command::Search {
                legs,
                travelers,
                carriers,
            } => {
                let carriers = (!carriers.is_empty()).then_some(carriers.as_slice());
                api.search_availability(legs, travelers, carriers).await
            }
            Command::Price {
                offer,
                index,
                payment,
                brand,
            } => {
                let document: Value = read_json(offer)?;
                let offer = select_offer(&document, *index)?;
                api.pricing(offer, *payment, *brand).await
            }
            Command::Reserve {
                offer,
                index,
                travelers,
                payment,
                card,
            } => {
                let document: Value = read_json(offer)?;
                let offer = select_offer(&document, *index)?;
                let travelers: Vec<ReservePax> = read_json(travelers)?;
                let card: Option<PaymentData> = card.as_deref().map(read_json::<PaymentData>).transpose()?;
                api.reserve(offer, *payment, &travelers, card.as_ref()).await
            }
            Command::Retrieve {
                locator,
                booking_id,
            } => match (locator, booking_id) {
                (Some(locator), _) => api.retrieve_by_locator(locator).await,
                (None, Some(booking_id)) => api.retrieve_by_booking_id(booking_id).await,
                (None, None) => Err(SdkError::ValidationError {
                    field: "retrieve".to_string(),
                    message: "Either --locator or --booking-id is required".to_string(),
                }),
            },
            Command::Issue { booking_id } => api.issue_booking(booking_id).await,
            Command::Cancel { booking_id } => api.cancel_booking(booking_id).await,
            Command::Commission {
                booking_id,
                kind,
                value,
            } => api.fm_commission_booking(booking_id, *kind, *value).await,
        }
    }
}

fn parse_leg(raw: &str) -> std::result::Result<SearchAvailabilityItinerary, String> {
    match raw.split(':').collect::<Vec<_>>().as_slice() {
        [id, origin, destination, date] => Ok(SearchAvailabilityItinerary::new(
            *id,
            origin.to_ascii_uppercase(),
            destination.to_ascii_uppercase(),
            *date,
        )),
        _ => Err(format!("expected ID:ORIGIN:DESTINATION:YYYY-MM-DD, got '{}'", raw)),
    }
}

fn parse_pax(raw: &str) -> std::result::Result<SearchAvailabilityPax, String> {
    match raw.split_once(':') {
        Some((id, traveler_type)) => Ok(SearchAvailabilityPax::new(id, traveler_type.parse()?)),
        None => Err(format!("expected ID:TYPE, got '{}'", raw)),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// 接受搜尋回應 (`data[]`)、定價回應 (`data.flightOffers[]`) 或單一 offer
pub fn select_offer(document: &Value, index: usize) -> Result<&Value> {
    let offers = match document.get("data") {
        Some(Value::Array(offers)) => Some(offers),
        Some(data) => data.get("flightOffers").and_then(Value::as_array),
        None => None,
    };

    match offers {
        Some(offers) => offers.get(index).ok_or_else(|| SdkError::ValidationError {
            field: "offer".to_string(),
            message: format!("Offer index {} out of range ({} offers)", index, offers.len()),
        }),
        None => Ok(document),
    }
}
