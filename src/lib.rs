pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{toml_config::TomlConfig, AmadeusConfig, SdkOptions};
pub use core::{
    client::{ApiResponse, HttpClient},
    sdk::FlightSdk,
};
pub use domain::model::{
    CardBrand, CommissionType, Currency, DocumentType, Gender, PaymentData, PaymentMethod,
    RequestMethod, ReservePax, SearchAvailabilityItinerary, SearchAvailabilityPax, TravelerType,
};
pub use domain::ports::{ConfigProvider, FlightApi};
pub use utils::error::{Result, SdkError};
