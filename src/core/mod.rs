pub mod auth;
pub mod client;
pub mod endpoints;
pub mod sdk;

pub use crate::domain::ports::{ConfigProvider, FlightApi};
pub use crate::utils::error::Result;
