#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::Currency;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SdkError};
use crate::utils::validation::{validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PRODUCTION_API_URL: &str = "https://travel.api.amadeus.com";
pub const TEST_API_URL: &str = "https://test.travel.api.amadeus.com";

pub const ENV_API_URL: &str = "AMADEUS_API_URL";
pub const ENV_CLIENT_ID: &str = "AMADEUS_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "AMADEUS_CLIENT_SECRET";
pub const ENV_PRODUCTION: &str = "PRODUCTION";

/// 供應商 API 的連線與憑證設定
#[derive(Clone, Serialize, Deserialize)]
pub struct AmadeusConfig {
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub production: bool,
}

impl AmadeusConfig {
    pub fn new(
        api_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            production: false,
        }
    }

    /// 從環境變數載入，會先讀取目前目錄下的 `.env`
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let production = match lookup(ENV_PRODUCTION) {
            Some(raw) => parse_flag(ENV_PRODUCTION, &raw)?,
            None => false,
        };

        Ok(Self {
            api_url: lookup(ENV_API_URL).unwrap_or_default(),
            client_id: lookup(ENV_CLIENT_ID).unwrap_or_default(),
            client_secret: lookup(ENV_CLIENT_SECRET).unwrap_or_default(),
            production,
        })
    }

    /// 未設定 `api_url` 時依 `production` 選擇預設主機
    pub fn resolved_api_url(&self) -> &str {
        let url = self.api_url.trim();
        if url.is_empty() {
            if self.production {
                PRODUCTION_API_URL
            } else {
                TEST_API_URL
            }
        } else {
            url.trim_end_matches('/')
        }
    }
}

fn parse_flag(field: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" => Ok(true),
        other => Err(SdkError::InvalidConfigValueError {
            field: field.to_string(),
            value: other.to_string(),
            reason: "Expected 0/1 or true/false".to_string(),
        }),
    }
}

fn validate_credential(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SdkError::MissingConfigError {
            field: field.to_string(),
        });
    }
    if value.contains("${") {
        return Err(SdkError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: "Unresolved environment variable placeholder".to_string(),
        });
    }
    Ok(())
}

impl fmt::Debug for AmadeusConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmadeusConfig")
            .field("api_url", &self.resolved_api_url())
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("production", &self.production)
            .finish()
    }
}

impl ConfigProvider for AmadeusConfig {
    fn api_url(&self) -> &str {
        self.resolved_api_url()
    }

    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn client_secret(&self) -> &str {
        &self.client_secret
    }

    fn production(&self) -> bool {
        self.production
    }
}

impl Validate for AmadeusConfig {
    fn validate(&self) -> Result<()> {
        validate_url("amadeus.api_url", self.resolved_api_url())?;
        validate_credential("amadeus.client_id", &self.client_id)?;
        validate_credential("amadeus.client_secret", &self.client_secret)?;
        Ok(())
    }
}

/// SDK 行為設定：追蹤編號前後綴、幣別與除錯輸出
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkOptions {
    pub prefix_ama_ref: String,
    pub suffix_ama_ref: String,
    pub currency: Currency,
    pub debug: bool,
}

impl SdkOptions {
    pub fn with_prefix_ama_ref(mut self, prefix: impl Into<String>) -> Self {
        self.prefix_ama_ref = prefix.into();
        self
    }

    pub fn with_suffix_ama_ref(mut self, suffix: impl Into<String>) -> Self {
        self.suffix_ama_ref = suffix.into();
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
