use crate::config::{AmadeusConfig, SdkOptions};
use crate::utils::error::{Result, SdkError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

static ENV_PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

/// TOML 設定檔：`[amadeus]` 連線設定 + 選填的 `[sdk]` 行為設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub amadeus: AmadeusConfig,
    #[serde(default)]
    pub sdk: SdkOptions,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SdkError::IoError)?;
        tracing::debug!("Loaded config file {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SdkError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${AMADEUS_CLIENT_SECRET})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        let re = ENV_PLACEHOLDER.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn into_parts(self) -> (AmadeusConfig, SdkOptions) {
        (self.amadeus, self.sdk)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.amadeus.validate()
    }
}
