use crate::core::client::{ApiResponse, HttpClient, RequestSpec};
use crate::core::endpoints::FlightEndpoint;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::RwLock;

const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
}

/// OAuth2 token 端點的回應
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"***")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("state", &self.state)
            .field("scope", &self.scope)
            .finish()
    }
}

/// 以 client credentials 取得 token
pub async fn request_token<C: ConfigProvider + ?Sized>(
    http: &HttpClient,
    config: &C,
) -> Result<AccessToken> {
    let form = serde_json::to_value(TokenRequest {
        grant_type: GRANT_TYPE_CLIENT_CREDENTIALS,
        client_id: config.client_id(),
        client_secret: config.client_secret(),
    })?;

    let url = FlightEndpoint::Login.url(config.api_url())?;
    let spec = RequestSpec::new(FlightEndpoint::Login.method(), url)
        .form(form)
        .no_auth();

    let response = match http.request(spec, None).await {
        Ok(response) => response,
        // 閘道的 HTML 錯誤頁也算登入失敗
        Err(SdkError::InvalidResponse { status, body }) => {
            return Err(SdkError::AuthenticationError {
                status,
                message: body,
            })
        }
        Err(e) => return Err(e),
    };
    token_from_response(response)
}

fn token_from_response(response: ApiResponse) -> Result<AccessToken> {
    if response.status != 200 {
        let message = response
            .error_message()
            .unwrap_or_else(|| response.body.to_string());
        return Err(SdkError::AuthenticationError {
            status: response.status,
            message,
        });
    }

    match serde_json::from_value::<AccessToken>(response.body) {
        Ok(token) if !token.access_token.is_empty() => Ok(token),
        _ => Err(SdkError::AuthenticationError {
            status: response.status,
            message: "Token response has no access_token".to_string(),
        }),
    }
}

/// 最近一次登入取得的 token
#[derive(Debug, Default)]
pub struct TokenStore {
    inner: RwLock<Option<AccessToken>>,
}

impl TokenStore {
    pub fn get(&self) -> Option<AccessToken> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.get().map(|token| token.access_token)
    }

    pub fn set(&self, token: Option<AccessToken>) {
        match self.inner.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }
}
