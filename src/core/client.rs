use crate::domain::model::RequestMethod;
use crate::utils::error::{Result, SdkError};
use chrono::{SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Instant;
use url::Url;

pub const AMA_CLIENT_REF: &str = "ama-client-ref";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

const REDACTED: &str = "***";
const REDACTED_FIELDS: [&str; 1] = ["client_secret"];
const CARD_OBJECT: &str = "creditCard";
const REDACTED_CARD_FIELDS: [&str; 2] = ["number", "securityCode"];
const MAX_ERROR_BODY_CHARS: usize = 512;

/// `{prefix}/{UTC 時間 (毫秒)}/{uuid v4}/{suffix}`
pub fn build_ama_ref(prefix: &str, suffix: &str) -> String {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    format!("{}/{}/{}/{}", prefix, now, uuid::Uuid::new_v4(), suffix)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyEncoding {
    #[default]
    Json,
    Form,
}

impl BodyEncoding {
    fn content_type(&self) -> &'static str {
        match self {
            BodyEncoding::Json => CONTENT_TYPE_JSON,
            BodyEncoding::Form => CONTENT_TYPE_FORM,
        }
    }
}

/// 單次請求的描述
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: RequestMethod,
    pub url: Url,
    pub payload: Option<Value>,
    pub headers: HeaderMap,
    pub encoding: BodyEncoding,
    pub no_auth: bool,
    pub show_response: bool,
}

impl RequestSpec {
    pub fn new(method: RequestMethod, url: Url) -> Self {
        Self {
            method,
            url,
            payload: None,
            headers: HeaderMap::new(),
            encoding: BodyEncoding::Json,
            no_auth: false,
            show_response: false,
        }
    }

    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn form(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self.encoding = BodyEncoding::Form;
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn no_auth(mut self) -> Self {
        self.no_auth = true;
        self
    }

    pub fn show_response(mut self, show: bool) -> Self {
        self.show_response = show;
        self
    }
}

/// HTTP 狀態碼與 JSON 內容，不論成功與否都會回傳給呼叫端
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn data(&self) -> Option<&Value> {
        self.body.get("data")
    }

    /// 供應商錯誤格式：`{"errors": [{"title": ..., "detail": ...}]}`，
    /// OAuth 端點則是 `{"error": ..., "error_description": ...}`
    pub fn error_message(&self) -> Option<String> {
        if let Some(errors) = self.body.get("errors").and_then(Value::as_array) {
            let messages: Vec<String> = errors
                .iter()
                .filter_map(|error| {
                    let detail = error.get("detail").and_then(Value::as_str);
                    let title = error.get("title").and_then(Value::as_str);
                    match (title, detail) {
                        (Some(title), Some(detail)) => Some(format!("{}: {}", title, detail)),
                        (Some(text), None) | (None, Some(text)) => Some(text.to_string()),
                        (None, None) => None,
                    }
                })
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }

        ["error_description", "title", "error"]
            .iter()
            .find_map(|key| self.body.get(*key).and_then(Value::as_str))
            .map(str::to_string)
    }

    pub fn into_result(self) -> Result<Value> {
        if self.is_success() {
            return Ok(self.body);
        }

        let message = self
            .error_message()
            .unwrap_or_else(|| "no error details in response".to_string());
        Err(SdkError::ApiError {
            status: self.status,
            message,
            body: self.body,
        })
    }
}

/// 發送請求並解開回應的 HTTP 層
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    prefix_ama_ref: String,
    suffix_ama_ref: String,
    debug: bool,
}

impl HttpClient {
    pub fn new(prefix_ama_ref: &str, suffix_ama_ref: &str, debug: bool) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, prefix_ama_ref, suffix_ama_ref, debug))
    }

    pub fn with_client(client: Client, prefix_ama_ref: &str, suffix_ama_ref: &str, debug: bool) -> Self {
        Self {
            client,
            prefix_ama_ref: prefix_ama_ref.to_string(),
            suffix_ama_ref: suffix_ama_ref.to_string(),
            debug,
        }
    }

    pub fn build_ama_ref(&self) -> String {
        build_ama_ref(&self.prefix_ama_ref, &self.suffix_ama_ref)
    }

    /// 保留呼叫端的 header，補上 Content-Type / Authorization，並產生新的 ama-client-ref
    pub fn build_headers(
        &self,
        mut headers: HeaderMap,
        encoding: BodyEncoding,
        no_auth: bool,
        token: Option<&str>,
    ) -> Result<HeaderMap> {
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(encoding.content_type()));
        }

        if !no_auth && !headers.contains_key(AUTHORIZATION) {
            if let Some(token) = token {
                let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                    SdkError::ValidationError {
                        field: "access_token".to_string(),
                        message: format!("Token is not a valid header value: {}", e),
                    }
                })?;
                headers.insert(AUTHORIZATION, value);
            }
        }

        let ama_ref = self.build_ama_ref();
        let value = HeaderValue::from_str(&ama_ref).map_err(|e| SdkError::InvalidConfigValueError {
            field: "sdk.prefix_ama_ref/suffix_ama_ref".to_string(),
            value: ama_ref.clone(),
            reason: format!("Not a valid header value: {}", e),
        })?;
        headers.insert(HeaderName::from_static(AMA_CLIENT_REF), value);

        Ok(headers)
    }

    pub async fn request(&self, spec: RequestSpec, token: Option<&str>) -> Result<ApiResponse> {
        let headers = self.build_headers(spec.headers, spec.encoding, spec.no_auth, token)?;
        let payload = spec.payload.unwrap_or_else(|| Value::Object(Map::new()));

        let started_at = Utc::now();
        let timer = Instant::now();

        if self.debug {
            tracing::debug!("{}", "-".repeat(100));
            tracing::debug!("URL: {} {}", spec.method, spec.url);
            tracing::debug!("Start time: {}", started_at.format("%d/%m/%Y %H:%M:%S"));
            tracing::debug!("Headers: {:?}", redact_headers(&headers));
            tracing::debug!("Payload: {}", redact_payload(&payload));
        }

        let builder = self
            .client
            .request(spec.method.into(), spec.url.clone())
            .headers(headers);

        let builder = match (spec.method, spec.encoding) {
            (RequestMethod::Post, BodyEncoding::Form) => builder.form(&payload),
            (RequestMethod::Post, BodyEncoding::Json) | (RequestMethod::Patch, _) => builder.json(&payload),
            // GET / DELETE 把 payload 當成 query string
            (RequestMethod::Get, _) | (RequestMethod::Delete, _) => match payload.as_object() {
                Some(params) if !params.is_empty() => builder.query(params),
                _ => builder,
            },
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        if self.debug {
            tracing::debug!("{}", "-".repeat(100));
            tracing::debug!("End time: {}", Utc::now().format("%d/%m/%Y %H:%M:%S"));
            tracing::debug!("Duration: {:?}", timer.elapsed());
            tracing::debug!("Response status: {}", status);

            if spec.show_response {
                match serde_json::from_str::<Value>(&text) {
                    Ok(data) => tracing::debug!("Response data: {}", redact_payload(&data)),
                    Err(_) => tracing::debug!("Response raw data: {}", text),
                }
            }
        }

        if spec.method == RequestMethod::Delete && status == 204 {
            return Ok(ApiResponse {
                status,
                body: Value::Object(Map::new()),
            });
        }

        let body = serde_json::from_str(&text).map_err(|_| SdkError::InvalidResponse {
            status,
            body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        })?;

        Ok(ApiResponse { status, body })
    }
}

fn redact_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if *name == AUTHORIZATION {
                format!("Bearer {}", REDACTED)
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            (name.to_string(), shown)
        })
        .collect()
}

/// 隱藏憑證與卡號後再寫進日誌
fn redact_payload(payload: &Value) -> Value {
    redact_value(payload, &REDACTED_FIELDS)
}

fn redact_value(value: &Value, secret_fields: &[&str]) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let shown = if secret_fields.contains(&key.as_str()) && value.is_string() {
                        Value::String(REDACTED.to_string())
                    } else if key == CARD_OBJECT {
                        // 卡號與安全碼只在 creditCard 物件內隱藏
                        let mut card_fields = REDACTED_FIELDS.to_vec();
                        card_fields.extend(REDACTED_CARD_FIELDS);
                        redact_value(value, &card_fields)
                    } else {
                        redact_value(value, &REDACTED_FIELDS)
                    };
                    (key.clone(), shown)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| redact_value(item, secret_fields))
                .collect(),
        ),
        other => other.clone(),
    }
}
