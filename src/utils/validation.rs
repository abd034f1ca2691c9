use crate::utils::error::{Result, SdkError};
use chrono::NaiveDate;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SdkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SdkError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SdkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| SdkError::ValidationError {
        field: field_name.to_string(),
        message: "Value is required".to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SdkError::ValidationError {
            field: field_name.to_string(),
            message: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(SdkError::ValidationError {
            field: field_name.to_string(),
            message: "At least one entry is required".to_string(),
        });
    }
    Ok(())
}

/// `YYYY-MM-DD`，月與日必須補零
pub fn validate_date(field_name: &str, value: &str) -> Result<()> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| SdkError::ValidationError {
        field: field_name.to_string(),
        message: format!("'{}' is not a YYYY-MM-DD date: {}", value, e),
    })?;

    if date.format("%Y-%m-%d").to_string() != value {
        return Err(SdkError::ValidationError {
            field: field_name.to_string(),
            message: format!("'{}' is not a zero-padded YYYY-MM-DD date", value),
        });
    }
    Ok(())
}

/// 信用卡到期日 `YYYY-MM`
pub fn validate_year_month(field_name: &str, value: &str) -> Result<()> {
    // NaiveDate 需要完整日期，補上第一天再解析
    let padded = format!("{}-01", value);
    match NaiveDate::parse_from_str(&padded, "%Y-%m-%d") {
        Ok(date) if date.format("%Y-%m-%d").to_string() == padded => Ok(()),
        _ => Err(SdkError::ValidationError {
            field: field_name.to_string(),
            message: format!("'{}' is not a YYYY-MM value", value),
        }),
    }
}

/// 會放進 URL 路徑的識別碼，`.` 與 `..` 會被當成相對路徑
pub fn validate_path_segment(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if value == "." || value == ".." {
        return Err(SdkError::ValidationError {
            field: field_name.to_string(),
            message: format!("'{}' is not a valid identifier", value),
        });
    }
    Ok(())
}
