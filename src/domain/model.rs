use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 為供應商的字串列舉產生 `as_str` / `Display` / `FromStr`
macro_rules! wire_enum {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().replace('-', "_");
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(&normalized))
                    .ok_or_else(|| {
                        let valid: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        format!(
                            "unknown {} '{}', expected one of: {}",
                            stringify!($name),
                            s,
                            valid.join(", ")
                        )
                    })
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    Post,
    Get,
    Delete,
    Patch,
}

wire_enum!(RequestMethod {
    Post => "POST",
    Get => "GET",
    Delete => "DELETE",
    Patch => "PATCH",
});

impl From<RequestMethod> for reqwest::Method {
    fn from(method: RequestMethod) -> Self {
        match method {
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Delete => reqwest::Method::DELETE,
            RequestMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Jmd,
    Eur,
}

wire_enum!(Currency {
    Usd => "USD",
    Jmd => "JMD",
    Eur => "EUR",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelerType {
    #[serde(rename = "ADULT")]
    Adult,
    #[serde(rename = "CHILD")]
    Child,
    #[serde(rename = "HELD_INFANT", alias = "INFANT")]
    Infant,
}

wire_enum!(TravelerType {
    Adult => "ADULT",
    Child => "CHILD",
    Infant => "HELD_INFANT",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
}

wire_enum!(PaymentMethod {
    Cash => "CASH",
    CreditCard => "CREDIT_CARD",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

wire_enum!(Gender {
    Male => "MALE",
    Female => "FEMALE",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Passport,
    IdentityCard,
}

wire_enum!(DocumentType {
    Passport => "PASSPORT",
    IdentityCard => "IDENTITY_CARD",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardBrand {
    Visa,
    Mastercard,
    AmericanExpress,
    Diners,
    Discover,
    Jcb,
}

wire_enum!(CardBrand {
    Visa => "VISA",
    Mastercard => "MASTERCARD",
    AmericanExpress => "AMERICAN_EXPRESS",
    Diners => "DINERS",
    Discover => "DISCOVER",
    Jcb => "JCB",
});

/// 佣金值在 payload 中使用的欄位名稱
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommissionType {
    Percentage,
    Amount,
}

wire_enum!(CommissionType {
    Percentage => "percentage",
    Amount => "amount",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAvailabilityItinerary {
    pub id: String,
    pub origin_location_code: String,
    pub destination_location_code: String,
    pub departure_date: String,
}

impl SearchAvailabilityItinerary {
    pub fn new(
        id: impl Into<String>,
        origin_location_code: impl Into<String>,
        destination_location_code: impl Into<String>,
        departure_date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            origin_location_code: origin_location_code.into(),
            destination_location_code: destination_location_code.into(),
            departure_date: departure_date.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAvailabilityPax {
    pub id: String,
    pub traveler_type: TravelerType,
}

impl SearchAvailabilityPax {
    pub fn new(id: impl Into<String>, traveler_type: TravelerType) -> Self {
        Self {
            id: id.into(),
            traveler_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservePax {
    pub id: String,
    pub date_of_birth: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub email: String,
    pub phone_country_code: String,
    pub phone_number: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub document_issuance_date: String,
    pub document_expiry_date: String,
    pub document_issuance_country_code: String,
    pub nationality_code: String,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentData {
    pub brand: Option<CardBrand>,
    pub holder: Option<String>,
    pub number: Option<String>,
    pub expiry_date: Option<String>,
    pub security_code: Option<String>,
}

impl fmt::Debug for PaymentData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentData")
            .field("brand", &self.brand)
            .field("holder", &self.holder)
            .field("number", &self.number.as_ref().map(|_| "***"))
            .field("expiry_date", &self.expiry_date)
            .field("security_code", &self.security_code.as_ref().map(|_| "***"))
            .finish()
    }
}
