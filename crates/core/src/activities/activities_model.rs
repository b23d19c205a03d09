//! Activity domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::activities::activities_constants::*;
use crate::errors::ValidationError;

/// Parses a numeric cell from a broker export.
///
/// Thousands separators are stripped before parsing ("1,234" is 1234), and
/// scientific notation is accepted as a fallback. Empty cells are an error;
/// callers that treat a blank cell as zero must say so explicitly.
pub fn parse_decimal_string(
    value_str: &str,
    field_name: &str,
) -> std::result::Result<Decimal, ValidationError> {
    let cleaned: String = value_str
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Err(ValidationError::MissingField(field_name.to_string()));
    }

    match Decimal::from_str(&cleaned) {
        Ok(d) => Ok(d),
        Err(e_decimal) => Decimal::from_scientific(&cleaned).map_err(|_| {
            ValidationError::InvalidInput(format!(
                "{} '{}' is not a number ({})",
                field_name, value_str, e_decimal
            ))
        }),
    }
}

/// Canonical activity type accepted by the import endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Buy,
    Sell,
    Dividend,
    Interest,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Buy => ACTIVITY_TYPE_BUY,
            ActivityType::Sell => ACTIVITY_TYPE_SELL,
            ActivityType::Dividend => ACTIVITY_TYPE_DIVIDEND,
            ActivityType::Interest => ACTIVITY_TYPE_INTEREST,
        }
    }

    /// Dividends and interest have no lot of their own: they are recorded
    /// with a quantity of 1 and the paid amount as unit price.
    pub fn is_income(&self) -> bool {
        is_income_activity(self.as_str())
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of mapping a broker action code.
///
/// `Skip` marks rows that carry no activity (fees journals, transfers the
/// broker labels "Other"); they are dropped before reaching the review queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappedAction {
    Activity(ActivityType),
    Skip,
}

/// Where the portfolio service should source prices for the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSource {
    #[default]
    Yahoo,
    Manual,
    Coingecko,
}

/// Serde helpers for the activity date.
///
/// The import endpoint takes an ISO-8601 timestamp; trade dates are always
/// recorded at midnight.
mod midnight_format {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(&s).map(|dt| dt.naive_utc()))
            .map_err(serde::de::Error::custom)
    }
}

/// Canonical record for one trade, dividend or interest event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub account_id: String,
    pub currency: String,
    pub data_source: DataSource,
    #[serde(with = "midnight_format")]
    pub date: NaiveDateTime,
    pub fee: Decimal,
    pub quantity: Decimal,
    pub symbol: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub unit_price: Decimal,
    pub comment: String,
}

impl ActivityRecord {
    /// Midnight of a trade date.
    pub fn midnight(date: NaiveDate) -> NaiveDateTime {
        date.and_time(chrono::NaiveTime::MIN)
    }

    /// The trade date without the time component.
    pub fn trade_date(&self) -> NaiveDate {
        self.date.date()
    }

    /// Checks the invariants every queued record must satisfy.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.account_id.trim().is_empty() {
            return Err(ValidationError::MissingField("accountId".to_string()));
        }
        if self.symbol.trim().is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()));
        }
        if self.quantity <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "quantity must be positive, got {}",
                self.quantity
            )));
        }
        if self.unit_price.is_sign_negative() {
            return Err(ValidationError::InvalidInput(format!(
                "unit price must not be negative, got {}",
                self.unit_price
            )));
        }
        if self.fee.is_sign_negative() {
            return Err(ValidationError::InvalidInput(format!(
                "fee must not be negative, got {}",
                self.fee
            )));
        }
        Ok(())
    }
}

/// Request body of the import endpoint: one record per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEnvelope {
    pub activities: Vec<ActivityRecord>,
}

impl ImportEnvelope {
    pub fn single(record: ActivityRecord) -> Self {
        Self {
            activities: vec![record],
        }
    }

    /// The wrapped record.
    pub fn record(&self) -> Option<&ActivityRecord> {
        self.activities.first()
    }

    /// Indented JSON used when presenting the envelope to the operator.
    pub fn to_pretty_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<ActivityRecord> for ImportEnvelope {
    fn from(record: ActivityRecord) -> Self {
        Self::single(record)
    }
}
