//! Broker selection and account routing.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::activities::ParseConfig;
use crate::errors::Error;

/// Supported brokerage export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokerFormat {
    /// Cathay Securities (Taiwan) trade statement, TWD.
    Cathay,
    /// Firstrade account history, USD.
    Firstrade,
}

impl BrokerFormat {
    pub const ALL: [BrokerFormat; 2] = [BrokerFormat::Cathay, BrokerFormat::Firstrade];

    /// Short identifier accepted on the command line.
    pub fn identifier(&self) -> &'static str {
        match self {
            BrokerFormat::Cathay => "cathay",
            BrokerFormat::Firstrade => "ft",
        }
    }

    /// CSV settings of the broker's export file.
    pub fn parse_config(&self) -> ParseConfig {
        match self {
            // The statement starts with a title line above the header row
            BrokerFormat::Cathay => ParseConfig {
                skip_top_rows: Some(1),
                ..Default::default()
            },
            BrokerFormat::Firstrade => ParseConfig::default(),
        }
    }
}

impl fmt::Display for BrokerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for BrokerFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cathay" => Ok(BrokerFormat::Cathay),
            "ft" | "firstrade" => Ok(BrokerFormat::Firstrade),
            _ => Err(Error::InvalidBroker(s.to_string())),
        }
    }
}

/// Symbols held in the primary Taiwan account unless configured otherwise.
pub const DEFAULT_PRIMARY_TW_SYMBOLS: [&str; 3] = ["2330.TW", "00878.TW", "006208.TW"];

/// Account rule-set applied by the broker adapters.
///
/// Cathay trades are split across two accounts: a short allow-list of
/// long-term holdings goes to the primary account and everything else to the
/// secondary one. Firstrade only trades in the US account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRouting {
    pub primary_tw_account: String,
    pub secondary_tw_account: String,
    pub us_account: String,
    pub primary_tw_symbols: HashSet<String>,
}

impl AccountRouting {
    pub fn new(
        primary_tw_account: impl Into<String>,
        secondary_tw_account: impl Into<String>,
        us_account: impl Into<String>,
    ) -> Self {
        Self {
            primary_tw_account: primary_tw_account.into(),
            secondary_tw_account: secondary_tw_account.into(),
            us_account: us_account.into(),
            primary_tw_symbols: DEFAULT_PRIMARY_TW_SYMBOLS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Replaces the primary allow-list.
    pub fn with_primary_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_tw_symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Account for a resolved Cathay symbol.
    pub fn cathay_account(&self, symbol: &str) -> &str {
        if self.primary_tw_symbols.contains(symbol) {
            &self.primary_tw_account
        } else {
            &self.secondary_tw_account
        }
    }

    pub fn firstrade_account(&self) -> &str {
        &self.us_account
    }
}
