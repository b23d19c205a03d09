use std::time::Duration;

use folioport_connect::{DEFAULT_GHOSTFOLIO_URL, DEFAULT_TIMEOUT_SECS};
use folioport_core::errors::Error;
use folioport_core::AccountRouting;
use uuid::Uuid;

pub const ENV_HOST: &str = "FOLIOPORT_HOST";
pub const ENV_SECURITY_TOKEN: &str = "FOLIOPORT_SECURITY_TOKEN";
pub const ENV_TW_ACCOUNT_ID: &str = "FOLIOPORT_TW_ACCOUNT_ID";
pub const ENV_TW2_ACCOUNT_ID: &str = "FOLIOPORT_TW2_ACCOUNT_ID";
pub const ENV_US_ACCOUNT_ID: &str = "FOLIOPORT_US_ACCOUNT_ID";
pub const ENV_PRIMARY_TW_SYMBOLS: &str = "FOLIOPORT_PRIMARY_TW_SYMBOLS";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "FOLIOPORT_REQUEST_TIMEOUT_MS";

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    /// Only needed when records are actually submitted.
    pub security_token: Option<String>,
    pub tw_account_id: String,
    pub tw2_account_id: String,
    pub us_account_id: String,
    pub primary_tw_symbols: Option<Vec<String>>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = get(ENV_HOST).unwrap_or_else(|| DEFAULT_GHOSTFOLIO_URL.to_string());

        let request_timeout = match get(ENV_REQUEST_TIMEOUT_MS) {
            Some(raw) => {
                let ms: u64 = raw.parse().map_err(|_| {
                    Error::InvalidConfigValue(format!(
                        "{} must be a number of milliseconds, got '{}'",
                        ENV_REQUEST_TIMEOUT_MS, raw
                    ))
                })?;
                Duration::from_millis(ms)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let primary_tw_symbols = get(ENV_PRIMARY_TW_SYMBOLS).map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        });

        Ok(Self {
            host,
            security_token: get(ENV_SECURITY_TOKEN),
            tw_account_id: account_id(&get, ENV_TW_ACCOUNT_ID)?,
            tw2_account_id: account_id(&get, ENV_TW2_ACCOUNT_ID)?,
            us_account_id: account_id(&get, ENV_US_ACCOUNT_ID)?,
            primary_tw_symbols,
            request_timeout,
        })
    }

    pub fn require_security_token(&self) -> Result<&str, Error> {
        self.security_token
            .as_deref()
            .ok_or_else(|| Error::MissingConfigKey(ENV_SECURITY_TOKEN.to_string()))
    }

    pub fn account_routing(&self) -> AccountRouting {
        let routing = AccountRouting::new(
            &self.tw_account_id,
            &self.tw2_account_id,
            &self.us_account_id,
        );
        match &self.primary_tw_symbols {
            Some(symbols) => routing.with_primary_symbols(symbols.iter().cloned()),
            None => routing,
        }
    }
}

/// Reads a required Ghostfolio account id, which must be a UUID.
fn account_id(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, Error> {
    let raw = get(key).ok_or_else(|| Error::MissingConfigKey(key.to_string()))?;
    Uuid::parse_str(&raw)
        .map(|id| id.to_string())
        .map_err(|e| Error::InvalidConfigValue(format!("{} is not a valid UUID: {}", key, e)))
}
