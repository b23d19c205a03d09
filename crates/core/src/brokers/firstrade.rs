//! Firstrade account history exports.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::brokers_model::{AccountRouting, BrokerFormat};
use super::brokers_traits::BrokerAdapter;
use super::schema::{ColumnSpec, SchemaRow, TableSchema};
use crate::activities::{ActivityRecord, ActivityType, DataSource, MappedAction};
use crate::constants::{IMPORT_COMMENT, INTEREST_SYMBOL, USD_CURRENCY};
use crate::errors::{Error, Result};

pub const COL_ACTION: &str = "Action";
pub const COL_TRADE_DATE: &str = "TradeDate";
pub const COL_SYMBOL: &str = "Symbol";
pub const COL_FEE: &str = "Fee";
pub const COL_QUANTITY: &str = "Quantity";
pub const COL_PRICE: &str = "Price";
pub const COL_AMOUNT: &str = "Amount";

static FIRSTRADE_COLUMNS: [ColumnSpec; 7] = [
    ColumnSpec::text(COL_ACTION),
    ColumnSpec::date(COL_TRADE_DATE, "%Y-%m-%d"),
    ColumnSpec::text(COL_SYMBOL),
    ColumnSpec::decimal(COL_FEE),
    ColumnSpec::decimal(COL_QUANTITY),
    ColumnSpec::decimal(COL_PRICE),
    ColumnSpec::decimal(COL_AMOUNT),
];

static FIRSTRADE_SCHEMA: TableSchema = TableSchema {
    columns: &FIRSTRADE_COLUMNS,
    action_column: COL_ACTION,
};

/// Drops the qualifier Firstrade appends to some tickers ("AAPL 123" -> "AAPL").
pub fn base_ticker(raw: &str) -> &str {
    raw.split(' ').next().unwrap_or(raw)
}

pub struct FirstradeAdapter {
    routing: Arc<AccountRouting>,
}

impl FirstradeAdapter {
    pub fn new(routing: Arc<AccountRouting>) -> Self {
        Self { routing }
    }
}

#[async_trait]
impl BrokerAdapter for FirstradeAdapter {
    fn format(&self) -> BrokerFormat {
        BrokerFormat::Firstrade
    }

    fn schema(&self) -> &TableSchema {
        &FIRSTRADE_SCHEMA
    }

    fn map_action(&self, code: &str) -> Result<MappedAction> {
        let activity_type = match code {
            "BUY" => ActivityType::Buy,
            "SELL" => ActivityType::Sell,
            "Dividend" => ActivityType::Dividend,
            "Interest" => ActivityType::Interest,
            "Other" => return Ok(MappedAction::Skip),
            other => return Err(Error::UnknownAction(other.to_string())),
        };
        Ok(MappedAction::Activity(activity_type))
    }

    async fn build_record(
        &self,
        activity_type: ActivityType,
        row: &SchemaRow<'_>,
    ) -> Result<ActivityRecord> {
        let date = row.date(COL_TRADE_DATE)?;
        let fee = row.decimal_or_zero(COL_FEE)?;

        // Income rows have no lot: one unit priced at the paid amount
        let (quantity, unit_price) = if activity_type.is_income() {
            (Decimal::ONE, row.decimal(COL_AMOUNT)?)
        } else {
            (row.decimal(COL_QUANTITY)?.abs(), row.decimal(COL_PRICE)?)
        };

        let (symbol, data_source) = match activity_type {
            ActivityType::Interest => (INTEREST_SYMBOL.to_string(), DataSource::Manual),
            _ => (
                base_ticker(row.text(COL_SYMBOL)?).to_string(),
                DataSource::Yahoo,
            ),
        };

        Ok(ActivityRecord {
            account_id: self.routing.firstrade_account().to_string(),
            currency: USD_CURRENCY.to_string(),
            data_source,
            date: ActivityRecord::midnight(date),
            fee,
            quantity,
            symbol,
            activity_type,
            unit_price,
            comment: IMPORT_COMMENT.to_string(),
        })
    }
}
