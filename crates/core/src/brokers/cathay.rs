//! Cathay Securities trade statements.
//!
//! Rows name the security by its Chinese display name only, so every row
//! goes through the symbol resolver.

use std::sync::Arc;

use async_trait::async_trait;
use folioport_market_data::SymbolResolver;

use super::brokers_model::{AccountRouting, BrokerFormat};
use super::brokers_traits::BrokerAdapter;
use super::schema::{ColumnSpec, SchemaRow, TableSchema};
use crate::activities::{ActivityRecord, ActivityType, DataSource, MappedAction};
use crate::constants::{IMPORT_COMMENT, TWD_CURRENCY};
use crate::errors::{Error, Result};

pub const COL_NAME: &str = "股名";
pub const COL_DATE: &str = "日期";
pub const COL_ACTION: &str = "買賣別";
pub const COL_QUANTITY: &str = "成交股數";
pub const COL_PRICE: &str = "成交價";
pub const COL_COMMISSION: &str = "手續費";
pub const COL_TAX: &str = "交易稅";

/// Cash purchase
const ACTION_BUY: &str = "現買";
/// Cash sale
const ACTION_SELL: &str = "現賣";

static CATHAY_COLUMNS: [ColumnSpec; 7] = [
    ColumnSpec::text(COL_NAME),
    ColumnSpec::date(COL_DATE, "%Y/%m/%d"),
    ColumnSpec::text(COL_ACTION),
    ColumnSpec::decimal(COL_QUANTITY),
    ColumnSpec::decimal(COL_PRICE),
    ColumnSpec::decimal(COL_COMMISSION),
    ColumnSpec::decimal(COL_TAX),
];

static CATHAY_SCHEMA: TableSchema = TableSchema {
    columns: &CATHAY_COLUMNS,
    action_column: COL_ACTION,
};

pub struct CathayAdapter {
    resolver: Arc<dyn SymbolResolver>,
    routing: Arc<AccountRouting>,
}

impl CathayAdapter {
    pub fn new(resolver: Arc<dyn SymbolResolver>, routing: Arc<AccountRouting>) -> Self {
        Self { resolver, routing }
    }
}

#[async_trait]
impl BrokerAdapter for CathayAdapter {
    fn format(&self) -> BrokerFormat {
        BrokerFormat::Cathay
    }

    fn schema(&self) -> &TableSchema {
        &CATHAY_SCHEMA
    }

    fn map_action(&self, code: &str) -> Result<MappedAction> {
        match code {
            ACTION_BUY => Ok(MappedAction::Activity(ActivityType::Buy)),
            ACTION_SELL => Ok(MappedAction::Activity(ActivityType::Sell)),
            other => Err(Error::UnknownAction(other.to_string())),
        }
    }

    async fn build_record(
        &self,
        activity_type: ActivityType,
        row: &SchemaRow<'_>,
    ) -> Result<ActivityRecord> {
        let date = row.date(COL_DATE)?;
        let quantity = row.decimal(COL_QUANTITY)?.abs();
        let unit_price = row.decimal(COL_PRICE)?;
        let fee = row.decimal_or_zero(COL_COMMISSION)? + row.decimal_or_zero(COL_TAX)?;

        let symbol = self.resolver.resolve(row.text(COL_NAME)?).await?;
        let account_id = self.routing.cathay_account(&symbol).to_string();

        Ok(ActivityRecord {
            account_id,
            currency: TWD_CURRENCY.to_string(),
            data_source: DataSource::Yahoo,
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
