//! Brokers module - export formats, schemas and per-broker adapters.

mod brokers_model;
mod brokers_traits;
mod cathay;
mod firstrade;
mod schema;

pub use brokers_model::{AccountRouting, BrokerFormat, DEFAULT_PRIMARY_TW_SYMBOLS};
pub use brokers_traits::BrokerAdapter;
pub use cathay::CathayAdapter;
pub use firstrade::{base_ticker, FirstradeAdapter};
pub use schema::{BoundTable, ColumnKind, ColumnSpec, SchemaRow, TableSchema};
