//! Activities module - canonical activity records and tabular input.

mod activities_constants;
mod activities_model;
mod csv_parser;

#[cfg(test)]
mod activities_model_tests;

pub use activities_constants::*;
pub use activities_model::{
    parse_decimal_string, ActivityRecord, ActivityType, DataSource, ImportEnvelope, MappedAction,
};
pub use csv_parser::{parse_csv, ImportTable, ParseConfig};
