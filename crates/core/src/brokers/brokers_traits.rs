//! Broker adapter trait.
//!
//! Adapters differ only in their schema, their action codes and how a row
//! becomes a record. The shared parse loop lives in the trait's default
//! `parse` method.

use async_trait::async_trait;
use log::debug;

use super::brokers_model::BrokerFormat;
use super::schema::{SchemaRow, TableSchema};
use crate::activities::{ActivityRecord, ActivityType, ImportTable, MappedAction};
use crate::errors::{Error, Result};

/// Converts one broker's export table into activity records.
#[async_trait]
pub trait BrokerAdapter: Send + Sync {
    /// The broker this adapter reads.
    fn format(&self) -> BrokerFormat;

    /// Columns the export must carry.
    fn schema(&self) -> &TableSchema;

    /// Maps a broker action code.
    ///
    /// Unknown codes return `Error::UnknownAction`.
    fn map_action(&self, code: &str) -> Result<MappedAction>;

    /// Builds the record for a row whose action is not `SKIP`.
    async fn build_record(
        &self,
        activity_type: ActivityType,
        row: &SchemaRow<'_>,
    ) -> Result<ActivityRecord>;

    /// Parses the whole table.
    ///
    /// Output order follows the input; `SKIP` rows are dropped. The first
    /// failing row aborts the batch and no records are returned.
    async fn parse(&self, table: &ImportTable) -> Result<Vec<ActivityRecord>> {
        let schema = self.schema();
        let bound = schema.bind(table)?;
        let mut records = Vec::with_capacity(bound.len());

        for row in bound.rows() {
            let code = row.text(schema.action_column)?;
            let activity_type = match self.map_action(code)? {
                MappedAction::Activity(activity_type) => activity_type,
                MappedAction::Skip => {
                    debug!("[{}] Skipping row {} ({})", self.format(), row.number(), code);
                    continue;
                }
            };

            let record = self.build_record(activity_type, &row).await?;
            record
                .validate()
                .map_err(|e| Error::malformed(row.number(), e.to_string()))?;
            records.push(record);
        }

        debug!(
            "[{}] Parsed {} records from {} rows",
            self.format(),
            records.len(),
            bound.len()
        );
        Ok(records)
    }
}
