use log::{debug, info};
use std::sync::Arc;

use folioport_market_data::SymbolResolver;

use crate::activities::{parse_csv, ActivityRecord, ImportTable};
use crate::brokers::{AccountRouting, BrokerAdapter, BrokerFormat, CathayAdapter, FirstradeAdapter};
use crate::Result;

/// Turns broker exports into the ordered record queue.
///
/// One normalizer holds one symbol resolver, so the listing behind it is
/// fetched at most once for every import it runs.
pub struct ImportNormalizer {
    cathay: CathayAdapter,
    firstrade: FirstradeAdapter,
}

impl ImportNormalizer {
    /// Creates a new ImportNormalizer instance with injected dependencies
    pub fn new(resolver: Arc<dyn SymbolResolver>, routing: AccountRouting) -> Self {
        let routing = Arc::new(routing);
        Self {
            cathay: CathayAdapter::new(resolver, routing.clone()),
            firstrade: FirstradeAdapter::new(routing),
        }
    }

    /// The adapter for a broker.
    pub fn adapter(&self, broker: BrokerFormat) -> &dyn BrokerAdapter {
        match broker {
            BrokerFormat::Cathay => &self.cathay,
            BrokerFormat::Firstrade => &self.firstrade,
        }
    }

    /// Normalizes a parsed table.
    ///
    /// Records come out in row order, minus `SKIP` rows. Any failing row
    /// fails the whole call.
    pub async fn normalize(
        &self,
        broker: BrokerFormat,
        table: &ImportTable,
    ) -> Result<Vec<ActivityRecord>> {
        debug!("[{}] Normalizing {} rows", broker, table.len());
        let records = self.adapter(broker).parse(table).await?;
        info!(
            "[{}] Normalized {} of {} rows",
            broker,
            records.len(),
            table.len()
        );
        Ok(records)
    }

    /// Normalizes a table for a broker given by identifier.
    ///
    /// An unknown identifier fails with `InvalidBroker` before any row is read.
    pub async fn normalize_named(
        &self,
        broker: &str,
        table: &ImportTable,
    ) -> Result<Vec<ActivityRecord>> {
        let broker: BrokerFormat = broker.parse()?;
        self.normalize(broker, table).await
    }

    /// Parses raw export bytes with the broker's CSV settings and normalizes them.
    pub async fn normalize_csv(
        &self,
        broker: BrokerFormat,
        content: &[u8],
    ) -> Result<Vec<ActivityRecord>> {
        let table = parse_csv(content, &broker.parse_config())?;
        self.normalize(broker, &table).await
    }
}
