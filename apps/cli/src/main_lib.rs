use std::io::{BufRead, Write};
use std::sync::Arc;

use folioport_core::errors::Error;
use folioport_core::{
    ActivityRecord, ActivitySubmitter, ImportEnvelope, ImportNormalizer, ImportSession,
    ReviewDecision, ReviewSummary,
};
use folioport_market_data::{ListingSymbolResolver, TwseListingProvider, DEFAULT_TWSE_ISIN_URL};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

pub const PROMPT: &str = "Do you want to import? (y/n) ";

pub fn init_tracing() {
    let log_format = std::env::var("FOLIOPORT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the records under review
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Normalizer backed by the TWSE listing, fetched on the first name lookup.
pub fn build_normalizer(config: &Config) -> Result<ImportNormalizer, Error> {
    let provider = TwseListingProvider::with_base_url(DEFAULT_TWSE_ISIN_URL, config.request_timeout)?;
    let resolver = Arc::new(ListingSymbolResolver::new(Arc::new(provider)));
    Ok(ImportNormalizer::new(resolver, config.account_routing()))
}

/// Writes every envelope without submitting anything.
pub fn print_envelopes<W: Write>(records: &[ActivityRecord], output: &mut W) -> anyhow::Result<()> {
    for (idx, record) in records.iter().enumerate() {
        let envelope = ImportEnvelope::single(record.clone());
        writeln!(output, "[{}/{}]", idx + 1, records.len())?;
        writeln!(output, "{}", envelope.to_pretty_json()?)?;
    }
    Ok(())
}

/// Walks the session, asking for a decision on every record.
///
/// With `auto_confirm` every record is imported without asking. End of
/// input cancels the rest of the queue. A failed submission is reported on
/// `output` and ends the loop; the summary carries the failure.
pub async fn run_review<R, W>(
    session: &mut ImportSession,
    submitter: &dyn ActivitySubmitter,
    auto_confirm: bool,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<ReviewSummary>
where
    R: BufRead,
    W: Write,
{
    while let Some(envelope) = session.current_envelope() {
        writeln!(output, "[{}/{}]", session.position(), session.total())?;
        writeln!(output, "{}", envelope.to_pretty_json()?)?;

        let decision = if auto_confirm {
            ReviewDecision::Import
        } else {
            write!(output, "{}", PROMPT)?;
            output.flush()?;
            let mut answer = String::new();
            if input.read_line(&mut answer)? == 0 {
                ReviewDecision::Cancel
            } else {
                ReviewDecision::from_answer(&answer)
            }
        };

        match session.decide(decision, submitter).await {
            Ok(_) => match decision {
                ReviewDecision::Import => writeln!(output, "Imported.")?,
                ReviewDecision::Skip => writeln!(output, "Skipped.")?,
                ReviewDecision::Cancel => writeln!(output, "Import cancelled.")?,
            },
            Err(err) if session.is_terminated() => {
                tracing::error!("Import stopped: {}", err);
                writeln!(output, "Import failed: {}", err)?;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(session.summary())
}
