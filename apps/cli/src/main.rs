mod config;
mod main_lib;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use folioport_connect::GhostfolioClient;
use folioport_core::{BrokerFormat, ImportSession, ReviewState, TerminationReason};

use crate::config::Config;
use crate::main_lib::{build_normalizer, init_tracing, print_envelopes, run_review};

#[derive(Parser)]
#[command(name = "folioport")]
#[command(about = "Review a broker export and import it into Ghostfolio")]
struct Cli {
    /// Path to the broker's CSV export
    #[arg(short, long)]
    file: PathBuf,

    /// Export format: cathay or ft
    #[arg(short, long)]
    broker: String,

    /// Import every record without asking
    #[arg(short, long)]
    yes: bool,

    /// Print the normalized records and exit without contacting Ghostfolio
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing();

    let broker: BrokerFormat = cli.broker.parse()?;
    let content = std::fs::read(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    let normalizer = build_normalizer(&config)?;
    let records = normalizer.normalize_csv(broker, &content).await?;
    tracing::info!(
        "Normalized {} records from {}",
        records.len(),
        cli.file.display()
    );

    let stdout = std::io::stdout();
    if cli.dry_run {
        print_envelopes(&records, &mut stdout.lock())?;
        return Ok(());
    }

    let client = GhostfolioClient::connect(
        &config.host,
        config.require_security_token()?,
        config.request_timeout,
    )
    .await?;

    let mut session = ImportSession::new(broker, records);
    let stdin = std::io::stdin();
    let summary = run_review(
        &mut session,
        &client,
        cli.yes,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
    .await?;

    println!("{}", summary);
    if let ReviewState::Terminated(TerminationReason::SubmissionFailed(reason)) = &summary.state {
        bail!("Import stopped after a failed submission: {}", reason);
    }
    Ok(())
}
