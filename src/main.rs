use anyhow::{Context, Result};
use b3_portfolio::{persist::PersistOutcome, run_once, PortfolioConfig, RunOutcome};
use chrono::Local;
use reqwest::Client;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) configure ────────────────────────────────────────────────
    let cfg = PortfolioConfig::from_env().context("loading configuration")?;
    let client = match Client::builder().build() {
        Ok(client) => client,
        Err(e) => {
            error!("building HTTP client failed: {}; no files written", e);
            return Ok(());
        }
    };
    let trade_date = Local::now().date_naive();

    // ─── 3) fetch + save ─────────────────────────────────────────────
    // Failures were already logged by the stage that hit them.
    match run_once(&client, &cfg, trade_date).await {
        RunOutcome::NoData(_) => info!("no data fetched; no files written"),
        RunOutcome::Persisted(PersistOutcome::NothingToPersist) => info!("nothing to persist"),
        RunOutcome::Persisted(outcome) => info!(
            written = outcome.written().len(),
            failed = outcome.errors().len(),
            "run finished"
        ),
    }

    info!("all done");
    Ok(())
}
