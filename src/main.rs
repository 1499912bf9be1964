//! sarvam-attempts-report — pull Sarvam attempt analytics into an xlsx
//! report and optionally publish it to a Box folder.
//!
//! One sequential run: paginated fetch over a fixed 1000-day window,
//! spreadsheet write, then an optional Box upload (token from a static
//! developer token or a signed JWT assertion exchange). No retries; any
//! fetch failure bounds the result set, and token/upload failures are
//! logged without endangering the already-saved report.

#![warn(clippy::all)]

mod boxapi;
mod cli;
mod config;
mod report;
mod sarvam;
mod session;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use boxapi::token::TokenStrategy;
use config::Config;
use session::ApiSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str())),
        )
        .init();

    let config = Config::from_cli(cli)?;
    tracing::debug!(?config, "Resolved configuration");

    let client = session::build_client()?;

    let attempts = sarvam::AttemptsClient::new(
        sarvam::DEFAULT_BASE_URL.to_string(),
        config.api_key.clone(),
        config.org_id.clone(),
        config.workspace_id.clone(),
        config.app_id.clone(),
        Box::new(client.clone()),
    );

    let items = attempts.fetch_all().await;
    if items.is_empty() {
        tracing::info!("No data found for the selected time period.");
        return Ok(());
    }

    let output_file = report::write_report(&items, &config.output_dir)?;
    tracing::info!("Total records retrieved: {}", items.len());
    tracing::info!("File saved as: {}", output_file.display());

    // The report is safely on disk at this point; everything Box-related
    // is best-effort and must not fail the run.
    if let Err(e) = publish_to_box(&client, &config, &output_file).await {
        tracing::warn!("Box upload failed (report still saved): {}", e);
    }

    Ok(())
}

/// Resolve the token strategy and upload the report when configured.
async fn publish_to_box(
    session: &dyn ApiSession,
    config: &Config,
    output_file: &std::path::Path,
) -> anyhow::Result<()> {
    let Some(folder_id) = config.box_cfg.folder_id.as_deref() else {
        tracing::info!("Box API upload skipped (BOX_FOLDER_ID not set).");
        return Ok(());
    };

    let strategy = match TokenStrategy::from_config(&config.box_cfg) {
        Ok(strategy) => strategy,
        Err(reason) => {
            tracing::info!("{}", reason.notice());
            return Ok(());
        }
    };

    let token = strategy.access_token(session).await?;
    boxapi::upload_report(session, output_file, folder_id, &token).await?;
    Ok(())
}
