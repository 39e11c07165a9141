mod cli;
mod config;
mod handlers;
mod models;
mod scraping;

use crate::cli::Args;
use crate::config::Settings;
use crate::handlers::login::login_until_settled;
use crate::handlers::scan::find_availability;
use crate::scraping::prompt::CredentialPrompt;
use crate::scraping::session::{DriveTestSession, LoginOutcome};
use chrono::Local;
use clap::Parser;
use dotenv::dotenv;
use std::io;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let request = Args::parse().into_request(Local::now().date_naive())?;
    let settings = Settings::from_env()?;
    if !request.licence_class.is_known() {
        warn!("{} is not a licence class DriveTest is known to book", request.licence_class);
    }

    let session = DriveTestSession::new(settings.base_url.clone())?;
    let mut prompt = CredentialPrompt::new(io::stdin().lock(), io::stdout());
    if login_until_settled(&session, &mut prompt, &settings).await? == LoginOutcome::VerifyEmail {
        return Ok(ExitCode::FAILURE);
    }

    let mut out = io::stdout().lock();
    let summary = find_availability(
        &session,
        &request.licence_class,
        request.window,
        request.filter,
        request.proximity.as_ref(),
        &mut out,
    )
    .await?;
    info!(
        "done: {} services checked with {} booking queries",
        summary.locations, summary.queries
    );

    Ok(ExitCode::SUCCESS)
}
