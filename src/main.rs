//! IG Saved Collection Downloader - CLI entry point.

use std::process::ExitCode;

use chrono::{TimeZone, Utc};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use ig_saved_downloader::{
    api::InstaClient,
    auth::authenticate,
    cli::Args,
    download::process_saved_items,
    error::{exit_codes, Result},
    feed::collect_saved,
    output::{print_banner, print_config_summary, print_error, print_info, print_run_stats},
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Print banner
    print_banner();
    print_config_summary(
        &args.username,
        &args.settings.display().to_string(),
        &args.target_dir.display().to_string(),
    );

    // Establish a session, reusing the cached settings when possible
    let api = InstaClient::new()?;
    let session = authenticate(&api, &args.credentials(), &args.settings).await?;

    if let Some(expires) = session.auth_expires() {
        if let Some(when) = Utc.timestamp_opt(expires, 0).single() {
            print_info(&format!(
                "Cookie Expiry: {}",
                when.format("%Y-%m-%dT%H:%M:%SZ")
            ));
        }
    }

    // Accumulate the entire saved feed before processing
    let items = collect_saved(&api).await?;
    print_info(&format!("Saved items to download: {}", items.len()));

    // Unsave and download each item
    let stats = process_saved_items(&api, &items, &args.target_dir).await?;
    print_run_stats(&stats);

    Ok(())
}
