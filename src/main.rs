mod cli;
mod i18n;
mod logging;
mod output;
mod screen;
mod store;
mod tui;
mod usage;

use anyhow::Result;
use clap::Parser;
use cli::Args;
use tokio_util::sync::CancellationToken;

use crate::i18n::Catalog;
use crate::screen::UsageScreen;
use crate::store::ProfileStore;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init(&args.effective_log_file());

    let profile = args.effective_profile();
    tracing::info!(
        mode = ?args.mode,
        profile = %profile.display(),
        dry_run = args.dry_run,
        "site-sweep starting"
    );

    let catalog = match &args.strings {
        Some(path) => Catalog::load(path)?,
        None => Catalog::default(),
    };

    // Determine output mode
    if args.json {
        return output::run_non_interactive(&args, &catalog);
    }

    let cancel_token = CancellationToken::new();

    // Handle Ctrl+C gracefully
    let cancel_clone = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        cancel_clone.cancel();
    });

    let store = ProfileStore::open(&profile, &args.effective_allowlist(), args.dry_run);
    let mut screen = UsageScreen::new(args.mode, store);
    if let Some(search) = &args.search {
        screen.set_search(search);
    }

    let result = tui::run(screen, catalog, cancel_token).await;
    if let Err(e) = &result {
        tracing::error!(error = ?e, "application error");
    }
    tracing::info!("site-sweep exited");
    result
}
