mod app;
mod cleanup;
mod event_loop;
mod input;
mod ui;

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::i18n::Catalog;
use crate::screen::UsageScreen;
use crate::store::SiteDataStore;

pub async fn run<S: SiteDataStore>(
    screen: UsageScreen<S>,
    catalog: Catalog,
    cancel_token: CancellationToken,
) -> Result<()> {
    let app = app::App::new(screen, catalog);
    event_loop::run(app, cancel_token).await
}
