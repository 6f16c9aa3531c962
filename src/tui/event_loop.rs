use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use super::app::App;
use super::cleanup::TerminalGuard;
use super::input::{handle_key, Action};
use super::ui;
use crate::store::SiteDataStore;

/// Rows taken by the header, footer, borders and section header.
const CHROME_HEIGHT: u16 = 9;

pub async fn run<S: SiteDataStore>(mut app: App<S>, cancel_token: CancellationToken) -> Result<()> {
    let (_guard, mut terminal) = TerminalGuard::enter()?;

    app.visible_height = terminal.size()?.height.saturating_sub(CHROME_HEIGHT) as usize;

    let mut event_stream = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        // Use biased to prioritize keyboard input
        tokio::select! {
            biased;

            () = cancel_token.cancelled() => break,

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => {
                        match handle_key(key, &mut app) {
                            Action::Quit => break,
                            Action::Delete => {
                                app.delete_current();
                            }
                            Action::Select => {
                                let selection = app.select_current();
                                tracing::debug!(?selection, "row selected");
                            }
                            Action::Continue => {}
                        }
                    }
                    Some(Ok(Event::Resize(_, height))) => {
                        app.visible_height = height.saturating_sub(CHROME_HEIGHT) as usize;
                    }
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "terminal event error");
                    }
                    None => break,
                    _ => {}
                }
            }

            // Tick for status message expiry
            _ = tick.tick() => {
                app.on_tick();
            }
        }
    }

    Ok(())
}
