//! TUI module
//!
//! Terminal front end for the topology views, built with ratatui.

mod app;
mod constants;
mod keybindings;
mod theme;
pub mod viewport;
pub mod views;

pub use app::*;
pub use theme::*;

use crate::datasource::ResourceProvider;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Run the TUI application until the user quits
pub async fn run_tui(
    mut app: App,
    provider: Arc<dyn ResourceProvider>,
    refresh_interval: Duration,
) -> Result<()> {
    tracing::debug!("Initializing TUI");

    let enable_mouse = app.config.ui.enable_mouse;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if enable_mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::debug!("TUI initialized, entering main loop");
    let result = event_loop(&mut terminal, &mut app, provider, refresh_interval).await;

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    if enable_mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    provider: Arc<dyn ResourceProvider>,
    refresh_interval: Duration,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        app.schedule_refresh(refresh_interval);
        if let Some(request) = app.trigger_fetch() {
            tracing::debug!(
                "Fetching namespace {} (invalidate: {})",
                request.namespace,
                request.invalidate
            );
            let provider = Arc::clone(&provider);
            tokio::spawn(async move {
                if request.invalidate {
                    provider.invalidate().await;
                }
                let result = provider.fetch(&request.namespace).await;
                if let Err(ref e) = result {
                    tracing::warn!("Failed to fetch {}: {}", request.namespace, e);
                }
                let _ = request.tx.send(result);
            });
        }

        if let Some(result) = app.try_get_fetch_result() {
            app.apply_fetch_result(result);
        }

        if crossterm::event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) == Some(true) {
                        break;
                    }
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse);
                }
                _ => {}
            }
        }

        // Let spawned fetches make progress between frames
        tokio::task::yield_now().await;
    }

    Ok(())
}
