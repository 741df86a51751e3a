mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::Config;
use controller::AppController;
use model::{AppModel, ImageUrls, MetadataService, ThemeStore, TmdbClient};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_args();

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== flixorbit starting ===");

    let client = TmdbClient::new(config.api_base_url.clone(), config.api_key.clone())?;
    let api: Arc<dyn MetadataService> = Arc::new(client);

    let model = Arc::new(AppModel::new(
        ImageUrls::new(config.image_base_url.clone()),
        config.region.clone(),
        ThemeStore::new(&config.cache_dir),
        config.start_path(),
    ));
    let controller = AppController::new(model.clone(), api);

    tracing::info!(region = %config.region, path = %config.start_path(), "Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Genres, languages and the start location load while the UI is already up
    let controller_for_init = controller.clone();
    tokio::spawn(async move {
        controller_for_init.initialize().await;
    });

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("flixorbit shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        model.auto_clear_old_errors().await;
        model.tick(Instant::now()).await;

        let snapshot = model.snapshot().await;
        terminal.draw(|f| {
            AppView::render(f, &snapshot);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if model.should_quit().await {
            break;
        }
    }

    Ok(())
}
