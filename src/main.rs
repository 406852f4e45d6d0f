use std::io;
use std::path::Path;
use std::time::Duration;
use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use melody_rs::audio::PreviewPlayer;
use melody_rs::auth;
use melody_rs::config::{Args, Config};
use melody_rs::controller::AppController;
use melody_rs::logging;
use melody_rs::model::{AppModel, BackendClient, CollectionSynchronizer, SearchClient, SessionStore};
use melody_rs::view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = match logging::init_logging(Path::new(logging::LOG_DIR)) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("=== Melody-RS Starting ===");

    let args = Args::parse();
    let config = Config::from_env()?.with_args(&args);

    if args.logout {
        auth::logout(&config.cache_dir)?;
        println!("Signed out.");
        return Ok(());
    }

    // Step 1: Sign in before the TUI takes over the terminal
    let backend = BackendClient::new(&config.api_url);
    tracing::info!(api_url = backend.base_url(), search_url = %config.search_url, "Configuration loaded");
    let auth_result = auth::authenticate(&backend, &config.cache_dir, &args).await?;

    // Step 2: Wire the model, player and controller together
    let session = SessionStore::with_user(auth_result.user);
    let sync = CollectionSynchronizer::new(backend, session);
    let search = SearchClient::new(&config.search_url, &config.trending_query);
    let model = AppModel::new(search, sync);

    let (player, player_events) = PreviewPlayer::new();
    if !player.is_available() {
        tracing::warn!("No audio output, previews are disabled");
    }

    let controller = AppController::new(model.clone(), player, config.search_limit);
    controller.start_player_event_listener(player_events);

    let controller_for_trending = controller.clone();
    tokio::spawn(async move {
        controller_for_trending.load_trending().await;
    });

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &model, &controller).await;

    controller.stop_preview().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    if model.logout_requested().await {
        auth::logout(&config.cache_dir)?;
        model.session().clear().await;
        println!("Signed out. Run melody-rs again to sign in.");
    }

    tracing::info!("Melody-RS shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: &AppModel,
    controller: &AppController,
) -> io::Result<()> {
    let mut seen_revision = 0;
    let mut user = None;

    loop {
        model.auto_clear_toast().await;

        // Get current state
        let ui_state = model.get_ui_state().await;
        let content_state = model.get_content_state().await;
        if let Some((revision, latest)) = model.user_if_changed(seen_revision).await {
            seen_revision = revision;
            user = latest;
        }

        // Draw UI
        terminal.draw(|f| {
            AppView::render(f, &ui_state, &content_state, user.as_deref());
        })?;

        // Handle input with shorter poll time for smoother UI updates
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if model.should_quit().await || model.logout_requested().await {
            break;
        }
    }

    Ok(())
}
