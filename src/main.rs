use anyhow::{Context, Result};
use crabclock::app::action::Action;
use crabclock::app::event::AppEvent;
use crabclock::app::handler;
use crabclock::app::state::AppState;
use crabclock::config::{self, AppConfig};
use crabclock::countdown::{Countdown, CountdownConfig};
use crabclock::{logging, ui};
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Load config and resolve the countdown before touching the terminal
    let cfg = config::load_config().context("Failed to load config")?;
    let countdown_cfg = cfg
        .countdown
        .to_countdown_config(chrono::Utc::now())
        .context("Invalid countdown settings")?;

    if let Some(path) = logging::init(&cfg.logging)? {
        info!("Logging to {}", path.display());
    }
    info!(
        start = countdown_cfg.start,
        stop = countdown_cfg.stop,
        interval_ms = countdown_cfg.interval.as_millis() as u64,
        "Starting crabclock v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg, countdown_cfg).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    info!("Shutdown complete");
    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: AppConfig,
    countdown_cfg: CountdownConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let mut countdown = Countdown::new(countdown_cfg.clone());
    let mut state = AppState::new(cfg.clone(), &countdown_cfg, countdown.state());

    // Countdown transitions feed the event loop
    let countdown_tx = event_tx.clone();
    countdown.set_listener(move |snapshot| {
        let _ = countdown_tx.send(AppEvent::Countdown(snapshot));
    });

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    warn!("Terminal input failed: {}", e);
                    break;
                }
                None => break,
            }
        }
    });

    // Spawn frame tick task for flip animations
    let tick_tx = event_tx.clone();
    let frame = cfg.ui.frame();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(frame);
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });
    drop(event_tx);

    // Initial render
    terminal.draw(|f| ui::render(f, &state, Instant::now()))?;
    state.dirty = false;

    // Main event loop
    while let Some(event) = event_rx.recv().await {
        let now = Instant::now();
        let actions = handler::handle_event(&mut state, event, now);

        for action in actions {
            debug!(?action, "dispatching");
            match action {
                Action::Start => countdown.start(),
                Action::Stop => countdown.stop(),
                Action::Toggle => {
                    if countdown.is_running() {
                        countdown.stop();
                    } else {
                        countdown.start();
                    }
                }
                Action::Reset => countdown.reset(),
                Action::Quit => state.should_quit = true,
            }
        }

        if state.should_quit {
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state, now))?;
            state.dirty = false;
        }
    }

    // Dropping the countdown cancels its timer
    drop(countdown);
    Ok(())
}
