use cardstack::app::{App, AppMessage};
use cardstack::cli::{parse_args, run_cli_command};
use cardstack::config::ConfigManager;
use cardstack::logging::init_logging;
use cardstack::terminal::{setup_panic_hook, TerminalManager};
use cardstack::ui;

use color_eyre::Result;
use crossterm::event::EventStream;
use futures::StreamExt;
use ratatui::Terminal;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Frame interval for animations.
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    // Handle CLI flags before touching the terminal
    let options = match parse_args(std::env::args()) {
        Ok(command) => match run_cli_command(command) {
            Some(options) => options,
            None => return Ok(()),
        },
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(2);
        }
    };

    color_eyre::install()?;

    // Setup panic hook to ensure terminal cleanup on panic
    setup_panic_hook();

    let config_manager = match &options.config_path {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new()?,
    };
    init_logging(config_manager.config_dir());

    let mut config = config_manager.load().inspect_err(|e| {
        tracing::error!(code = e.error_code(), error = %e, "Failed to load config");
    })?;
    options.apply(&mut config);

    let runtime = tokio::runtime::Runtime::new()?;
    let mut app = App::new(config).with_config_manager(config_manager);

    let mut terminal_manager = TerminalManager::new()?;
    let result = runtime.block_on(run_app(terminal_manager.terminal(), &mut app));
    terminal_manager.restore()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Exited with error");
    } else {
        tracing::info!(shuffles = app.cycles, "Exited");
    }
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Fixed-rate frame clock; missed frames are skipped, not bunched.
    let mut frames = tokio::time::interval(TICK);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, &mut *app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = frames.tick() => {
                app.tick(Instant::now());
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(event)) => app.handle_event(event, Instant::now()),
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Terminal event error");
                    }
                    None => app.quit(),
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if app.should_quit {
            app.stack.teardown();
            return Ok(());
        }
    }
}
