mod animation;
mod app;
mod celebration;
mod config;
mod error;
mod event;
mod svg;
mod ui;
mod wheel;

use std::io;
use std::path::Path;

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde::Serialize;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use crate::animation::TweenAnimator;
use crate::app::App;
use crate::config::{CliArgs, Config};
use crate::error::WheelError;
use crate::event::EventHandler;
use crate::svg::SvgStyle;
use crate::wheel::{resolver, NoCelebration, PrizeWheel, SpinOutcome, Viewport, WheelLayout};

/// Side length of an exported SVG document
const SVG_SIZE: f64 = 600.0;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI args
    let cli = CliArgs::parse();

    if cli.print_default_config {
        print!("{}", config::default_config_toml());
        return Ok(());
    }

    // Initialize color-eyre with custom panic hook that restores terminal
    install_panic_hook();

    let config = config::load(&cli)?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(&config, cli.log_file.as_deref())?;

    info!("prize-wheel starting");

    if let Some(ref path) = cli.export_svg {
        return export_svg(&config, path);
    }

    if cli.once {
        return spin_once(&config);
    }

    run_tui(&config).await
}

/// Headless result of a single spin
#[derive(Debug, Serialize)]
struct SpinReport<'a> {
    index: usize,
    prize: &'a str,
    target_rotation: f64,
    segment_center: f64,
}

/// Run one spin through the state machine without the UI and print it as JSON
fn spin_once(config: &Config) -> Result<()> {
    let prizes = config.prize_list()?;
    let count = prizes.len();
    let picker = config.picker(count)?;
    let mut wheel = PrizeWheel::new(
        prizes,
        config.spin_settings()?,
        picker,
        TweenAnimator::new(),
        NoCelebration,
    )?;

    let SpinOutcome::Started { index, target } = wheel.spin() else {
        return Err(eyre!("a fresh wheel refused to spin"));
    };

    // jump straight to the end of the tween
    let duration = wheel.settings().spin_duration;
    if let Some(done) = wheel.animator_mut().advance(duration) {
        wheel.complete(done);
    }

    let report = SpinReport {
        index,
        prize: wheel.selected_prize().unwrap_or_default(),
        target_rotation: target,
        segment_center: resolver::segment_center(count, index),
    };

    info!(index, target, "headless spin");
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

fn export_svg(config: &Config, path: &Path) -> Result<()> {
    let prizes = config.prize_list()?;
    let layout = WheelLayout::new(
        prizes.len(),
        config.layout_params(),
        Viewport::square(SVG_SIZE),
    );
    let document = svg::render_svg(&layout, &prizes, &SvgStyle::from_config(config), 0.0);

    std::fs::write(path, document)
        .wrap_err_with(|| format!("Failed to write SVG to {}", path.display()))?;
    info!("exported wheel to {}", path.display());
    println!("Wrote {}", path.display());
    Ok(())
}

async fn run_tui(config: &Config) -> Result<()> {
    // Build the app first so config errors surface before the screen flips
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| WheelError::Terminal(format!("Failed to enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut event_handler = EventHandler::new(config.tick_rate_ms());

    // ── Main event loop ───────────────────────────────────────────────
    let result: Result<()> = async {
        loop {
            terminal.draw(|f| ui::draw(f, &mut app))?;

            match event_handler.next().await {
                Some(event) => app.handle_event(event),
                None => break,
            }

            if app.should_quit {
                break;
            }
        }
        Ok(())
    }
    .await;

    event_handler.stop();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(
        spins = app.wheel.spins_completed(),
        "prize-wheel exiting"
    );
    result
}

/// Install a panic hook that restores the terminal before printing the panic
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call default handler
        default_hook(panic_info);
    }));
    color_eyre::install().ok();
}

/// Initialize tracing to a log file. `RUST_LOG` wins over the configured level.
fn init_logging(config: &Config, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::EnvFilter;

    let level = config.general.log_level.trim();
    if level.eq_ignore_ascii_case("off") && std::env::var_os("RUST_LOG").is_none() {
        // Can't log to stdout in a TUI, so "off" means no subscriber at all
        return Ok(None);
    }

    let (dir, file_name) = match log_file {
        Some(path) => (
            path.parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| ".".into()),
            path.file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "prize-wheel.log".into()),
        ),
        None => (Config::log_dir(), "prize-wheel.log".into()),
    };
    std::fs::create_dir_all(&dir)
        .wrap_err_with(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}
