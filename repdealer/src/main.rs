//! Terminal front end for the reputation card dealer.
//!
//! ```bash
//! # play against the built-in host
//! repdealer --seed 7
//!
//! # exercise the response timeout: host ignores half of all gives
//! repdealer --silence-rate 0.5
//!
//! # talk to a real host over newline-delimited JSON
//! repdealer --connect 127.0.0.1:30120
//! ```

mod app;
mod demo;
mod effects;
mod link;
mod screens;

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use demo::DemoHost;
use link::{HostLink, TcpLink};
use repdealer_core::{Surface, SurfaceConfig};

/// Reputation card dealer
#[derive(Parser, Debug)]
#[command(name = "repdealer")]
#[command(version)]
#[command(about = "Pick a reputation card and hand it to the dealer")]
struct Args {
    /// Host address (host:port). Without it an in-process demo host is used.
    #[arg(long)]
    connect: Option<String>,

    /// Delay between confirming a give and sending it
    #[arg(long, default_value_t = 300)]
    debounce_ms: u64,

    /// How long to wait for the host before unblocking
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Host resource name used to address outbound calls
    #[arg(long, default_value = repdealer_core::config::DEFAULT_RESOURCE)]
    resource: String,

    /// Log file; the terminal belongs to the UI
    #[arg(long, default_value = "repdealer.log")]
    log_file: PathBuf,

    /// Demo host: chance of never answering a give (0.0 - 1.0)
    #[arg(long, default_value_t = 0.0, value_parser = parse_rate)]
    silence_rate: f64,

    /// Demo host: RNG seed for reproducible catalogs
    #[arg(long)]
    seed: Option<u64>,

    /// Demo host: slowest answer to a give, in milliseconds
    #[arg(long, default_value_t = 1500)]
    max_latency_ms: u64,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(format!("{} is not a probability between 0 and 1", s));
    }
    Ok(rate)
}

fn setup_logging(path: &Path, verbosity: u8) -> color_eyre::Result<()> {
    let filter = match verbosity {
        0 => "repdealer=info,repdealer_core=info",
        1 => "repdealer=debug,repdealer_core=debug",
        _ => "trace",
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    setup_logging(&args.log_file, args.verbose)?;

    let config = SurfaceConfig::default()
        .debounce(Duration::from_millis(args.debounce_ms))
        .response_timeout(Duration::from_millis(args.timeout_ms))
        .resource_name(args.resource.clone());

    let link: Box<dyn HostLink> = match &args.connect {
        Some(addr) => Box::new(TcpLink::connect(addr)?),
        None => Box::new(
            DemoHost::new(args.seed, args.silence_rate).latency(200, args.max_latency_ms),
        ),
    };
    info!(host = %link.name(), resource = %config.resource_name, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, App::new(Surface::new(config), link));

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }
    info!("stopped");

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> color_eyre::Result<()> {
    loop {
        terminal.draw(|frame| {
            app.render(frame);
        })?;

        // ~30fps for animations, sooner if a timer is due
        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && app.handle_key(key) {
                        break; // Quit signal
                    }
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse);
                }
                Event::Resize(w, h) => {
                    app.handle_resize(w, h);
                }
                _ => {}
            }
        }

        app.tick();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("0.25"), Ok(0.25));
        assert_eq!(parse_rate("1"), Ok(1.0));
        assert!(parse_rate("NaN").is_err());
        assert!(parse_rate("inf").is_err());
        assert!(parse_rate("1.5").is_err());
        assert!(parse_rate("lots").is_err());
    }

    #[test]
    fn test_args_reject_nan_silence_rate() {
        assert!(Args::try_parse_from(["repdealer", "--silence-rate", "NaN"]).is_err());
        let args = Args::try_parse_from(["repdealer", "--silence-rate", "0.5"]).unwrap();
        assert_eq!(args.silence_rate, 0.5);
    }
}
