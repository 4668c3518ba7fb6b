use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use signal_console::config::Overrides;
use signal_console::data::derive::derived_summary;
use signal_console::{
    events, fetch_bounded, logging, normalize, ui, App, HttpSource, PollHandle, Settings, Theme,
};

#[derive(Parser, Debug)]
#[command(name = "signal-console")]
#[command(about = "Terminal dashboard for a live trading signal feed")]
struct Args {
    /// Backend API base (e.g. http://10.0.0.5:8000). Overrides --host.
    #[arg(short, long)]
    api_base: Option<String>,

    /// Backend host; the API base becomes http://<host>:8000
    #[arg(long)]
    host: Option<String>,

    /// Path to a TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Poll interval in milliseconds
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Request timeout in milliseconds
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch the signal once, print it as JSON and exit
    #[arg(long)]
    once: bool,
}

impl Args {
    /// Command-line values that override the configured settings.
    fn overrides(&self) -> Overrides {
        Overrides {
            api_base: self.api_base.clone(),
            host: self.host.clone(),
            poll_interval_ms: self.interval_ms,
            request_timeout_ms: self.timeout_ms,
            log_file: self.log_file.clone(),
        }
    }

    /// Load settings and apply command-line overrides on top.
    fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        settings.apply_overrides(self.overrides())?;
        Ok(settings)
    }
}

/// Build the HTTP source, bounding connection setup by the request timeout.
fn http_source(settings: &Settings) -> Result<HttpSource> {
    let source = HttpSource::builder()
        .api_base(settings.api_base())
        .connect_timeout(settings.poll_config().timeout)
        .build()?;
    Ok(source)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = args.settings()?;

    if args.once {
        logging::init_stderr(&settings.log_level)?;
        return run_once(&settings);
    }

    if let Some(ref path) = settings.log_file {
        logging::init_file(path, &settings.log_level)?;
    }
    run_with_http(&settings)
}

/// Fetch a single signal and print it with its derived labels.
fn run_once(settings: &Settings) -> Result<()> {
    let api_base = settings.api_base();
    let source = http_source(settings)?;
    let timeout = settings.poll_config().timeout;

    let rt = tokio::runtime::Runtime::new()?;
    let raw = rt
        .block_on(fetch_bounded(&source, timeout))
        .with_context(|| format!("Backend unreachable at {}", source.endpoint()))?;

    let signal = normalize(raw);
    let output = serde_json::json!({
        "api_base": api_base,
        "signal": signal,
        "derived": derived_summary(&signal),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Poll the HTTP backend and run the dashboard
fn run_with_http(settings: &Settings) -> Result<()> {
    let api_base = settings.api_base();
    let source = http_source(settings)?;

    // Build a tokio runtime; polling runs on its workers while the TUI owns the main thread
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    info!(api_base = %api_base, "starting dashboard");
    let poller = PollHandle::spawn(Arc::new(source), settings.poll_config());
    let app = App::new(poller, api_base, Theme::auto_detect());

    // Dropping the app stops polling
    run_tui(app)
}

/// Run the TUI until the user quits
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        app.sync_state();

        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    info!("dashboard closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let args = Args::try_parse_from([
            "signal-console",
            "--host",
            "10.3.3.3",
            "--interval-ms",
            "2500",
            "--timeout-ms",
            "2000",
        ])
        .unwrap();
        assert!(!args.once);

        let mut settings = Settings::default();
        settings.apply_overrides(args.overrides()).unwrap();
        assert_eq!(settings.api_base(), "http://10.3.3.3:8000");
        assert_eq!(settings.poll_interval_ms, 2500);
        assert_eq!(settings.request_timeout_ms, 2000);
    }

    #[test]
    fn test_parse_api_base_and_once() {
        let args =
            Args::try_parse_from(["signal-console", "--api-base", "http://x:9000", "--once"])
                .unwrap();
        assert!(args.once);
        assert_eq!(args.overrides().api_base.as_deref(), Some("http://x:9000"));
    }

    #[test]
    fn test_http_source_uses_configured_api_base() {
        let mut settings = Settings::default();
        settings.api_base = Some("http://10.0.0.5:8000/".to_string());
        let source = http_source(&settings).unwrap();
        assert_eq!(source.endpoint(), "http://10.0.0.5:8000/api/signal");
    }
}
