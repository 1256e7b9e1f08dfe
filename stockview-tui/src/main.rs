//! stockview TUI: one-screen stock dashboard.
//!
//! Form row on top, then four panels:
//! 1. Recent stock data (last rows of the series)
//! 2. Stock price trend (closing price over the range)
//! 3. Candlestick chart (most recent window)
//! 4. Latest stock news

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use stockview_core::{MarketDataProvider, StockviewConfig, YahooProvider};
use stockview_tui::{AppState, input, ui};

#[derive(Parser)]
#[command(name = "stockview-tui", version, about = "Terminal stock dashboard")]
struct Args {
    /// Config file (default: <config dir>/stockview/config.toml, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial stock symbol
    #[arg(long)]
    ticker: Option<String>,

    /// Initial start date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,

    /// Initial end date (YYYY-MM-DD), exclusive
    #[arg(long)]
    end: Option<String>,

    /// Log file (default: <cache dir>/stockview/stockview.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.clone())?;

    let mut config = StockviewConfig::load(args.config.as_deref())?;
    config.defaults.apply_overrides(
        args.ticker.as_deref(),
        args.start.as_deref(),
        args.end.as_deref(),
    )?;

    let provider = YahooProvider::new(config.provider.clone())?;
    let today = chrono::Local::now().date_naive();
    let mut app = AppState::new(&config, today);
    // The dashboard opens on the default symbol, like a fresh page load.
    app.submit_requested = true;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app, &provider);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// The terminal is ours, so logs go to a file. No file, no logs.
fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let Some(path) = path.or_else(|| {
        dirs::cache_dir().map(|d| d.join("stockview").join("stockview.log"))
    }) else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = File::create(&path).with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    log::info!("stockview-tui {} started", env!("CARGO_PKG_VERSION"));
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    provider: &dyn MarketDataProvider,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. A pending submit: show the fetching frame, then block on the provider.
        if app.submit_requested {
            app.submit_requested = false;
            app.begin_fetch();
            terminal.draw(|f| ui::draw(f, app))?;
            app.submit(provider);
            continue;
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
