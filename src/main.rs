mod app;
mod bookmarks;
mod clipboard;
mod config;
mod error;
mod fetch;
mod intent;
mod listing;
mod pipeline;
mod record;
mod storage;
mod toast;
mod ui;

use app::App;
use clap::{Parser, Subcommand};
use clipboard::SystemClipboard;
use config::Config;
use crossterm::event::{self, Event, KeyEventKind};
use indicatif::{ProgressBar, ProgressStyle};
use intent::{Intent, intent_for_key};
use pipeline::{FilterState, SortMode, ViewMode};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use storage::{FileStore, Preferences};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

/// Browse, search and bookmark a catalog of links served by a sheet API
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Records endpoint (overrides config.json)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Path to config.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding storage.json and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TUI catalog (default)
    Run,
    /// Fetch once and print one page of results
    List {
        /// Match name or code, case-insensitive
        #[arg(short, long, default_value = "")]
        search: String,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Sort by name instead of fetch order
        #[arg(long)]
        by_name: bool,
        /// Only bookmarked entries
        #[arg(short, long)]
        bookmarks: bool,
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?.with_overrides(cli.endpoint, cli.data_dir);
    let data_dir = config.data_dir()?;
    let _log_guard = init_logging(&data_dir)?;
    info!("link-catalog v{} starting", env!("CARGO_PKG_VERSION"));

    let prefs = Preferences::new(Box::new(FileStore::open(&data_dir)));

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let mut app = App::new(prefs, Box::new(SystemClipboard::new()), &config);

            // Loader goes up before the request is issued
            let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
            app.begin_fetch();
            let _fetch = fetch::spawn_fetch(fetch::build_client()?, config.endpoint.clone(), tx);

            // Init terminal
            let mut terminal = ratatui::init();

            // Main loop
            let result = run_app(&mut terminal, &mut app, &mut rx);

            // Restore terminal
            ratatui::restore();

            if let Err(e) = result {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Commands::List {
            search,
            category,
            by_name,
            bookmarks,
            page,
        } => {
            let state = FilterState {
                search,
                category,
                sort: if by_name { SortMode::Name } else { SortMode::Default },
                view: if bookmarks { ViewMode::Bookmarks } else { ViewMode::All },
                page,
            };

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
            spinner.set_message(format!("Fetching {}", config.endpoint));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let client = fetch::build_client()?;
            let result = fetch::fetch_records(&client, &config.endpoint).await;
            spinner.finish_and_clear();

            match result {
                Ok(records) => {
                    print!("{}", listing::render_page(&records, &state, &prefs.bookmarks()));
                }
                Err(e) => {
                    eprintln!("Error: {}", e.user_message());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// File logging under `<data_dir>/logs`; the terminal belongs to the TUI.
fn init_logging(data_dir: &Path) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::never(&log_dir, "link-catalog.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("link_catalog=info"));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(guard)
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    rx: &mut UnboundedReceiver<Intent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Background results (the fetch) are just more intents
        while let Ok(intent) = rx.try_recv() {
            app.update(intent);
        }
        app.update(Intent::Tick(Instant::now()));

        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Short poll so toasts expire without input
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(intent) = intent_for_key(app, key) {
                    app.update(intent);
                }
            }
        }
    }
}
